//! The FTP side of a session: a thin handle over `suppaftp`.

use std::fs::File;
use std::io;
use std::path::Path;

use log::{info, warn};
use suppaftp::types::FileType;
use suppaftp::{FtpStream, Mode};

use crate::error::Error;

/// An established FTP control connection.
pub struct FtpHandle {
    stream: FtpStream,
}

impl FtpHandle {
    /// Open the control connection to `host:port`, log in and select the
    /// transfer mode. Mode selection is a client-local switch in `suppaftp`
    /// and has no failure path.
    pub fn connect(
        host: &str,
        port: u16,
        user: &str,
        password: &str,
        mode: Mode,
    ) -> Result<Self, Error> {
        let mut stream = FtpStream::connect((host, port))
            .map_err(|e| Error::Connection(format!("FTP connection failed: {}", e)))?;
        stream
            .login(user, password)
            .map_err(|e| Error::Connection(format!("FTP login failed: {}", e)))?;
        stream.set_mode(mode);
        info!("FTP connection established to {}:{}", host, port);

        Ok(FtpHandle { stream })
    }

    /// Upload `local_file` to `remote_file` in binary mode.
    pub fn put(&mut self, local_file: &Path, remote_file: &str) -> Result<(), Error> {
        let mut file = File::open(local_file)
            .map_err(|e| Error::Transfer(format!("FTP upload failed: {}", e)))?;
        self.stream
            .transfer_type(FileType::Binary)
            .map_err(|e| Error::Transfer(format!("FTP upload failed: {}", e)))?;
        self.stream
            .put_file(remote_file, &mut file)
            .map_err(|e| Error::Transfer(format!("FTP upload failed: {}", e)))?;

        Ok(())
    }

    /// Download `remote_file` into `local_file` in binary mode. Success
    /// reflects the underlying calls only, the written file is not read
    /// back for verification.
    pub fn get(&mut self, remote_file: &str, local_file: &Path) -> Result<(), Error> {
        self.stream
            .transfer_type(FileType::Binary)
            .map_err(|e| Error::Transfer(format!("FTP download failed: {}", e)))?;
        let mut buffer = self
            .stream
            .retr_as_buffer(remote_file)
            .map_err(|e| Error::Transfer(format!("FTP download failed: {}", e)))?;
        let mut file = File::create(local_file)
            .map_err(|e| Error::Transfer(format!("FTP download failed: {}", e)))?;
        io::copy(&mut buffer, &mut file)
            .map_err(|e| Error::Transfer(format!("FTP download failed: {}", e)))?;

        Ok(())
    }

    /// Send QUIT and drop the transport. Close never fails the caller,
    /// a refused QUIT is logged and swallowed.
    pub fn close(mut self) {
        if let Err(e) = self.stream.quit() {
            warn!("FTP quit failed: {}", e);
        }
    }
}
