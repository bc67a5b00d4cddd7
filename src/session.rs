//! The transfer session facade: owns at most one FTP and one SFTP
//! handle and delegates every operation to the matching one.

use std::path::Path;

use log::info;
use suppaftp::Mode;

use crate::error::Error;
use crate::ftp::FtpHandle;
use crate::sftp::SftpHandle;

/// A blocking transfer session over FTP and SFTP.
///
/// Each protocol is either disconnected or connected to a single
/// server. Upload and download require the connected state and fail
/// with [`Error::State`] before any network I/O otherwise.
///
/// ```no_run
/// use transfer_session::prelude::*;
///
/// let mut session = TransferSession::new();
/// session.connect_ftp("test.rebex.net", "demo", "password")?;
/// session.download_ftp("/readme.txt", "readme.txt")?;
/// session.close_ftp();
/// # Ok::<(), Error>(())
/// ```
pub struct TransferSession {
    ftp: Option<FtpHandle>,
    sftp: Option<SftpHandle>,
    auto_close_existing: bool,
}

impl Default for TransferSession {
    fn default() -> Self {
        Self::new()
    }
}

impl TransferSession {
    /// Create a session with no open connections.
    pub fn new() -> Self {
        TransferSession {
            ftp: None,
            sftp: None,
            auto_close_existing: true,
        }
    }

    /// Control what happens when connect is called while the same
    /// protocol is already connected: `true` (the default) releases the
    /// old handle first, `false` drops it without an explicit close.
    pub fn set_auto_close_existing(&mut self, auto_close: bool) {
        self.auto_close_existing = auto_close;
    }

    /// Connect to an FTP server on port 21 in passive mode and log in.
    pub fn connect_ftp(&mut self, host: &str, user: &str, password: &str) -> Result<(), Error> {
        self.connect_ftp_with_port(host, 21, user, password, Mode::Passive)
    }

    /// Connect to an FTP server on port 21 with an explicit transfer mode.
    pub fn connect_ftp_with_mode(
        &mut self,
        host: &str,
        user: &str,
        password: &str,
        mode: Mode,
    ) -> Result<(), Error> {
        self.connect_ftp_with_port(host, 21, user, password, mode)
    }

    /// Connect to an FTP server on an explicit port and log in.
    pub fn connect_ftp_with_port(
        &mut self,
        host: &str,
        port: u16,
        user: &str,
        password: &str,
        mode: Mode,
    ) -> Result<(), Error> {
        if self.auto_close_existing {
            self.close_ftp();
        }
        self.ftp = Some(FtpHandle::connect(host, port, user, password, mode)?);

        Ok(())
    }

    /// Connect to an SFTP server on port 22 and authenticate.
    pub fn connect_sftp(&mut self, host: &str, user: &str, password: &str) -> Result<(), Error> {
        self.connect_sftp_with_port(host, 22, user, password)
    }

    /// Connect to an SFTP server on an explicit port and authenticate.
    pub fn connect_sftp_with_port(
        &mut self,
        host: &str,
        port: u16,
        user: &str,
        password: &str,
    ) -> Result<(), Error> {
        if self.auto_close_existing {
            self.close_sftp();
        }
        self.sftp = Some(SftpHandle::connect(host, port, user, password)?);

        Ok(())
    }

    /// Upload a local file over the FTP connection, in binary mode.
    pub fn upload_ftp<P: AsRef<Path>>(
        &mut self,
        local_file: P,
        remote_file: &str,
    ) -> Result<(), Error> {
        let ftp = self
            .ftp
            .as_mut()
            .ok_or_else(|| Error::State("FTP connection not established".to_string()))?;
        ftp.put(local_file.as_ref(), remote_file)
    }

    /// Download a remote file over the FTP connection, in binary mode.
    pub fn download_ftp<P: AsRef<Path>>(
        &mut self,
        remote_file: &str,
        local_file: P,
    ) -> Result<(), Error> {
        let ftp = self
            .ftp
            .as_mut()
            .ok_or_else(|| Error::State("FTP connection not established".to_string()))?;
        ftp.get(remote_file, local_file.as_ref())
    }

    /// Upload a local file over the SFTP session.
    pub fn upload_sftp<P: AsRef<Path>>(
        &mut self,
        local_file: P,
        remote_file: &str,
    ) -> Result<(), Error> {
        let sftp = self
            .sftp
            .as_mut()
            .ok_or_else(|| Error::State("SFTP connection not established".to_string()))?;
        sftp.put(local_file.as_ref(), remote_file)
    }

    /// Download a remote file over the SFTP session.
    pub fn download_sftp<P: AsRef<Path>>(
        &mut self,
        remote_file: &str,
        local_file: P,
    ) -> Result<(), Error> {
        let sftp = self
            .sftp
            .as_mut()
            .ok_or_else(|| Error::State("SFTP connection not established".to_string()))?;
        sftp.get(remote_file, local_file.as_ref())
    }

    /// Release the FTP connection if one is open. No-op otherwise.
    pub fn close_ftp(&mut self) {
        if let Some(handle) = self.ftp.take() {
            handle.close();
            info!("FTP connection closed");
        }
    }

    /// Disconnect the SFTP session if one is open. No-op otherwise.
    pub fn close_sftp(&mut self) {
        if let Some(handle) = self.sftp.take() {
            handle.close();
            info!("SFTP session closed");
        }
    }
}
