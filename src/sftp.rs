//! The SFTP side of a session: a blocking wrapper over the async
//! `russh`/`russh-sftp` stack, driven by a runtime owned by the handle.

use std::future::Future;
use std::path::Path;
use std::sync::Arc;

use log::{info, warn};
use russh::client::{self, AuthResult, Handle};
use russh::keys::PublicKey;
use russh::Disconnect;
use russh_sftp::client::SftpSession;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::runtime::Runtime;

use crate::error::Error;

/// Client-side SSH event handler. Server keys are accepted as-is: the
/// session authenticates with username/password only and carries no
/// known-hosts store.
struct ClientHandler;

impl client::Handler for ClientHandler {
    type Error = russh::Error;

    fn check_server_key(
        &mut self,
        _server_public_key: &PublicKey,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send {
        async { Ok(true) }
    }
}

/// An established SFTP session.
pub struct SftpHandle {
    runtime: Runtime,
    session: Handle<ClientHandler>,
    sftp: SftpSession,
}

impl SftpHandle {
    /// Connect to `host:port`, authenticate with a password and start the
    /// SFTP subsystem on a fresh channel.
    pub fn connect(host: &str, port: u16, user: &str, password: &str) -> Result<Self, Error> {
        let runtime = Runtime::new()
            .map_err(|e| Error::Connection(format!("SFTP connection failed: {}", e)))?;

        let (session, sftp) = runtime.block_on(async {
            let config = Arc::new(client::Config::default());
            let mut session = client::connect(config, (host, port), ClientHandler)
                .await
                .map_err(|e| Error::Connection(format!("SFTP connection failed: {}", e)))?;

            let auth = session
                .authenticate_password(user, password)
                .await
                .map_err(|e| Error::Connection(format!("SFTP login failed: {}", e)))?;
            match auth {
                AuthResult::Success => {}
                AuthResult::Failure { .. } => {
                    return Err(Error::Connection("SFTP login failed".to_string()));
                }
            }

            let channel = session
                .channel_open_session()
                .await
                .map_err(|e| Error::Connection(format!("SFTP login failed: {}", e)))?;
            channel
                .request_subsystem(true, "sftp")
                .await
                .map_err(|e| Error::Connection(format!("SFTP login failed: {}", e)))?;
            let sftp = SftpSession::new(channel.into_stream())
                .await
                .map_err(|e| Error::Connection(format!("SFTP login failed: {}", e)))?;

            Ok((session, sftp))
        })?;
        info!("SFTP session established to {}:{}", host, port);

        Ok(SftpHandle {
            runtime,
            session,
            sftp,
        })
    }

    /// Upload the contents of `local_file` to `remote_file`.
    pub fn put(&mut self, local_file: &Path, remote_file: &str) -> Result<(), Error> {
        let data = std::fs::read(local_file)
            .map_err(|e| Error::Transfer(format!("SFTP upload failed: {}", e)))?;
        self.runtime.block_on(async {
            let mut remote = self
                .sftp
                .create(remote_file)
                .await
                .map_err(|e| Error::Transfer(format!("SFTP upload failed: {}", e)))?;
            remote
                .write_all(&data)
                .await
                .map_err(|e| Error::Transfer(format!("SFTP upload failed: {}", e)))?;
            remote
                .shutdown()
                .await
                .map_err(|e| Error::Transfer(format!("SFTP upload failed: {}", e)))?;

            Ok(())
        })
    }

    /// Download `remote_file` into `local_file`.
    pub fn get(&mut self, remote_file: &str, local_file: &Path) -> Result<(), Error> {
        let data = self.runtime.block_on(async {
            let mut remote = self
                .sftp
                .open(remote_file)
                .await
                .map_err(|e| Error::Transfer(format!("SFTP download failed: {}", e)))?;
            let mut data = Vec::new();
            remote
                .read_to_end(&mut data)
                .await
                .map_err(|e| Error::Transfer(format!("SFTP download failed: {}", e)))?;

            Ok::<Vec<u8>, Error>(data)
        })?;
        std::fs::write(local_file, data)
            .map_err(|e| Error::Transfer(format!("SFTP download failed: {}", e)))
    }

    /// Disconnect the underlying SSH session, then drop the handle. Like
    /// the FTP close, failures are logged and swallowed.
    pub fn close(self) {
        let SftpHandle {
            runtime,
            session,
            sftp,
        } = self;
        let result = runtime.block_on(async move {
            drop(sftp);
            session
                .disconnect(Disconnect::ByApplication, "session closed", "en")
                .await
        });
        if let Err(e) = result {
            warn!("SFTP disconnect failed: {}", e);
        }
    }
}
