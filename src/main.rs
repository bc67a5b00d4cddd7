use transfer_session::prelude::*;

fn main() -> Result<(), Error> {
    let mut session = TransferSession::new();
    session.connect_ftp("test.rebex.net", "demo", "password")?;
    session.download_ftp("/readme.txt", "readme.txt")?;
    session.close_ftp();

    Ok(())
}
