//! Define errors that can happen while driving a
//! transfer session.

use derive_error::Error;

/// A session operation error. Every failure carries one of three
/// kinds, so callers can branch on the variant instead of parsing
/// the message text.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport or authentication failure while connecting
    #[error(msg_embedded, no_from, non_std)]
    Connection(String),
    /// Upload or download requested before the matching connect
    #[error(msg_embedded, no_from, non_std)]
    State(String),
    /// The underlying put/get call reported failure
    #[error(msg_embedded, no_from, non_std)]
    Transfer(String),
}
