use futures::io;
use thiserror::Error;

use mysql_handshake_protocol as protocol;

/// An error while reading or decoding a server's handshake.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ProbeError {
    /// An error occurred when opening the connection or reading from it.
    #[error(transparent)]
    IOError(#[from] io::Error),

    /// The server closed the connection without sending anything.
    #[error("connection closed by server before a handshake was received")]
    ConnectionClosed,

    /// The bytes received were not a valid handshake.
    #[error("invalid packet received from server: {0}")]
    InvalidPacketReceived(#[from] protocol::DeserializeError),
}

impl ProbeError {
    /// Returns true if the server answered but refused this client's host.
    pub fn is_access_denied(&self) -> bool {
        matches!(
            self,
            Self::InvalidPacketReceived(protocol::DeserializeError::AccessDenied(_))
        )
    }
}
