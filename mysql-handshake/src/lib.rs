//! # mysql-handshake
//!
//! Fingerprints a MySQL-protocol server by reading the initial handshake it sends on connect.
//!
//! Like the decoder it wraps, this crate is runtime-independent: connections are anything
//! implementing [`futures::AsyncRead`], opened by a [`ConnectionFactory`].

#![warn(missing_docs)]

use futures::AsyncRead;

mod inner;
pub use inner::{ConnectionFactory, ConnectionFuture};

mod options;
pub use options::{ProbeBuilder, ProbeOptions, MAX_READ_SIZE};

mod response;
pub use response::Fingerprint;

mod error;
pub use error::ProbeError;

// reexported for ease of access
pub use mysql_handshake_protocol as protocol;
pub use mysql_handshake_protocol::{CapabilityFlags, HandshakeOwned, StatusFlags};

/// Opens connections to a server and fingerprints it from its handshake.
pub struct Prober<S: AsyncRead + Unpin> {
    /// Opens a fresh connection for each probe.
    connection_factory: ConnectionFactory<S>,

    options: ProbeOptions,
}

impl<S: AsyncRead + Unpin> Prober<S> {
    /// Initializes a prober that uses the provided factory to open connections to a server.
    pub fn new(connection_factory: ConnectionFactory<S>, options: ProbeOptions) -> Self {
        Self {
            connection_factory,
            options,
        }
    }

    /// Connects once and decodes the first packet the server sends.
    ///
    /// There is no timeout here; wrap the returned future in one from your runtime of choice.
    pub async fn fingerprint(&self) -> Result<Fingerprint, ProbeError> {
        let mut connection = (self.connection_factory)().await?;

        inner::receive_handshake(&mut connection, self.options.read_buffer_size())
            .await
            .map(Fingerprint::from)
    }
}

/// Decodes the handshake from an already open connection, performing a single read.
pub async fn read_handshake<S>(connection: &mut S) -> Result<Fingerprint, ProbeError>
where
    S: AsyncRead + Unpin,
{
    inner::receive_handshake(connection, MAX_READ_SIZE)
        .await
        .map(Fingerprint::from)
}
