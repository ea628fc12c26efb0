//! Connection plumbing shared by [`Prober`](super::Prober) and [`read_handshake`](super::read_handshake).

use std::future::Future;
use std::io;
use std::pin::Pin;

use futures::{AsyncRead, AsyncReadExt};
use log::{debug, warn};
use mysql_handshake_protocol::{HandshakeOwned, Packet};

use super::ProbeError;

#[cfg(test)]
mod tests;

/// A (pinned, boxed) future that returns a connection or an error, as returned from a [`ConnectionFactory`].
///
/// This is roughly equivalent to the [`BoxFuture`](futures::future::BoxFuture) type in the `futures` crate, but without
/// the lifetime parameter.
pub type ConnectionFuture<S> = Pin<Box<dyn Future<Output = io::Result<S>> + Send>>;

/// An async factory that returns connections used by a [`Prober`](super::Prober).
///
/// The `Box` allows both closures and function pointers.
///
/// # Examples
///
/// ```
/// use futures::io::Cursor;
///
/// use mysql_handshake::{ConnectionFactory, ConnectionFuture};
///
/// // function that returns a connection (in this case just a Cursor)
/// fn function_factory() -> ConnectionFuture<Cursor<Vec<u8>>> {
///     Box::pin(async { Ok(Cursor::new(Vec::new())) })
/// }
///
/// // boxed function pointer
/// let _: ConnectionFactory<_> = Box::new(function_factory);
///
/// // closures work too
/// let _: ConnectionFactory<_> = Box::new(|| {
///     Box::pin(async {
///         let greeting: Vec<u8> = Vec::new();
///         Ok(Cursor::new(greeting))
///     })
/// });
/// ```
pub type ConnectionFactory<S> = Box<dyn Fn() -> ConnectionFuture<S> + Send>;

/// Performs exactly one read of up to `buffer_size` bytes and decodes it as a handshake packet.
///
/// A handshake split across several reads is not reassembled; the decoder sees only the first chunk.
pub(super) async fn receive_handshake<S>(
    connection: &mut S,
    buffer_size: usize,
) -> Result<Packet<HandshakeOwned>, ProbeError>
where
    S: AsyncRead + Unpin,
{
    let mut buffer = vec![0; buffer_size];

    let received = connection.read(&mut buffer).await?;
    if received == 0 {
        return Err(ProbeError::ConnectionClosed);
    }

    debug!("received {received} bytes from server");

    let packet = Packet::<HandshakeOwned>::deserialize(&buffer[..received])?;
    debug!(
        "decoded handshake packet: {} byte payload, sequence id {}",
        packet.header().length(),
        packet.header().sequence_id()
    );

    let handshake = packet.body();
    if !handshake.auth_plugin_name_terminated && !handshake.auth_plugin_name.is_empty() {
        warn!("auth plugin name was not NUL-terminated; took the rest of the payload");
    }

    Ok(packet)
}
