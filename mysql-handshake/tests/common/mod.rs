use std::net::SocketAddr;

use futures::{FutureExt, TryFutureExt};
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio_util::compat::{Compat, TokioAsyncReadCompatExt};

use mysql_handshake::{ConnectionFactory, ProbeOptions, Prober};

/// A MySQL 8.0.32 greeting: connection id 25, capability flags 3758096383, utf8mb4, caching_sha2_password.
pub const MYSQL_8_GREETING: &[u8] = &[
    0x4a, 0x00, 0x00, 0x00, // header: 74 byte payload, sequence id 0
    0x0a, b'8', b'.', b'0', b'.', b'3', b'2', 0x00, // protocol version, server version
    0x19, 0x00, 0x00, 0x00, // connection id
    0x1d, 0x2f, 0x52, 0x3a, 0x07, 0x6b, 0x11, 0x58, // auth plugin data part 1
    0x00, // filler
    0xff, 0xff, // capability flags, lower half
    0xff, // character set
    0x02, 0x00, // status flags
    0xff, 0xdf, // capability flags, upper half
    0x15, // auth plugin data length
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // reserved
    0x15, 0x3e, 0x61, 0x0c, 0x5b, 0x2a, 0x4d, 0x77, 0x01, 0x69, 0x33, 0x2f, 0x00, // part 2
    b'c', b'a', b'c', b'h', b'i', b'n', b'g', b'_', b's', b'h', b'a', b'2', b'_', b'p', b'a',
    b's', b's', b'w', b'o', b'r', b'd', 0x00, // auth plugin name
];

/// Starts a one-shot server on an ephemeral local port that writes `greeting` to the first client and hangs up.
pub async fn serve_once(greeting: &'static [u8]) -> SocketAddr {
    let listener = TcpListener::bind(("127.0.0.1", 0))
        .await
        .expect("failed to bind test listener");
    let address = listener
        .local_addr()
        .expect("listener should have a local address");

    tokio::spawn(async move {
        let (mut stream, _) = listener
            .accept()
            .await
            .expect("failed to accept connection");

        stream
            .write_all(greeting)
            .await
            .expect("failed to write greeting");
        stream.shutdown().await.expect("failed to shut down stream");
    });

    address
}

/// Gets a prober that opens TCP connections to `address`.
pub fn tcp_prober(address: SocketAddr) -> Prober<Compat<TcpStream>> {
    let factory: ConnectionFactory<_> = Box::new(move || {
        TcpStream::connect(address)
            // tokio has its own AsyncRead/AsyncWrite traits, so we need a compatibility shim
            // to be able to use its types
            .map_ok(TokioAsyncReadCompatExt::compat)
            .boxed()
    });

    Prober::new(factory, ProbeOptions::default())
}
