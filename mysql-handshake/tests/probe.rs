use futures::{FutureExt, TryFutureExt};
use tokio::net::TcpStream;
use tokio_util::compat::TokioAsyncReadCompatExt;

use mysql_handshake::protocol::{DeserializeError, ProtocolVersion};
use mysql_handshake::{read_handshake, CapabilityFlags, ProbeBuilder, ProbeError, Prober};

mod common;

#[tokio::test]
async fn fingerprint_mysql_8() {
    let address = common::serve_once(common::MYSQL_8_GREETING).await;

    let fingerprint = common::tcp_prober(address)
        .fingerprint()
        .await
        .expect("fingerprinting should have succeeded");

    assert_eq!(fingerprint.header.sequence_id(), 0);

    let handshake = &fingerprint.handshake;
    assert_eq!(handshake.protocol_version, ProtocolVersion::V10);
    assert_eq!(handshake.server_version, b"8.0.32");
    assert_eq!(handshake.connection_id, 25);
    assert_eq!(handshake.capability_flags.bits(), 3758096383);
    assert!(handshake.capability_flags.has(CapabilityFlags::PLUGIN_AUTH));
    assert!(!handshake.capability_flags.has(CapabilityFlags::from_bits_retain(1 << 29)));
    assert_eq!(handshake.character_set, 255);
    assert_eq!(handshake.status_flags.bits(), 2);
    assert_eq!(handshake.auth_plugin_data.len(), 21);
    assert_eq!(handshake.auth_plugin_name, b"caching_sha2_password");
}

#[tokio::test]
async fn report_lines() {
    let address = common::serve_once(common::MYSQL_8_GREETING).await;

    let fingerprint = common::tcp_prober(address)
        .fingerprint()
        .await
        .expect("fingerprinting should have succeeded");

    assert_eq!(
        fingerprint.to_string(),
        "Protocol version: 10\n\
         Server version: 8.0.32\n\
         Connection ID: 25\n\
         Auth Plugin Data Len: 21\n\
         Authentication plugin name: caching_sha2_password\n\
         Status flags: 2\n\
         Capability flag: 3758096383\n\
         Character set: 255"
    );
}

#[tokio::test]
async fn read_handshake_on_open_connection() {
    let address = common::serve_once(common::MYSQL_8_GREETING).await;

    let mut connection = TcpStream::connect(address)
        .await
        .expect("couldn't connect to test listener")
        .compat();

    let fingerprint = read_handshake(&mut connection)
        .await
        .expect("handshake should decode");
    assert_eq!(fingerprint.handshake.server_version_lossy(), "8.0.32");
}

#[tokio::test]
async fn server_hangs_up_immediately() {
    let address = common::serve_once(&[]).await;

    let error = common::tcp_prober(address)
        .fingerprint()
        .await
        .expect_err("nothing was sent");
    assert!(matches!(error, ProbeError::ConnectionClosed));
}

#[tokio::test]
async fn host_not_allowed() {
    const REFUSAL: &[u8] = b"\x42\x00\x00\x00\xff\x6a\x04\
        Host '127.0.0.1' is not allowed to connect to this MySQL server";

    let address = common::serve_once(REFUSAL).await;

    let error = common::tcp_prober(address)
        .fingerprint()
        .await
        .expect_err("server refused the connection");

    match error {
        ProbeError::InvalidPacketReceived(DeserializeError::AccessDenied(message)) => assert_eq!(
            message,
            "Host '127.0.0.1' is not allowed to connect to this MySQL server"
        ),
        other => panic!("expected access denied, got {other:?}"),
    }
}

#[tokio::test]
async fn oversized_header() {
    let address = common::serve_once(&[0x00, 0x04, 0x00, 0x00, 0x0a]).await;

    let error = common::tcp_prober(address)
        .fingerprint()
        .await
        .expect_err("declared length is over the sanity bound");
    assert!(matches!(
        error,
        ProbeError::InvalidPacketReceived(DeserializeError::OversizedPacket(1024))
    ));
}

#[tokio::test]
async fn connection_refused() {
    // grab a free port, then close the listener so nothing is listening on it
    let listener = std::net::TcpListener::bind(("127.0.0.1", 0)).expect("failed to bind");
    let address = listener.local_addr().expect("listener should have an address");
    drop(listener);

    let prober = Prober::new(
        Box::new(move || {
            TcpStream::connect(address)
                .map_ok(TokioAsyncReadCompatExt::compat)
                .boxed()
        }),
        ProbeBuilder::new().read_buffer_size(128).build(),
    );

    let error = prober
        .fingerprint()
        .await
        .expect_err("nothing is listening");
    assert!(matches!(error, ProbeError::IOError(_)));
}
