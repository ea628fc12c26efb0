use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::io::Cursor;
use futures::AsyncRead;
use mysql_handshake_protocol::DeserializeError;

use super::receive_handshake;
use crate::{ProbeError, MAX_READ_SIZE};

/// A MySQL 5.5 greeting: PLUGIN_AUTH and SECURE_CONNECTION set, 21 bytes of auth plugin data.
const GREETING: &[u8] = &[
    0x4a, 0x00, 0x00, 0x00, // header: 74 byte payload, sequence id 0
    0x0a, b'5', b'.', b'5', b'.', b'6', b'2', 0x00, // protocol version, server version
    0x2a, 0x00, 0x00, 0x00, // connection id 42
    0x3b, 0x55, 0x6f, 0x21, 0x4c, 0x3d, 0x62, 0x7e, // auth plugin data part 1
    0x00, // filler
    0xff, 0xf7, // capability flags, lower half
    0x21, // character set
    0x02, 0x00, // status flags
    0x0f, 0x80, // capability flags, upper half
    0x15, // auth plugin data length
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // reserved
    0x5b, 0x7a, 0x2f, 0x44, 0x61, 0x38, 0x5e, 0x4b, 0x5c, 0x36, 0x3f, 0x6c, 0x00, // part 2
    b'm', b'y', b's', b'q', b'l', b'_', b'n', b'a', b't', b'i', b'v', b'e', b'_', b'p', b'a',
    b's', b's', b'w', b'o', b'r', b'd', 0x00, // auth plugin name
];

/// Hands out its data in fixed-size chunks, one per read.
struct Chunked {
    data: &'static [u8],
    chunk_size: usize,
}

impl AsyncRead for Chunked {
    fn poll_read(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut [u8],
    ) -> Poll<io::Result<usize>> {
        let length = self.chunk_size.min(buf.len()).min(self.data.len());
        buf[..length].copy_from_slice(&self.data[..length]);
        self.data = &self.data[length..];
        Poll::Ready(Ok(length))
    }
}

#[tokio::test]
async fn single_read_greeting() {
    let mut connection = Cursor::new(GREETING);

    let packet = receive_handshake(&mut connection, MAX_READ_SIZE)
        .await
        .expect("greeting should decode");

    let handshake = packet.body();
    assert_eq!(handshake.server_version_lossy(), "5.5.62");
    assert_eq!(handshake.connection_id, 42);
    assert_eq!(handshake.capability_flags.bits(), 0x800f_f7ff);
    assert_eq!(handshake.character_set, 0x21);
    assert_eq!(handshake.auth_plugin_data.len(), 21);
    assert_eq!(handshake.auth_plugin_name_lossy(), "mysql_native_password");
}

#[tokio::test]
async fn closed_before_greeting() {
    let mut connection = Cursor::new(Vec::new());

    let error = receive_handshake(&mut connection, MAX_READ_SIZE)
        .await
        .expect_err("empty connection shouldn't decode");
    assert!(matches!(error, ProbeError::ConnectionClosed));
}

#[tokio::test]
async fn split_greeting_is_not_reassembled() {
    let mut connection = Chunked {
        data: GREETING,
        chunk_size: 30,
    };

    let error = receive_handshake(&mut connection, MAX_READ_SIZE)
        .await
        .expect_err("first chunk alone is too short");
    assert!(matches!(
        error,
        ProbeError::InvalidPacketReceived(DeserializeError::ShortBuffer)
    ));
}

#[tokio::test]
async fn read_buffer_smaller_than_greeting() {
    let mut connection = Cursor::new(GREETING);

    let error = receive_handshake(&mut connection, 16)
        .await
        .expect_err("greeting doesn't fit in 16 bytes");
    assert!(matches!(
        error,
        ProbeError::InvalidPacketReceived(DeserializeError::ShortBuffer)
    ));
}

#[tokio::test]
async fn access_denied() {
    let mut greeting = vec![0x48, 0x00, 0x00, 0x00, 0xff, 0x6a, 0x04];
    greeting.extend_from_slice(b"Host '172.17.0.1' is not allowed to connect to this MySQL server");
    greeting[0] = u8::try_from(greeting.len() - 4).expect("error packet is short");

    let error = receive_handshake(&mut Cursor::new(greeting), MAX_READ_SIZE)
        .await
        .expect_err("error packet isn't a handshake");

    assert!(error.is_access_denied());
    assert_eq!(
        error.to_string(),
        "invalid packet received from server: access denied by server: \
         Host '172.17.0.1' is not allowed to connect to this MySQL server"
    );
}
