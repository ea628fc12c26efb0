//! Classification of payloads that don't start with protocol version 10.
//!
//! A server that refuses a client outright answers the connection with an ERR packet
//! instead of a handshake, so the first byte is `0xff` rather than a version number.

use alloc::string::String;

use crate::DeserializeError;

/// Text MySQL servers send when the client host isn't permitted. Not localized by the server.
const ACCESS_DENIED_TEXT: &str = "is not allowed to connect to this MySQL server";

/// First byte of an ERR packet payload.
const ERR_PACKET_MARKER: u8 = 0xff;

/// Marks the presence of a 5-byte SQL state after the error code.
const SQL_STATE_MARKER: u8 = b'#';

/// Marker byte + error code.
const ERR_MESSAGE_OFFSET: usize = 3;

/// Marker byte + error code + SQL state marker + SQL state.
const ERR_MESSAGE_WITH_STATE_OFFSET: usize = 9;

/// Turns a payload whose first byte is `protocol_version` (not 10) into the error to report.
pub(crate) fn classify(protocol_version: u8, payload: &[u8]) -> DeserializeError {
    let message = String::from_utf8_lossy(message_bytes(payload));

    if message.contains(ACCESS_DENIED_TEXT) {
        DeserializeError::AccessDenied(message.into_owned())
    } else {
        DeserializeError::UnsupportedProtocolVersion(protocol_version)
    }
}

/// Finds the human-readable part of a non-handshake payload, without looking past its end.
fn message_bytes(payload: &[u8]) -> &[u8] {
    let start = match payload {
        [ERR_PACKET_MARKER, _, _, SQL_STATE_MARKER, ..]
            if payload.len() >= ERR_MESSAGE_WITH_STATE_OFFSET =>
        {
            ERR_MESSAGE_WITH_STATE_OFFSET
        }
        [ERR_PACKET_MARKER, _, _, ..] => ERR_MESSAGE_OFFSET,
        _ => payload
            .iter()
            .position(|&byte| byte == 0)
            .map_or(1, |nul| nul + 1),
    };

    let message = payload.get(start..).unwrap_or_default();

    // trailing NULs are padding, not text
    let end = message
        .iter()
        .rposition(|&byte| byte != 0)
        .map_or(0, |last| last + 1);

    &message[..end]
}
