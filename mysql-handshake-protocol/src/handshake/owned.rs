use alloc::borrow::{Cow, ToOwned};
use alloc::string::String;
use alloc::vec::Vec;

use super::Handshake;
use crate::owned::FromBorrowedBody;
use crate::{CapabilityFlags, ProtocolVersion, StatusFlags};

/// A handshake with owned fields, and the auth plugin data joined into a single buffer.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct HandshakeOwned {
    /// The protocol version; always [`ProtocolVersion::V10`].
    pub protocol_version: ProtocolVersion,

    /// The server version string, without its NUL terminator.
    pub server_version: Vec<u8>,

    /// The connection (thread) id the server assigned.
    pub connection_id: u32,

    /// Both parts of the auth plugin data, concatenated.
    pub auth_plugin_data: Vec<u8>,

    /// The filler byte, which is always 0.
    pub filler: u8,

    /// Capability flags reassembled from both halves.
    pub capability_flags: CapabilityFlags,

    /// The server's default character set (collation id).
    pub character_set: u8,

    /// Server status flags.
    pub status_flags: StatusFlags,

    /// The declared total length of the auth plugin data, present only with `PLUGIN_AUTH`.
    pub auth_plugin_data_length: Option<u8>,

    /// The auth plugin name, without its NUL terminator.
    pub auth_plugin_name: Vec<u8>,

    /// Whether the auth plugin name was NUL-terminated on the wire.
    pub auth_plugin_name_terminated: bool,
}

impl HandshakeOwned {
    /// The server version as text, with invalid UTF-8 replaced.
    pub fn server_version_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.server_version)
    }

    /// The auth plugin name as text, with invalid UTF-8 replaced.
    pub fn auth_plugin_name_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.auth_plugin_name)
    }
}

impl FromBorrowedBody for HandshakeOwned {
    type Borrowed<'b> = Handshake<'b>;

    fn from_borrowed(borrowed: &Self::Borrowed<'_>) -> Self {
        HandshakeOwned {
            protocol_version: borrowed.protocol_version,
            server_version: borrowed.server_version.to_owned(),
            connection_id: borrowed.connection_id,
            auth_plugin_data: borrowed.auth_plugin_data().collect(),
            filler: borrowed.filler,
            capability_flags: borrowed.capability_flags,
            character_set: borrowed.character_set,
            status_flags: borrowed.status_flags,
            auth_plugin_data_length: borrowed.auth_plugin_data_length,
            auth_plugin_name: borrowed.auth_plugin_name.to_owned(),
            auth_plugin_name_terminated: borrowed.auth_plugin_name_terminated,
        }
    }
}
