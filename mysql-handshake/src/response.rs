use std::fmt;

use mysql_handshake_protocol::{HandshakeOwned, HeaderInfo, Packet};

/// What a server revealed about itself in its initial handshake.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Fingerprint {
    /// Header of the handshake packet.
    pub header: HeaderInfo,

    /// The decoded handshake.
    pub handshake: HandshakeOwned,
}

impl From<Packet<HandshakeOwned>> for Fingerprint {
    fn from(packet: Packet<HandshakeOwned>) -> Self {
        let (header, handshake) = packet.into_parts();
        Self { header, handshake }
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let handshake = &self.handshake;

        writeln!(f, "Protocol version: {}", handshake.protocol_version)?;
        writeln!(f, "Server version: {}", handshake.server_version_lossy())?;
        writeln!(f, "Connection ID: {}", handshake.connection_id)?;
        writeln!(
            f,
            "Auth Plugin Data Len: {}",
            handshake.auth_plugin_data_length.unwrap_or_default()
        )?;
        writeln!(
            f,
            "Authentication plugin name: {}",
            handshake.auth_plugin_name_lossy()
        )?;
        writeln!(f, "Status flags: {}", handshake.status_flags.bits())?;
        writeln!(f, "Capability flag: {}", handshake.capability_flags.bits())?;
        write!(f, "Character set: {}", handshake.character_set)
    }
}
