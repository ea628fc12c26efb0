//! The initial handshake packet, protocol version 10.
//!
//! Payload layout, in order:
//!
//! ```text
//! 1      protocol version (0x0a)
//! n      server version, NUL-terminated
//! 4      connection id
//! 8      auth plugin data, part 1
//! 1      filler (0x00)
//! 2      capability flags, lower half
//! 1      character set
//! 2      status flags
//! 2      capability flags, upper half
//! 1      auth plugin data length (PLUGIN_AUTH) or reserved
//! 10     reserved
//! n      auth plugin data, part 2 (SECURE_CONNECTION), max(13, length - 8) bytes
//! n      auth plugin name, NUL-terminated or running to the end of the payload
//! ```

use getset::CopyGetters;

use crate::reader::Reader;
use crate::rejection;
use crate::{CapabilityFlags, Deserialize, DeserializeError, ProtocolVersion, StatusFlags};

mod owned;
pub use owned::HandshakeOwned;


/// A decoded handshake that borrows its variable-length fields from the payload.
#[derive(PartialEq, Eq, Debug, Clone, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct Handshake<'packet> {
    /// The protocol version; always [`ProtocolVersion::V10`] for a decoded handshake.
    protocol_version: ProtocolVersion,

    /// The server version string, without its NUL terminator.
    server_version: &'packet [u8],

    /// The connection (thread) id the server assigned.
    connection_id: u32,

    /// The first 8 bytes of the auth plugin data.
    auth_plugin_data_part_1: &'packet [u8],

    /// The filler byte, which is always 0.
    filler: u8,

    /// Capability flags reassembled from both halves.
    capability_flags: CapabilityFlags,

    /// The server's default character set (collation id).
    character_set: u8,

    /// Server status flags.
    status_flags: StatusFlags,

    /// The declared total length of the auth plugin data, present only with `PLUGIN_AUTH`.
    auth_plugin_data_length: Option<u8>,

    /// The rest of the auth plugin data, present only with `SECURE_CONNECTION`.
    auth_plugin_data_part_2: Option<&'packet [u8]>,

    /// The auth plugin name, without its NUL terminator.
    auth_plugin_name: &'packet [u8],

    /// Whether the auth plugin name was NUL-terminated.
    ///
    /// Servers before 5.5.10 and 5.6.2 leave the terminator off (MySQL bug #59453),
    /// in which case the name runs to the end of the payload.
    auth_plugin_name_terminated: bool,
}

impl<'packet> Handshake<'packet> {
    /// Number of bytes in the first part of the auth plugin data.
    const AUTH_PLUGIN_DATA_PART_1_LENGTH: usize = 8;

    /// Minimum number of bytes in the second part of the auth plugin data.
    const AUTH_PLUGIN_DATA_PART_2_MIN_LENGTH: usize = 13;

    /// Number of zero bytes reserved after the auth plugin data length.
    const RESERVED_LENGTH: usize = 10;

    /// Iterates over the full auth plugin data, i.e. both parts joined together.
    pub fn auth_plugin_data(&self) -> impl Iterator<Item = u8> + 'packet {
        self.auth_plugin_data_part_1
            .iter()
            .chain(self.auth_plugin_data_part_2.unwrap_or_default())
            .copied()
    }

    /// Length of the second auth plugin data part for a declared total length.
    fn auth_plugin_data_part_2_length(declared_length: u8) -> usize {
        usize::from(declared_length)
            .saturating_sub(Self::AUTH_PLUGIN_DATA_PART_1_LENGTH)
            .max(Self::AUTH_PLUGIN_DATA_PART_2_MIN_LENGTH)
    }
}

// Hide from docs, as this is meant for internal use only
#[doc(hidden)]
impl<'raw> Deserialize<'raw> for Handshake<'raw> {
    fn deserialize_from_buffer(buffer: &'raw [u8]) -> Result<Self, DeserializeError> {
        // buffer is sliced to length reported in packet header in Packet::deserialize(), so
        // no read below can go past the declared payload
        let mut reader = Reader::new(buffer);

        let version_byte = reader.read_u8()?;
        let protocol_version = match ProtocolVersion::try_from(version_byte) {
            Ok(ProtocolVersion::V10) => ProtocolVersion::V10,
            _ => return Err(rejection::classify(version_byte, buffer)),
        };

        let server_version = reader.read_nul_terminated()?;
        let connection_id = reader.read_u32_le()?;
        let auth_plugin_data_part_1 = reader.take(Self::AUTH_PLUGIN_DATA_PART_1_LENGTH)?;

        let filler = reader.read_u8()?;
        if filler != 0 {
            return Err(DeserializeError::InvalidFiller(filler));
        }

        // the two capability halves aren't adjacent; character set & status flags sit between them
        let capabilities_lower = reader.read_u16_le()?;
        let character_set = reader.read_u8()?;
        let status_flags = StatusFlags::from_bits_retain(reader.read_u16_le()?);
        let capabilities_upper = reader.read_u16_le()?;
        let capability_flags = CapabilityFlags::from_halves(capabilities_lower, capabilities_upper);

        // this byte is reserved unless PLUGIN_AUTH is set
        let length_byte = reader.read_u8()?;
        let auth_plugin_data_length = if capability_flags.has(CapabilityFlags::PLUGIN_AUTH) {
            if length_byte == 0 {
                return Err(DeserializeError::InvalidAuthPluginDataLength);
            }
            Some(length_byte)
        } else {
            None
        };

        reader.skip(Self::RESERVED_LENGTH)?;

        let auth_plugin_data_part_2 = if capability_flags.has(CapabilityFlags::SECURE_CONNECTION) {
            let length =
                Self::auth_plugin_data_part_2_length(auth_plugin_data_length.unwrap_or_default());
            Some(reader.take(length)?)
        } else {
            None
        };

        let (auth_plugin_name, auth_plugin_name_terminated) =
            reader.read_nul_terminated_or_rest();

        Ok(Self {
            protocol_version,
            server_version,
            connection_id,
            auth_plugin_data_part_1,
            filler,
            capability_flags,
            character_set,
            status_flags,
            auth_plugin_data_length,
            auth_plugin_data_part_2,
            auth_plugin_name,
            auth_plugin_name_terminated,
        })
    }
}
