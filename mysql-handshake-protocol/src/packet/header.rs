use byteorder::{ByteOrder, LittleEndian};
use getset::CopyGetters;

use crate::DeserializeError;

/// Information included in a MySQL packet header.
#[derive(PartialEq, Eq, Debug, Clone, Copy, CopyGetters)]
pub struct HeaderInfo {
    #[getset(get_copy = "pub")]
    /// Number of payload bytes following the header, not counting the header itself.
    length: u32,

    #[getset(get_copy = "pub")]
    /// The sequence number of the packet; the server's greeting is 0.
    sequence_id: u8,
}

impl HeaderInfo {
    /// Size of a full MySQL packet header.
    pub const HEADER_SIZE_BYTES: usize = 4;

    /// Declared payload lengths at or above this are rejected.
    ///
    /// This is a sanity bound on the single read a handshake is expected to fit in,
    /// well below the 16 MiB the protocol allows.
    pub const MAX_PACKET_LENGTH: u32 = 1024;

    /// Bundles a payload length and sequence id into a header.
    pub fn new(length: u32, sequence_id: u8) -> Self {
        Self {
            length,
            sequence_id,
        }
    }
}

impl TryFrom<&[u8]> for HeaderInfo {
    type Error = DeserializeError;

    fn try_from(buffer: &[u8]) -> Result<Self, Self::Error> {
        if buffer.len() >= Self::HEADER_SIZE_BYTES {
            // length is the first 3 bytes, widened with a zero high byte
            let length = LittleEndian::read_u24(&buffer[..3]);

            if length < Self::MAX_PACKET_LENGTH {
                Ok(Self {
                    length,
                    sequence_id: buffer[3],
                })
            } else {
                Err(DeserializeError::OversizedPacket(length))
            }
        } else {
            Err(DeserializeError::ShortBuffer)
        }
    }
}
