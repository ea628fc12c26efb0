use getset::Getters;

use crate::{Deserialize, DeserializeError};

mod header;
pub use header::HeaderInfo;


/// A full MySQL protocol packet: header plus decoded payload.
#[derive(Getters, PartialEq, Eq, Debug, Clone)]
pub struct Packet<B> {
    /// Gets the header of the packet.
    #[getset(get = "pub")]
    header: HeaderInfo,

    /// Gets the body of the packet.
    #[getset(get = "pub")]
    body: B,
}

impl<B> Packet<B> {
    /// Location of the start of the packet body, after the header.
    const BODY_START: usize = HeaderInfo::HEADER_SIZE_BYTES;

    /// Assembles a header and body into a full packet.
    pub fn new(header: HeaderInfo, body: B) -> Self {
        Self { header, body }
    }

    /// Splits the packet into its header and body.
    pub fn into_parts(self) -> (HeaderInfo, B) {
        (self.header, self.body)
    }
}

impl<'raw, B: Deserialize<'raw>> Packet<B> {
    /// Parses the header at the start of `buffer`, then decodes exactly the payload it declares.
    ///
    /// Bytes past the end of the declared payload are ignored.
    pub fn deserialize(buffer: &'raw [u8]) -> Result<Self, DeserializeError> {
        let header = HeaderInfo::try_from(buffer)?;

        // header length is bounded by MAX_PACKET_LENGTH, so this can't overflow
        let body_end = Self::BODY_START + header.length() as usize;
        let body_buffer = buffer
            .get(Self::BODY_START..body_end)
            .ok_or(DeserializeError::ShortBuffer)?;

        let body = B::deserialize_from_buffer(body_buffer)?;
        Ok(Self::new(header, body))
    }
}
