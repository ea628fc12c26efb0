use mysql_handshake_protocol::HeaderInfo;

/// Largest single read performed while waiting for a handshake.
///
/// A handshake is expected to arrive whole in one read; this matches the header sanity bound.
pub const MAX_READ_SIZE: usize = HeaderInfo::MAX_PACKET_LENGTH as usize;

/// Settings for a [`Prober`](super::Prober).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ProbeOptions {
    pub(super) read_buffer_size: usize,
}

impl ProbeOptions {
    /// Size of the buffer the handshake is read into.
    pub fn read_buffer_size(&self) -> usize {
        self.read_buffer_size
    }
}

impl Default for ProbeOptions {
    fn default() -> Self {
        ProbeBuilder::new().build()
    }
}

/// Builder for [`ProbeOptions`] objects.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProbeBuilder {
    read_buffer_size: usize,
}

impl ProbeBuilder {
    /// Creates a new builder with default values for the various fields.
    pub fn new() -> Self {
        Self {
            read_buffer_size: MAX_READ_SIZE,
        }
    }

    /// Sets the size of the read buffer.
    ///
    /// The value is clamped between the packet header size and [`MAX_READ_SIZE`].
    pub fn read_buffer_size(&mut self, size: usize) -> &mut Self {
        self.read_buffer_size = size.clamp(HeaderInfo::HEADER_SIZE_BYTES, MAX_READ_SIZE);
        self
    }

    /// Turns this builder into a [`ProbeOptions`].
    pub fn build(&self) -> ProbeOptions {
        ProbeOptions {
            read_buffer_size: self.read_buffer_size,
        }
    }
}

impl Default for ProbeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
