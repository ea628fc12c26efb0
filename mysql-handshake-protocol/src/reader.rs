//! Bounds-checked cursor over a packet payload.

use byteorder::{ByteOrder, LittleEndian};

use crate::DeserializeError;

/// Forward-only cursor; every read checks the remaining length first and fails with
/// [`DeserializeError::ShortBuffer`] rather than reading past the end.
pub(crate) struct Reader<'raw> {
    buffer: &'raw [u8],
    position: usize,
}

impl<'raw> Reader<'raw> {
    pub(crate) fn new(buffer: &'raw [u8]) -> Self {
        Self {
            buffer,
            position: 0,
        }
    }

    /// The bytes not yet consumed.
    pub(crate) fn remaining(&self) -> &'raw [u8] {
        &self.buffer[self.position..]
    }

    pub(crate) fn take(&mut self, length: usize) -> Result<&'raw [u8], DeserializeError> {
        let remaining = self.remaining();

        if remaining.len() >= length {
            self.position += length;
            Ok(&remaining[..length])
        } else {
            Err(DeserializeError::ShortBuffer)
        }
    }

    pub(crate) fn skip(&mut self, length: usize) -> Result<(), DeserializeError> {
        self.take(length).map(|_| ())
    }

    pub(crate) fn read_u8(&mut self) -> Result<u8, DeserializeError> {
        self.take(1).map(|bytes| bytes[0])
    }

    pub(crate) fn read_u16_le(&mut self) -> Result<u16, DeserializeError> {
        self.take(2).map(LittleEndian::read_u16)
    }

    pub(crate) fn read_u32_le(&mut self) -> Result<u32, DeserializeError> {
        self.take(4).map(LittleEndian::read_u32)
    }

    /// Reads up to the next NUL byte, consuming the NUL but leaving it out of the result.
    pub(crate) fn read_nul_terminated(&mut self) -> Result<&'raw [u8], DeserializeError> {
        let remaining = self.remaining();
        let nul = remaining
            .iter()
            .position(|&byte| byte == 0)
            .ok_or(DeserializeError::ShortBuffer)?;

        self.position += nul + 1;
        Ok(&remaining[..nul])
    }

    /// Like [`read_nul_terminated`](Self::read_nul_terminated), but takes everything left
    /// if there is no NUL. The flag reports whether a terminator was found.
    pub(crate) fn read_nul_terminated_or_rest(&mut self) -> (&'raw [u8], bool) {
        match self.read_nul_terminated() {
            Ok(field) => (field, true),
            Err(_) => {
                let rest = self.remaining();
                self.position = self.buffer.len();
                (rest, false)
            }
        }
    }
}
