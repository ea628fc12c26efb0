//! # mysql-handshake-protocol
//!
//! Decoding of the initial handshake packet (protocol version 10) that a MySQL-protocol
//! server sends as soon as a client connects.
//!
//! The decoder is a pure function of its input buffer: it performs no I/O and no logging,
//! and either returns a complete record or the first error it ran into.
//!
//! # Examples
//!
//! ```
//! use mysql_handshake_protocol::{CapabilityFlags, Handshake, Packet};
//!
//! let raw: &[u8] = &[
//!     // header: 38 byte payload, sequence id 0
//!     38, 0, 0, 0,
//!     // protocol version 10, server version "5.5.8"
//!     0x0a, b'5', b'.', b'5', b'.', b'8', 0,
//!     // connection id
//!     7, 0, 0, 0,
//!     // auth plugin data part 1
//!     1, 2, 3, 4, 5, 6, 7, 8,
//!     // filler
//!     0,
//!     // capability flags (lower half): PROTOCOL_41
//!     0x00, 0x02,
//!     // character set, status flags
//!     8, 2, 0,
//!     // capability flags (upper half)
//!     0, 0,
//!     // auth plugin data length (unused without PLUGIN_AUTH) and reserved bytes
//!     0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
//! ];
//!
//! let packet = Packet::<Handshake>::deserialize(raw).expect("handshake should decode");
//! let handshake = packet.body();
//!
//! assert_eq!(handshake.server_version(), b"5.5.8");
//! assert_eq!(handshake.connection_id(), 7);
//! assert!(handshake.capability_flags().has(CapabilityFlags::PROTOCOL_41));
//! assert!(handshake.auth_plugin_name().is_empty());
//! ```

#![no_std]
#![cfg_attr(feature = "docsrs", feature(doc_auto_cfg))]
#![warn(missing_docs)]
#![warn(clippy::cast_lossless)]
#![warn(clippy::cast_possible_truncation)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

use alloc::string::String;
use core::fmt;

mod capabilities;
pub use capabilities::CapabilityFlags;

mod fields;
pub use fields::{ProtocolVersion, StatusFlags};

mod handshake;
pub use handshake::{Handshake, HandshakeOwned};

mod owned;
pub use owned::FromBorrowedBody;

mod packet;
pub use packet::{HeaderInfo, Packet};

mod reader;
mod rejection;
mod util;

/// An error that occurred during deserialization of a full/partial packet.
#[non_exhaustive]
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum DeserializeError {
    /// Fewer bytes were available than the next field requires.
    ShortBuffer,

    /// The length declared in the packet header was at or above [`HeaderInfo::MAX_PACKET_LENGTH`].
    OversizedPacket(u32),

    /// The filler byte after the first part of the auth plugin data was not zero.
    InvalidFiller(u8),

    /// The server advertised `PLUGIN_AUTH` but declared a zero-length auth plugin data.
    InvalidAuthPluginDataLength,

    /// The server refused the connection; contains the message it sent.
    AccessDenied(String),

    /// The first payload byte was not a supported protocol version.
    UnsupportedProtocolVersion(u8),
}

impl fmt::Display for DeserializeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShortBuffer => write!(f, "unexpected end of buffer when deserializing packet"),
            Self::OversizedPacket(length) => write!(
                f,
                "header sanity check failed: declared length {length} is not below {}",
                HeaderInfo::MAX_PACKET_LENGTH
            ),
            Self::InvalidFiller(byte) => write!(f, "invalid filler byte: {byte:#04x}"),
            Self::InvalidAuthPluginDataLength => {
                write!(f, "auth plugin data length was zero despite PLUGIN_AUTH")
            }
            Self::AccessDenied(message) => write!(f, "access denied by server: {message}"),
            Self::UnsupportedProtocolVersion(9) => {
                write!(f, "protocol version 9 is not supported")
            }
            Self::UnsupportedProtocolVersion(version) => write!(
                f,
                "only protocol version 10 is supported, got unknown version {version}"
            ),
        }
    }
}

// Error trait is only available on std (on stable; stabilized in core in 1.81) so this has to be std-gated
#[cfg(feature = "std")]
mod error_impls {
    use std::error::Error;

    use super::DeserializeError;

    impl Error for DeserializeError {}
}

// suggestion from Rust API guidelines: https://rust-lang.github.io/api-guidelines/future-proofing.html#sealed-traits-protect-against-downstream-implementations-c-sealed
// seals the Deserialize trait
mod sealed {
    use super::{Handshake, HandshakeOwned};

    pub trait Sealed {}

    impl Sealed for Handshake<'_> {}
    impl Sealed for HandshakeOwned {}
}

/// Something that can be decoded from a packet payload.
///
/// This trait is sealed per the [Rust API guidelines], so it cannot be implemented by external types.
///
/// [Rust API guidelines]: https://rust-lang.github.io/api-guidelines/future-proofing.html#sealed-traits-protect-against-downstream-implementations-c-sealed
pub trait Deserialize<'raw>: sealed::Sealed + Sized {
    /// Decodes a packet body from a buffer holding exactly the payload declared in the header.
    fn deserialize_from_buffer(buffer: &'raw [u8]) -> Result<Self, DeserializeError>;
}
