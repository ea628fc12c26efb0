use core::fmt;

use bitflags::bitflags;
use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::util::bitflags_display_impl;


/// Protocol version byte at the start of a handshake payload.
#[repr(u8)]
#[non_exhaustive]
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, TryFromPrimitive, IntoPrimitive)]
pub enum ProtocolVersion {
    /// Protocol version 9, used by servers older than 3.21.0. Recognized but not decoded.
    V9 = 9,

    /// Protocol version 10, used by every server since 3.21.0.
    V10 = 10,
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", u8::from(*self))
    }
}

/// Server status flags reported in the handshake.
///
/// Unknown bits are retained, so [`bits()`](StatusFlags::bits) always matches the wire value.
#[repr(transparent)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct StatusFlags(u16);

bitflags! {
    impl StatusFlags: u16 {
        /// A transaction is active.
        const IN_TRANS = 0x0001;

        /// Autocommit mode is enabled.
        const AUTOCOMMIT = 0x0002;

        /// More result sets follow.
        const MORE_RESULTS_EXISTS = 0x0008;

        /// The last query did not use a good index.
        const NO_GOOD_INDEX_USED = 0x0010;

        /// The last query did not use an index.
        const NO_INDEX_USED = 0x0020;

        /// A read-only cursor was opened.
        const CURSOR_EXISTS = 0x0040;

        /// The last row of a cursor was sent.
        const LAST_ROW_SENT = 0x0080;

        /// A database was dropped.
        const DB_DROPPED = 0x0100;

        /// Backslash escapes are disabled.
        const NO_BACKSLASH_ESCAPES = 0x0200;

        /// A prepared statement's metadata changed.
        const METADATA_CHANGED = 0x0400;

        /// The last query was logged as slow.
        const QUERY_WAS_SLOW = 0x0800;

        /// The result set contains output parameters.
        const PS_OUT_PARAMS = 0x1000;

        /// A read-only transaction is active.
        const IN_TRANS_READONLY = 0x2000;

        /// Session state changed; tracking information is included.
        const SESSION_STATE_CHANGED = 0x4000;
    }
}

bitflags_display_impl! { StatusFlags }
