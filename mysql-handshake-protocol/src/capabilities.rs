use alloc::string::String;
use core::fmt::Write;

use bitflags::{bitflags, Flags};

use crate::util::bitflags_display_impl;


/// Protocol features advertised by the server in its handshake.
///
/// See the [capability flags] reference. Unknown bits are retained as-is, so
/// [`bits()`](CapabilityFlags::bits) always equals the value read off the wire.
///
/// [capability flags]: https://dev.mysql.com/doc/dev/mysql-server/latest/group__group__cs__capabilities__flags.html
#[repr(transparent)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct CapabilityFlags(u32);

bitflags! {
    impl CapabilityFlags: u32 {
        /// Use the improved version of old password authentication.
        const LONG_PASSWORD = 1 << 0;

        /// Send found rows instead of affected rows in the EOF packet.
        const FOUND_ROWS = 1 << 1;

        /// Longer flags in column definitions.
        const LONG_FLAG = 1 << 2;

        /// A database name can be specified on connect.
        const CONNECT_WITH_DB = 1 << 3;

        /// Disallow `database.table.column`.
        const NO_SCHEMA = 1 << 4;

        /// Compression protocol supported.
        const COMPRESS = 1 << 5;

        /// Special handling of ODBC behavior.
        const ODBC = 1 << 6;

        /// `LOAD DATA LOCAL` is permitted.
        const LOCAL_FILES = 1 << 7;

        /// The parser can ignore spaces before '('.
        const IGNORE_SPACE = 1 << 8;

        /// New 4.1 protocol.
        const PROTOCOL_41 = 1 << 9;

        /// Interactive client timeout semantics.
        const INTERACTIVE = 1 << 10;

        /// TLS can be negotiated after the handshake.
        const SSL = 1 << 11;

        /// Do not issue SIGPIPE on network failures (client only).
        const IGNORE_SIGPIPE = 1 << 12;

        /// Transaction status is reported in EOF packets.
        const TRANSACTIONS = 1 << 13;

        /// Unused; formerly the 4.1 protocol flag.
        const RESERVED = 1 << 14;

        /// Native 4.1 authentication, with a second part of auth plugin data.
        const SECURE_CONNECTION = 1 << 15;

        /// Multiple statements per query.
        const MULTI_STATEMENTS = 1 << 16;

        /// Multiple result sets per query.
        const MULTI_RESULTS = 1 << 17;

        /// Multiple result sets for prepared statements.
        const PS_MULTI_RESULTS = 1 << 18;

        /// Pluggable authentication; the handshake carries an auth plugin data length and name.
        const PLUGIN_AUTH = 1 << 19;

        /// Connection attributes are accepted.
        const CONNECT_ATTRS = 1 << 20;

        /// Length-encoded auth response data.
        const PLUGIN_AUTH_LENENC_CLIENT_DATA = 1 << 21;

        /// Accounts with expired passwords can connect in sandbox mode.
        const CAN_HANDLE_EXPIRED_PASSWORDS = 1 << 22;

        /// Session state changes are reported in OK packets.
        const SESSION_TRACK = 1 << 23;

        /// OK packets replace EOF packets.
        const DEPRECATE_EOF = 1 << 24;
    }
}

bitflags_display_impl! { CapabilityFlags }

impl CapabilityFlags {
    /// Reassembles the flags from the two 16-bit halves the handshake carries at separate offsets.
    pub fn from_halves(lower: u16, upper: u16) -> Self {
        Self::from_bits_retain(u32::from(lower) | (u32::from(upper) << 16))
    }

    /// Returns true if any bit of `flag` is set.
    pub fn has(&self, flag: Self) -> bool {
        self.bits() & flag.bits() != 0
    }

    /// Looks up the name of a single-bit flag.
    pub fn name_of(bit: u32) -> Option<&'static str> {
        Self::FLAGS
            .iter()
            .find(|flag| flag.value().bits() == bit)
            .map(|flag| flag.name())
    }

    /// Renders one line per named bit that is set, lowest bit first, as
    /// `0x00080000 - 00000000000010000000000000000000 - PLUGIN_AUTH`.
    ///
    /// Set bits without a name are left out.
    pub fn describe(&self) -> String {
        let mut lines = String::new();

        for bit in (0..u32::BITS).map(|shift| 1u32 << shift) {
            if self.bits() & bit == 0 {
                continue;
            }

            if let Some(name) = Self::name_of(bit) {
                if !lines.is_empty() {
                    lines.push('\n');
                }

                // writing to a String can't fail
                let _ = write!(lines, "{bit:#010x} - {bit:032b} - {name}");
            }
        }

        lines
    }
}
