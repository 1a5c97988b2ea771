//! Calling-convention flags attached to each native call.
//!
//! Only one bit has an observed meaning in generated tables. Every other bit is
//! carried through unchanged so runtimes that define more of them keep working;
//! the registry itself never interprets flags.

use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CallFlags: u8 {
        /// The native side takes the alternate convention: raw handles and an
        /// error out-parameter instead of plain marshaled values.
        const ALT_CONVENTION = 1 << 2;

        // Bits owned by the consuming runtime.
        const _ = !0;
    }
}

impl CallFlags {
    pub const fn from_raw(raw: u8) -> Self {
        Self::from_bits_retain(raw)
    }

    pub const fn raw(self) -> u8 {
        self.bits()
    }
}

/// True when every bit of `flag` is set in `flags`.
pub fn flag_set(flags: CallFlags, flag: CallFlags) -> bool {
    flags.contains(flag)
}
