//! Tagged handle values.
//!
//! A handle packs three fields into a `u32`:
//!
//! ```text
//!  31        24 23        16 15                     0
//! +------------+------------+------------------------+
//! |    kind    | generation |       slot index       |
//! +------------+------------+------------------------+
//! ```
//!
//! The kind tag keeps a handle of one resource type from resolving in a
//! table of another; the generation keeps a freed handle from resolving to
//! a later occupant of the same slot.

use core::fmt;

const KIND_SHIFT: u32 = 24;
const GENERATION_SHIFT: u32 = 16;
const INDEX_MASK: u32 = 0xFFFF;

/// Largest slot index a handle can carry.
pub const MAX_INDEX: usize = INDEX_MASK as usize;

/// Resource kind carried in a handle's top byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum HandleKind {
    Undefined = 0,
    DigitalIo = 1,
    Port = 2,
    AnalogOutput = 5,
    AnalogInput = 6,
    Pwm = 9,
    Vendor = 17,
}

impl HandleKind {
    pub const fn from_tag(tag: u8) -> Self {
        match tag {
            1 => Self::DigitalIo,
            2 => Self::Port,
            5 => Self::AnalogOutput,
            6 => Self::AnalogInput,
            9 => Self::Pwm,
            17 => Self::Vendor,
            _ => Self::Undefined,
        }
    }

    pub const fn tag(self) -> u8 {
        self as u8
    }
}

/// Opaque, caller-held reference to a live table slot.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Handle(u32);

impl Handle {
    /// Sentinel returned on failure. Never equal to an allocated handle.
    pub const INVALID: Handle = Handle(0);

    /// Packs the three fields. `index` is truncated to 16 bits.
    pub const fn new(kind: HandleKind, generation: u8, index: usize) -> Self {
        Self(
            ((kind.tag() as u32) << KIND_SHIFT)
                | ((generation as u32) << GENERATION_SHIFT)
                | (index as u32 & INDEX_MASK),
        )
    }

    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(&self) -> u32 {
        self.0
    }

    pub const fn kind(&self) -> HandleKind {
        HandleKind::from_tag((self.0 >> KIND_SHIFT) as u8)
    }

    pub const fn generation(&self) -> u8 {
        (self.0 >> GENERATION_SHIFT) as u8
    }

    pub const fn index(&self) -> usize {
        (self.0 & INDEX_MASK) as usize
    }

    /// True if the handle carries a defined kind tag.
    ///
    /// This is a shape check only; whether the handle is live is up to the
    /// table that issued it.
    pub const fn is_valid(&self) -> bool {
        !matches!(self.kind(), HandleKind::Undefined)
    }
}

impl Default for Handle {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(
                f,
                "Handle({:?}#{} gen {})",
                self.kind(),
                self.index(),
                self.generation()
            )
        } else {
            write!(f, "Handle(invalid {:#010x})", self.0)
        }
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}
