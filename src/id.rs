use embedded_can::ExtendedId;

/// Mask selecting the arbitration bits of a raw identifier word. The three
/// bits above it are transport flags.
pub const ID_MASK: u32 = 0x1fff_ffff;

/// Extended frame format flag in a raw identifier word.
pub const EFF_FLAG: u32 = 0x8000_0000;

/// Remote transmission request flag in a raw identifier word.
pub const RTR_FLAG: u32 = 0x4000_0000;

/// Error frame flag in a raw identifier word.
pub const ERR_FLAG: u32 = 0x2000_0000;

/// A 29-bit CAN identifier with the transport flag bits stripped.
///
/// Standard 11-bit identifiers are carried as their numeric value, so a
/// frame with standard id `0x300` and one with extended id `0x300` compare
/// equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Id(ExtendedId);

impl Id {
    /// Create an identifier from a raw identifier word, masking off the top
    /// three flag bits.
    #[inline]
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        // SAFETY: the mask leaves at most 29 bits set.
        Self(unsafe { ExtendedId::new_unchecked(raw & ID_MASK) })
    }

    #[inline]
    #[must_use]
    pub const fn from_can_id(can_id: ExtendedId) -> Self {
        Self(can_id)
    }

    #[inline]
    #[must_use]
    pub const fn as_can_id(self) -> ExtendedId {
        self.0
    }

    #[inline]
    #[must_use]
    pub fn as_raw(self) -> u32 {
        self.0.as_raw()
    }
}

impl From<ExtendedId> for Id {
    fn from(id: ExtendedId) -> Self {
        Self::from_can_id(id)
    }
}

impl From<embedded_can::Id> for Id {
    fn from(id: embedded_can::Id) -> Self {
        match id {
            embedded_can::Id::Standard(id) => Self::from_raw(id.as_raw() as u32),
            embedded_can::Id::Extended(id) => Self::from_can_id(id),
        }
    }
}

impl From<Id> for embedded_can::Id {
    fn from(id: Id) -> Self {
        Self::Extended(id.as_can_id())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Id {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "Id({:x})", self.0.as_raw())
    }
}
