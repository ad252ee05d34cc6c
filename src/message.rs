//! Payload layouts of the sensor messages. Each message only occupies the
//! front of the 8-byte payload; the rest is padding.

use core::convert::Infallible;

use generic_array::{typenum, GenericArray};

use crate::{
    buf::{i16_le, i32_le, u16_le},
    Message,
};

/// One attitude axis (roll, pitch or yaw) with its sample counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Attitude {
    /// Angle in units of 1/[`Attitude::SCALE`].
    pub angle: i32,
    pub counter: u16,
}

impl Attitude {
    pub const SCALE: f64 = 10_000.0;

    #[inline]
    #[must_use]
    pub fn value(&self) -> f64 {
        f64::from(self.angle) / Self::SCALE
    }
}

impl Message for Attitude {
    type EncodedLen = typenum::U6;

    type DecodeError = Infallible;

    fn decode(data: &GenericArray<u8, Self::EncodedLen>) -> Result<Self, Self::DecodeError> {
        Ok(Self {
            angle: i32_le(data[0], data[1], data[2], data[3]),
            counter: u16_le(data[4], data[5]),
        })
    }
}

/// Absolute pressure, unsigned, in units of 1/[`Pressure::SCALE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pressure {
    pub pressure: u16,
    pub counter: u16,
}

impl Pressure {
    pub const SCALE: f64 = 100.0;

    #[inline]
    #[must_use]
    pub fn value(&self) -> f64 {
        f64::from(self.pressure) / Self::SCALE
    }
}

impl Message for Pressure {
    type EncodedLen = typenum::U4;

    type DecodeError = Infallible;

    fn decode(data: &GenericArray<u8, Self::EncodedLen>) -> Result<Self, Self::DecodeError> {
        Ok(Self {
            pressure: u16_le(data[0], data[1]),
            counter: u16_le(data[2], data[3]),
        })
    }
}

/// Depth, signed (negative above the reference), in units of
/// 1/[`Depth::SCALE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Depth {
    pub depth: i16,
    pub counter: u16,
}

impl Depth {
    pub const SCALE: f64 = 100.0;

    #[inline]
    #[must_use]
    pub fn value(&self) -> f64 {
        f64::from(self.depth) / Self::SCALE
    }
}

impl Message for Depth {
    type EncodedLen = typenum::U4;

    type DecodeError = Infallible;

    fn decode(data: &GenericArray<u8, Self::EncodedLen>) -> Result<Self, Self::DecodeError> {
        Ok(Self {
            depth: i16_le(data[0], data[1]),
            counter: u16_le(data[2], data[3]),
        })
    }
}
