//! Little-endian integer helpers. Every field on the bus is little-endian,
//! signed values are plain two's complement.

/// Assemble an unsigned 16-bit value from its two little-endian bytes.
#[inline]
#[must_use]
pub const fn u16_le(b0: u8, b1: u8) -> u16 {
    b0 as u16 | (b1 as u16) << 8
}

/// Same as [`u16_le`], reinterpreted as two's complement.
///
/// ```
/// # use imu_pressure_can::buf::i16_le;
/// assert_eq!(i16_le(0xe8, 0xfc), -792);
/// ```
#[inline]
#[must_use]
pub const fn i16_le(b0: u8, b1: u8) -> i16 {
    u16_le(b0, b1) as i16
}

#[inline]
#[must_use]
pub const fn u32_le(b0: u8, b1: u8, b2: u8, b3: u8) -> u32 {
    b0 as u32 | (b1 as u32) << 8 | (b2 as u32) << 16 | (b3 as u32) << 24
}

#[inline]
#[must_use]
pub const fn i32_le(b0: u8, b1: u8, b2: u8, b3: u8) -> i32 {
    u32_le(b0, b1, b2, b3) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsigned() {
        assert_eq!(u16_le(0x00, 0x00), 0);
        assert_eq!(u16_le(0x05, 0x00), 5);
        assert_eq!(u16_le(0x34, 0x12), 0x1234);
        assert_eq!(u16_le(0xff, 0xff), u16::MAX);
        assert_eq!(u32_le(0x40, 0x42, 0x01, 0x00), 82_496);
        assert_eq!(u32_le(0x40, 0x43, 0x01, 0x00), 82_752);
    }

    #[test]
    fn i16_boundaries() {
        assert_eq!(i16_le(0xff, 0xff), -1);
        assert_eq!(i16_le(0x00, 0x80), i16::MIN);
        assert_eq!(i16_le(0xff, 0x7f), i16::MAX);
        assert_eq!(i16_le(0x00, 0x00), 0);
    }

    #[test]
    fn i32_boundaries() {
        assert_eq!(i32_le(0xff, 0xff, 0xff, 0xff), -1);
        assert_eq!(i32_le(0x00, 0x00, 0x00, 0x80), i32::MIN);
        assert_eq!(i32_le(0xff, 0xff, 0xff, 0x7f), i32::MAX);

        for v in [i32::MIN, -82_496, -1, 0, 1, 82_496, i32::MAX] {
            let [b0, b1, b2, b3] = v.to_le_bytes();
            assert_eq!(i32_le(b0, b1, b2, b3), v);
        }
    }
}
