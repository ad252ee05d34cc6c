//! The fixed identifier table. Every recognized identifier owns one message
//! type and a fixed set of snapshot fields.

use core::convert::Infallible;

use generic_array::{
    typenum::{IsLessOrEqual, True, Unsigned, U8},
    GenericArray,
};

use crate::{
    frame::PAYLOAD_LEN,
    message::{Attitude, Depth, Pressure},
    Id, Message,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u32)]
pub enum Channel {
    Roll = 0x300,
    Pitch = 0x301,
    Yaw = 0x302,
    Pressure = 0x303,
    Depth = 0x304,
}

impl Channel {
    pub const ALL: [Self; 5] = [
        Self::Roll,
        Self::Pitch,
        Self::Yaw,
        Self::Pressure,
        Self::Depth,
    ];

    #[inline]
    #[must_use]
    pub const fn id(self) -> Id {
        Id::from_raw(self as u32)
    }

    #[inline]
    #[must_use]
    pub fn from_id(id: Id) -> Option<Self> {
        match id.as_raw() {
            0x300 => Some(Self::Roll),
            0x301 => Some(Self::Pitch),
            0x302 => Some(Self::Yaw),
            0x303 => Some(Self::Pressure),
            0x304 => Some(Self::Depth),
            _ => None,
        }
    }

    /// Decode a validated payload as this channel's message.
    #[must_use]
    pub fn decode(self, payload: &[u8; PAYLOAD_LEN]) -> Update {
        match self {
            Self::Roll => Update::Roll(decode_prefix(payload)),
            Self::Pitch => Update::Pitch(decode_prefix(payload)),
            Self::Yaw => Update::Yaw(decode_prefix(payload)),
            Self::Pressure => Update::Pressure(decode_prefix(payload)),
            Self::Depth => Update::Depth(decode_prefix(payload)),
        }
    }
}

/// A decoded message, tagged with the channel it arrived on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Update {
    Roll(Attitude),
    Pitch(Attitude),
    Yaw(Attitude),
    Pressure(Pressure),
    Depth(Depth),
}

impl Update {
    #[must_use]
    pub const fn channel(&self) -> Channel {
        match self {
            Self::Roll(_) => Channel::Roll,
            Self::Pitch(_) => Channel::Pitch,
            Self::Yaw(_) => Channel::Yaw,
            Self::Pressure(_) => Channel::Pressure,
            Self::Depth(_) => Channel::Depth,
        }
    }
}

/// Decode `T` from the front of the payload. The typenum bound rules out
/// messages that would not fit.
fn decode_prefix<T>(payload: &[u8; PAYLOAD_LEN]) -> T
where
    T: Message<DecodeError = Infallible>,
    T::EncodedLen: IsLessOrEqual<U8, Output = True>,
{
    let data = GenericArray::<u8, T::EncodedLen>::from_slice(&payload[..T::EncodedLen::USIZE]);

    match T::decode(data) {
        Ok(msg) => msg,
        Err(never) => match never {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table() {
        for channel in Channel::ALL {
            assert_eq!(Channel::from_id(channel.id()), Some(channel));
        }

        assert_eq!(Channel::Roll.id(), Id::from_raw(0x300));
        assert_eq!(Channel::Depth.id(), Id::from_raw(0x304));
        assert_eq!(Channel::from_id(Id::from_raw(0x2ff)), None);
        assert_eq!(Channel::from_id(Id::from_raw(0x305)), None);
        assert_eq!(Channel::from_id(Id::from_raw(0x999)), None);
    }

    #[test]
    fn decode_attitude() {
        let update = Channel::Pitch.decode(&[64, 66, 1, 0, 5, 0, 0xaa, 0xbb]);

        assert_eq!(
            update,
            Update::Pitch(Attitude {
                angle: 82_496,
                counter: 5
            })
        );
    }

    #[test]
    fn decode_negative_attitude() {
        let update = Channel::Yaw.decode(&[0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0, 0]);

        assert_eq!(
            update,
            Update::Yaw(Attitude {
                angle: -1,
                counter: u16::MAX
            })
        );
    }

    #[test]
    fn decode_pressure_and_depth() {
        assert_eq!(
            Channel::Pressure.decode(&[0xe8, 0xfc, 3, 0, 9, 9, 9, 9]),
            Update::Pressure(Pressure {
                pressure: 0xfce8,
                counter: 3
            })
        );
        assert_eq!(
            Channel::Depth.decode(&[0xe8, 0xfc, 3, 0, 9, 9, 9, 9]),
            Update::Depth(Depth {
                depth: -792,
                counter: 3
            })
        );
    }
}
