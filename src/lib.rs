//! Decoding of the attitude (roll/pitch/yaw) and pressure/depth CAN frames
//! sent by an IMU/pressure sensor board, accumulated into one snapshot of
//! the latest values. Like the bus it sits on, the crate uses no heap
//! allocation.
//!
//! The core is synchronous and transport-agnostic: feed [`RawFrame`]s into
//! [`Telemetry`] and publish whatever it hands back. With the `node` feature
//! (on by default), [`node::Node`] wires a non-blocking frame source, the
//! accumulator and an [`embassy_sync`] publisher into a periodic poll loop.
//!
//! ```
//! use imu_pressure_can::{RawFrame, Telemetry};
//!
//! let mut record = [0u8; 16];
//! record[..4].copy_from_slice(&0x300u32.to_le_bytes());
//! record[4] = 8;
//! record[8..].copy_from_slice(&[64, 66, 1, 0, 5, 0, 0, 0]);
//!
//! let mut telemetry = Telemetry::new();
//! let frame = RawFrame::from_record(&record).unwrap();
//! let snapshot = telemetry.apply_frame(&frame).unwrap();
//!
//! assert_eq!(snapshot.roll, 8.2496);
//! assert_eq!(snapshot.ctr_roll, 5);
//! ```

#![no_std]

pub mod buf;
pub mod channel;
mod frame;
mod id;
pub mod message;
#[cfg(feature = "node")]
pub mod node;
mod telemetry;

use generic_array::{ArrayLength, GenericArray};

pub use channel::{Channel, Update};
pub use frame::{RawFrame, MAX_DATA_LEN, PAYLOAD_LEN, RECORD_LEN};
pub use generic_array::typenum;
pub use id::{Id, EFF_FLAG, ERR_FLAG, ID_MASK, RTR_FLAG};
pub use telemetry::{Reject, Telemetry, TelemetrySnapshot};

/// A sensor message occupying the front of a frame payload.
pub trait Message {
    /// Number of payload bytes the message occupies.
    type EncodedLen: ArrayLength;

    /// The error type returned when a message fails to decode.
    type DecodeError;

    /// Decode a message from its encoded form.
    fn decode(data: &GenericArray<u8, Self::EncodedLen>) -> Result<Self, Self::DecodeError>
    where
        Self: Sized;
}
