use crate::{
    channel::{Channel, Update},
    frame::PAYLOAD_LEN,
    Id, RawFrame,
};

/// The last known value of every field. Fields are updated independently,
/// so values from different channels may be of different age.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TelemetrySnapshot {
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
    pub ctr_roll: u16,
    pub ctr_pitch: u16,
    pub ctr_yaw: u16,
    pub pressure: f64,
    pub depth: f64,
    pub ctr_pressure: u16,
    pub ctr_depth: u16,
}

impl TelemetrySnapshot {
    /// Write the fields owned by the update's channel, leaving all others as
    /// they are.
    pub fn update(&mut self, update: Update) {
        match update {
            Update::Roll(msg) => {
                self.roll = msg.value();
                self.ctr_roll = msg.counter;
            }
            Update::Pitch(msg) => {
                self.pitch = msg.value();
                self.ctr_pitch = msg.counter;
            }
            Update::Yaw(msg) => {
                self.yaw = msg.value();
                self.ctr_yaw = msg.counter;
            }
            Update::Pressure(msg) => {
                self.pressure = msg.value();
                self.ctr_pressure = msg.counter;
            }
            Update::Depth(msg) => {
                self.depth = msg.value();
                self.ctr_depth = msg.counter;
            }
        }
    }
}

/// Why a frame did not change the snapshot. Callers are expected to drop
/// these; they exist for tracing only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reject {
    /// Declared length other than [`PAYLOAD_LEN`].
    Length(u8),
    UnknownId(Id),
}

/// Accumulates decoded frames into a single [`TelemetrySnapshot`].
///
/// Every accepted frame yields the full snapshot, which is what should be
/// published. Rejected frames yield nothing and leave the snapshot alone.
#[derive(Debug, Default)]
pub struct Telemetry {
    latest: TelemetrySnapshot,
}

impl Telemetry {
    /// A zeroed snapshot. Nothing is published until the first recognized
    /// frame arrives.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            latest: TelemetrySnapshot {
                roll: 0.0,
                pitch: 0.0,
                yaw: 0.0,
                ctr_roll: 0,
                ctr_pitch: 0,
                ctr_yaw: 0,
                pressure: 0.0,
                depth: 0.0,
                ctr_pressure: 0,
                ctr_depth: 0,
            },
        }
    }

    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> &TelemetrySnapshot {
        &self.latest
    }

    /// Apply an already validated payload. Returns the snapshot to publish,
    /// or `None` if the identifier is not one of ours.
    pub fn apply_update(
        &mut self,
        id: Id,
        payload: &[u8; PAYLOAD_LEN],
    ) -> Option<&TelemetrySnapshot> {
        let channel = Channel::from_id(id)?;
        self.latest.update(channel.decode(payload));
        Some(&self.latest)
    }

    /// Validate and apply a frame.
    pub fn try_apply(&mut self, frame: &RawFrame) -> Result<&TelemetrySnapshot, Reject> {
        let payload = frame.payload().ok_or(Reject::Length(frame.dlc))?;
        self.apply_update(frame.id, payload)
            .ok_or(Reject::UnknownId(frame.id))
    }

    /// Like [`Telemetry::try_apply`], discarding the reason for rejection.
    #[inline]
    pub fn apply_frame(&mut self, frame: &RawFrame) -> Option<&TelemetrySnapshot> {
        self.try_apply(frame).ok()
    }
}

#[cfg(test)]
mod tests {
    use embedded_can::{ExtendedId, Frame};

    use super::*;
    use crate::RECORD_LEN;

    fn frame(id: u32, data: &[u8]) -> RawFrame {
        RawFrame::new(ExtendedId::new(id).unwrap(), data).unwrap()
    }

    #[test]
    fn starts_zeroed() {
        assert_eq!(*Telemetry::new().snapshot(), TelemetrySnapshot::default());
    }

    #[test]
    fn roll() {
        let mut telemetry = Telemetry::new();
        let published = *telemetry
            .apply_frame(&frame(0x300, &[64, 66, 1, 0, 5, 0, 0, 0]))
            .unwrap();

        assert_eq!(
            published,
            TelemetrySnapshot {
                roll: 8.2496,
                ctr_roll: 5,
                ..Default::default()
            }
        );
        assert_eq!(published, *telemetry.snapshot());
    }

    #[test]
    fn depth() {
        let mut telemetry = Telemetry::new();
        let published = *telemetry
            .apply_frame(&frame(0x304, &[0xe8, 0xfc, 3, 0, 0, 0, 0, 0]))
            .unwrap();

        assert_eq!(published.depth, -7.92);
        assert_eq!(published.ctr_depth, 3);
    }

    #[test]
    fn wrong_length_is_dropped() {
        let mut telemetry = Telemetry::new();
        telemetry.apply_frame(&frame(0x301, &[1; 8])).unwrap();
        let before = *telemetry.snapshot();

        for id in [0x300, 0x301, 0x304, 0x999] {
            let short = frame(id, &[1, 2, 3, 4, 5]);
            assert_eq!(telemetry.try_apply(&short), Err(Reject::Length(5)));
        }

        assert_eq!(telemetry.try_apply(&frame(0x300, &[])), Err(Reject::Length(0)));
        assert_eq!(*telemetry.snapshot(), before);
    }

    #[test]
    fn unknown_id_is_dropped() {
        let mut telemetry = Telemetry::new();
        let before = *telemetry.snapshot();

        assert_eq!(
            telemetry.try_apply(&frame(0x999, &[64, 66, 1, 0, 5, 0, 0, 0])),
            Err(Reject::UnknownId(Id::from_raw(0x999)))
        );
        assert_eq!(telemetry.apply_update(Id::from_raw(0x305), &[0xff; 8]), None);
        assert_eq!(*telemetry.snapshot(), before);
    }

    #[test]
    fn channels_are_independent() {
        let mut telemetry = Telemetry::new();
        telemetry.apply_frame(&frame(0x301, &[10, 0, 0, 0, 1, 0, 0, 0]));
        telemetry.apply_frame(&frame(0x302, &[20, 0, 0, 0, 2, 0, 0, 0]));
        telemetry.apply_frame(&frame(0x304, &[30, 0, 3, 0, 0, 0, 0, 0]));
        let before = *telemetry.snapshot();

        telemetry.apply_frame(&frame(0x300, &[64, 66, 1, 0, 5, 0, 0, 0]));
        let after = *telemetry
            .apply_frame(&frame(0x303, &[0x10, 0x27, 9, 0, 0, 0, 0, 0]))
            .unwrap();

        assert_eq!(after.pitch, before.pitch);
        assert_eq!(after.yaw, before.yaw);
        assert_eq!(after.depth, before.depth);
        assert_eq!(after.ctr_pitch, before.ctr_pitch);
        assert_eq!(after.ctr_yaw, before.ctr_yaw);
        assert_eq!(after.ctr_depth, before.ctr_depth);

        assert_eq!(after.roll, 8.2496);
        assert_eq!(after.pressure, 100.0);
        assert_eq!(after.ctr_pressure, 9);
    }

    #[test]
    fn last_frame_wins() {
        let mut telemetry = Telemetry::new();

        for counter in 0..10u16 {
            let [p0, p1] = (1000 + counter).to_le_bytes();
            let [c0, c1] = counter.to_le_bytes();
            telemetry
                .apply_frame(&frame(0x303, &[p0, p1, c0, c1, 0, 0, 0, 0]))
                .unwrap();
        }

        assert_eq!(telemetry.snapshot().pressure, 10.09);
        assert_eq!(telemetry.snapshot().ctr_pressure, 9);
    }

    #[test]
    fn flag_bits_do_not_affect_dispatch() {
        let mut record = [0; RECORD_LEN];
        record[..4].copy_from_slice(&0xe000_0300u32.to_le_bytes());
        record[4] = 8;
        record[8..12].copy_from_slice(&(-10_000i32).to_le_bytes());
        record[12] = 1;

        let mut telemetry = Telemetry::new();
        let frame = RawFrame::from_record(&record).unwrap();

        assert_eq!(telemetry.apply_frame(&frame).map(|s| s.roll), Some(-1.0));
    }
}
