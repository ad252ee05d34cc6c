use embedded_can::StandardId;

use crate::{
    buf::u32_le,
    id::{EFF_FLAG, RTR_FLAG},
    Id,
};

/// Size of one raw bus record: identifier word (4), DLC (1), padding (3)
/// and data (8).
pub const RECORD_LEN: usize = 16;

/// Largest data field of a classic CAN frame.
pub const MAX_DATA_LEN: usize = 8;

/// Declared length a frame must carry to be decoded at all.
pub const PAYLOAD_LEN: usize = 8;

const DATA_OFFSET: usize = 8;

/// A single frame as read from the bus. Only lives for one decode cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawFrame {
    pub id: Id,
    /// Declared data length. May disagree with `data.len()` when the
    /// sender declared more than [`MAX_DATA_LEN`] bytes.
    pub dlc: u8,
    pub data: heapless::Vec<u8, MAX_DATA_LEN>,
    extended: bool,
    remote: bool,
}

impl RawFrame {
    /// Parse one raw bus record.
    ///
    /// Returns `None` if fewer than [`RECORD_LEN`] bytes are given, which is
    /// how a short read from the transport shows up. The data is truncated
    /// to the declared length.
    pub fn from_record(record: &[u8]) -> Option<Self> {
        let (record, _) = record.split_first_chunk::<RECORD_LEN>()?;

        let raw_id = u32_le(record[0], record[1], record[2], record[3]);
        let dlc = record[4];
        let len = usize::from(dlc).min(MAX_DATA_LEN);

        Some(Self {
            id: Id::from_raw(raw_id),
            dlc,
            data: heapless::Vec::from_slice(&record[DATA_OFFSET..DATA_OFFSET + len])
                .unwrap_or_default(),
            extended: raw_id & EFF_FLAG != 0,
            remote: raw_id & RTR_FLAG != 0,
        })
    }

    /// Convert a frame from any [`embedded_can`] driver. A declared length
    /// that does not fit in a byte is kept as `u8::MAX`, so the frame is still
    /// rejected.
    pub fn from_can_frame<F: embedded_can::Frame>(frame: &F) -> Self {
        let data = frame.data();
        let data = &data[..data.len().min(MAX_DATA_LEN)];

        Self {
            id: frame.id().into(),
            dlc: u8::try_from(frame.dlc()).unwrap_or(u8::MAX),
            data: heapless::Vec::from_slice(data).unwrap_or_default(),
            extended: frame.is_extended(),
            remote: frame.is_remote_frame(),
        }
    }

    /// The full payload, if the frame declares exactly [`PAYLOAD_LEN`] bytes.
    /// Every other length is rejected, even for messages that use fewer
    /// bytes.
    #[inline]
    #[must_use]
    pub fn payload(&self) -> Option<&[u8; PAYLOAD_LEN]> {
        if usize::from(self.dlc) != PAYLOAD_LEN {
            return None;
        }

        self.data.as_slice().try_into().ok()
    }
}

impl embedded_can::Frame for RawFrame {
    fn new(id: impl Into<embedded_can::Id>, data: &[u8]) -> Option<Self> {
        let id = id.into();

        Some(Self {
            id: id.into(),
            dlc: data.len() as u8,
            data: heapless::Vec::from_slice(data).ok()?,
            extended: matches!(id, embedded_can::Id::Extended(_)),
            remote: false,
        })
    }

    fn new_remote(id: impl Into<embedded_can::Id>, dlc: usize) -> Option<Self> {
        if dlc > MAX_DATA_LEN {
            return None;
        }

        let id = id.into();

        Some(Self {
            id: id.into(),
            dlc: dlc as u8,
            data: heapless::Vec::new(),
            extended: matches!(id, embedded_can::Id::Extended(_)),
            remote: true,
        })
    }

    fn is_extended(&self) -> bool {
        self.extended
    }

    fn is_remote_frame(&self) -> bool {
        self.remote
    }

    fn id(&self) -> embedded_can::Id {
        if !self.extended {
            if let Some(id) = StandardId::new(self.id.as_raw() as u16) {
                if u32::from(id.as_raw()) == self.id.as_raw() {
                    return embedded_can::Id::Standard(id);
                }
            }
        }

        self.id.into()
    }

    fn dlc(&self) -> usize {
        self.dlc.into()
    }

    fn data(&self) -> &[u8] {
        &self.data
    }
}
