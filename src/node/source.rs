use core::convert::Infallible;

use embassy_sync::{blocking_mutex::raw::RawMutex, channel::Receiver};

use crate::{RawFrame, RECORD_LEN};

/// A non-blocking supply of frames. [`embedded_can`] only has blocking and
/// `nb` flavours with transmit attached, and all we ever do is look for the
/// next frame.
pub trait FrameSource {
    type Error;

    /// Take the next frame if one is pending. `Ok(None)` means nothing was
    /// available and must not be treated as a failure.
    fn receive_frame(&mut self) -> Result<Option<RawFrame>, Self::Error>;
}

impl<T> FrameSource for &mut T
where
    T: FrameSource,
{
    type Error = T::Error;

    fn receive_frame(&mut self) -> Result<Option<RawFrame>, Self::Error> {
        (*self).receive_frame()
    }
}

/// Frames handed over by a separate reader task.
impl<M, const N: usize> FrameSource for Receiver<'_, M, RawFrame, N>
where
    M: RawMutex,
{
    type Error = Infallible;

    fn receive_frame(&mut self) -> Result<Option<RawFrame>, Self::Error> {
        Ok(self.try_receive().ok())
    }
}

/// A transport that yields raw [`RECORD_LEN`]-byte records, such as a raw
/// SocketCAN socket in non-blocking mode.
pub trait RecordRead {
    type Error;

    /// Read at most one record into `buf` without blocking and return the
    /// number of bytes read. Nothing pending is `Ok(0)`.
    fn read_record(&mut self, buf: &mut [u8; RECORD_LEN]) -> Result<usize, Self::Error>;
}

/// Adapts a [`RecordRead`] into a [`FrameSource`]. Short reads are reported
/// as no frame.
#[derive(Debug)]
pub struct Records<R> {
    reader: R,
    buf: [u8; RECORD_LEN],
}

impl<R> Records<R> {
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            buf: [0; RECORD_LEN],
        }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R> FrameSource for Records<R>
where
    R: RecordRead,
{
    type Error = R::Error;

    fn receive_frame(&mut self) -> Result<Option<RawFrame>, Self::Error> {
        let len = self.reader.read_record(&mut self.buf)?.min(RECORD_LEN);
        Ok(RawFrame::from_record(&self.buf[..len]))
    }
}
