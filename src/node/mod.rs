#[cfg(feature = "defmt")]
use defmt::{info, trace};
use embassy_futures::select::{select, Either};
use embassy_sync::{
    blocking_mutex::raw::RawMutex,
    pubsub::{ImmediatePublisher, PubSubChannel, Publisher},
    signal::Signal,
};
use embassy_time::{Duration, Ticker};

use crate::{Telemetry, TelemetrySnapshot};

mod source;

pub use source::{FrameSource, RecordRead, Records};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Shortest usable poll interval. A zero period would make the ticker
/// always ready.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_ticks(1);

/// Name of the logical channel snapshots are published on.
pub const TOPIC: &str = "can/imu_pressure";

/// Depth of the snapshot queue. Lagging subscribers lose the oldest
/// snapshots first.
pub const QUEUE_DEPTH: usize = 10;

/// A snapshot channel with a single publisher (the node).
pub type SnapshotChannel<M, const SUBS: usize> =
    PubSubChannel<M, TelemetrySnapshot, QUEUE_DEPTH, SUBS, 1>;

/// Where accepted snapshots go. Publishing must not block the poll loop.
pub trait TelemetrySink {
    fn publish_snapshot(&mut self, snapshot: &TelemetrySnapshot);
}

impl<T> TelemetrySink for &mut T
where
    T: TelemetrySink + ?Sized,
{
    fn publish_snapshot(&mut self, snapshot: &TelemetrySnapshot) {
        (**self).publish_snapshot(snapshot);
    }
}

impl<M, const CAP: usize, const SUBS: usize, const PUBS: usize> TelemetrySink
    for Publisher<'_, M, TelemetrySnapshot, CAP, SUBS, PUBS>
where
    M: RawMutex,
{
    fn publish_snapshot(&mut self, snapshot: &TelemetrySnapshot) {
        self.publish_immediate(*snapshot);
    }
}

impl<M, const CAP: usize, const SUBS: usize, const PUBS: usize> TelemetrySink
    for ImmediatePublisher<'_, M, TelemetrySnapshot, CAP, SUBS, PUBS>
where
    M: RawMutex,
{
    fn publish_snapshot(&mut self, snapshot: &TelemetrySnapshot) {
        self.publish_immediate(*snapshot);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Period between two read attempts.
    pub poll_interval: Duration,
}

impl Config {
    pub const DEFAULT: Self = Self {
        poll_interval: DEFAULT_POLL_INTERVAL,
    };

    /// Set the poll interval, clamped to at least [`MIN_POLL_INTERVAL`].
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = if poll_interval.as_ticks() < MIN_POLL_INTERVAL.as_ticks() {
            MIN_POLL_INTERVAL
        } else {
            poll_interval
        };
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Owns the snapshot and moves frames from the source to the sink, one read
/// per tick.
///
/// Nothing that goes wrong on the way is reported: an empty or short read, a
/// transport error, a frame with the wrong length or an unknown identifier
/// all simply mean nothing is published this tick.
pub struct Node<S, K> {
    source: S,
    sink: K,
    telemetry: Telemetry,
    config: Config,
}

impl<S, K> Node<S, K>
where
    S: FrameSource,
    K: TelemetrySink,
{
    pub fn new(source: S, sink: K) -> Self {
        Self::with_config(source, sink, Config::default())
    }

    pub fn with_config(source: S, sink: K, config: Config) -> Self {
        Self {
            source,
            sink,
            telemetry: Telemetry::new(),
            config,
        }
    }

    #[inline]
    pub fn snapshot(&self) -> &TelemetrySnapshot {
        self.telemetry.snapshot()
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn into_parts(self) -> (S, K) {
        (self.source, self.sink)
    }

    /// Make one read attempt and, if it produced an accepted frame, publish
    /// the updated snapshot. Returns whether something was published.
    pub fn poll_once(&mut self) -> bool {
        let frame = match self.source.receive_frame() {
            Ok(Some(frame)) => frame,
            Ok(None) => return false,
            Err(_) => {
                #[cfg(feature = "defmt")]
                trace!("Frame source read failed");

                return false;
            }
        };

        match self.telemetry.try_apply(&frame) {
            Ok(snapshot) => {
                self.sink.publish_snapshot(snapshot);
                true
            }
            Err(_reject) => {
                #[cfg(feature = "defmt")]
                trace!("Dropped frame: {}", _reject);

                false
            }
        }
    }

    /// Poll once per [`Config::poll_interval`] until `shutdown` is signalled.
    /// Shutdown is checked before every tick, so a signal raised before the
    /// call returns without polling. The snapshot is left as is.
    pub async fn run<M: RawMutex>(&mut self, shutdown: &Signal<M, ()>) {
        #[cfg(feature = "defmt")]
        info!(
            "Publishing telemetry on {}, polling every {} us",
            TOPIC,
            self.config.poll_interval.as_micros()
        );

        let mut ticker = Ticker::every(self.config.poll_interval.max(MIN_POLL_INTERVAL));

        loop {
            match select(shutdown.wait(), ticker.next()).await {
                Either::First(()) => break,
                Either::Second(()) => {
                    self.poll_once();
                }
            }
        }

        #[cfg(feature = "defmt")]
        info!("Telemetry node stopped");
    }
}
