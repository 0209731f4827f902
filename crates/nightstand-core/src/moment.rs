//! Host-supplied reading of "now".

use embassy_time::Instant;
use time::PrimitiveDateTime;

use crate::clock::WallClock;

/// A single reading of both clocks the core cares about.
///
/// `instant` is monotonic and drives the scheduler. `local` is the wall-clock
/// reading used for the display text, second alignment and day/night
/// decisions. The core never samples either clock itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Moment {
    pub instant: Instant,
    pub local: PrimitiveDateTime,
}

impl Moment {
    pub const fn new(instant: Instant, local: PrimitiveDateTime) -> Self {
        Self { instant, local }
    }

    /// Hour, minute and second of the local reading.
    pub fn wall_clock(&self) -> WallClock {
        WallClock::from_time(self.local.time())
    }

    /// Milliseconds elapsed since the last wall-clock second boundary (0..=999).
    pub fn millis_into_second(&self) -> u64 {
        self.local.millisecond() as u64
    }
}
