//! Self-rescheduling periodic task on top of [`Scheduler`].
//!
//! A ticker fires once as soon as it is activated, then keeps one firing
//! pending at all times until deactivated. Deactivation cancels the pending
//! firing synchronously; a firing popped with a token the ticker no longer
//! holds is reported as stale and its body must not run.

use embassy_time::Duration;
use log::{debug, info};

use crate::moment::Moment;
use crate::scheduler::{CancelToken, Scheduler, SchedulerError, TaskKind};

const MILLIS_PER_SECOND: u64 = 1000;

/// When the next firing lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    /// On the next wall-clock second boundary
    SecondBoundary,
    /// A fixed period after the current firing
    Every(Duration),
}

impl Cadence {
    /// Delay from `now` to the next firing.
    pub fn delay_from(self, now: &Moment) -> Duration {
        match self {
            Cadence::SecondBoundary => {
                Duration::from_millis(MILLIS_PER_SECOND - now.millis_into_second() % MILLIS_PER_SECOND)
            }
            Cadence::Every(period) => period,
        }
    }
}

pub struct PeriodicTicker {
    kind: TaskKind,
    cadence: Cadence,
    pending: Option<CancelToken>,
}

impl PeriodicTicker {
    pub const fn new(kind: TaskKind, cadence: Cadence) -> Self {
        Self {
            kind,
            cadence,
            pending: None,
        }
    }

    /// Ticker that redraws the clock on every second boundary.
    pub const fn clock() -> Self {
        Self::new(TaskKind::ClockTick, Cadence::SecondBoundary)
    }

    pub fn is_active(&self) -> bool {
        self.pending.is_some()
    }

    /// Start ticking. The first firing is due immediately.
    ///
    /// Activating an active ticker restarts it.
    pub fn activate(
        &mut self,
        scheduler: &mut Scheduler,
        now: &Moment,
    ) -> Result<(), SchedulerError> {
        self.deactivate(scheduler);
        self.pending = Some(scheduler.schedule(now.instant, self.kind)?);
        info!("{:?} ticker activated", self.kind);
        Ok(())
    }

    /// Stop ticking. No firing scheduled before this call will run its body.
    pub fn deactivate(&mut self, scheduler: &mut Scheduler) {
        if let Some(token) = self.pending.take() {
            scheduler.cancel(token);
            info!("{:?} ticker deactivated", self.kind);
        }
    }

    /// Handle a firing popped from the scheduler.
    ///
    /// Returns `Ok(true)` when the body should run, after the next firing has
    /// been scheduled. Returns `Ok(false)` for a token this ticker does not
    /// hold (stale or foreign).
    pub fn on_fire(
        &mut self,
        scheduler: &mut Scheduler,
        token: CancelToken,
        now: &Moment,
    ) -> Result<bool, SchedulerError> {
        if self.pending != Some(token) {
            debug!("Ignoring stale {:?} firing {:?}", self.kind, token);
            return Ok(false);
        }
        let delay = self.cadence.delay_from(now);
        // A failed reschedule leaves the ticker inactive.
        self.pending = None;
        self.pending = Some(scheduler.schedule_after(now.instant, delay, self.kind)?);
        Ok(true)
    }
}
