//! Cooperative single-threaded task scheduler with cancellable handles.
//!
//! Nothing runs on its own: the host calls [`Scheduler::pop_due`] from its
//! event loop and dispatches each returned task to completion before asking
//! for the next one. Because tasks are handed out one at a time, a task body
//! that cancels another task is guaranteed to win: once [`Scheduler::cancel`]
//! returns, the cancelled token can never be popped.

use embassy_time::{Duration, Instant};
use heapless::Vec;
use log::debug;
use thiserror_no_std::Error;

/// Maximum number of pending tasks.
pub const MAX_SCHEDULED_TASKS: usize = 8;

/// Work the scheduler can hand back to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    /// Redraw the clock face
    ClockTick,
    /// Reapply the saved brightness / opacity for the current period
    Reapply,
}

/// Handle to one scheduled firing.
///
/// Tokens are never reused, so a stale token cannot cancel or match a later
/// firing of the same task kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CancelToken(u32);

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("scheduler queue is full ({0} pending tasks)")]
    Full(usize),
}

#[derive(Debug, Clone, Copy)]
struct ScheduledTask {
    token: CancelToken,
    kind: TaskKind,
    due: Instant,
}

/// Pending timed tasks, fired in due order.
#[derive(Debug, Default)]
pub struct Scheduler {
    tasks: Vec<ScheduledTask, MAX_SCHEDULED_TASKS>,
    next_token: u32,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `kind` to fire at `due`.
    pub fn schedule(&mut self, due: Instant, kind: TaskKind) -> Result<CancelToken, SchedulerError> {
        let token = CancelToken(self.next_token);
        self.tasks
            .push(ScheduledTask { token, kind, due })
            .map_err(|_| SchedulerError::Full(MAX_SCHEDULED_TASKS))?;
        self.next_token = self.next_token.wrapping_add(1);
        debug!("Scheduled {:?} as {:?} at {}ms", kind, token, due.as_millis());
        Ok(token)
    }

    /// Schedule `kind` to fire `delay` after `now`.
    pub fn schedule_after(
        &mut self,
        now: Instant,
        delay: Duration,
        kind: TaskKind,
    ) -> Result<CancelToken, SchedulerError> {
        self.schedule(now + delay, kind)
    }

    /// Remove a pending task. Returns `false` if it already fired or was
    /// cancelled before.
    pub fn cancel(&mut self, token: CancelToken) -> bool {
        match self.tasks.iter().position(|task| task.token == token) {
            Some(index) => {
                self.tasks.swap_remove(index);
                debug!("Cancelled {:?}", token);
                true
            }
            None => false,
        }
    }

    pub fn is_pending(&self, token: CancelToken) -> bool {
        self.tasks.iter().any(|task| task.token == token)
    }

    /// Earliest due time among pending tasks.
    pub fn next_due(&self) -> Option<Instant> {
        self.tasks.iter().map(|task| task.due).min()
    }

    /// Remove and return the earliest task due at or before `now`.
    ///
    /// Ties go to the task scheduled first.
    pub fn pop_due(&mut self, now: Instant) -> Option<(CancelToken, TaskKind)> {
        let index = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| task.due <= now)
            .min_by_key(|(_, task)| (task.due, task.token.0))
            .map(|(index, _)| index)?;
        let task = self.tasks.swap_remove(index);
        Some((task.token, task.kind))
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
