//! Cooperative tick scheduler with cancellable timers.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

/// Shortest interval a timer can be scheduled with.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Most ticks one timer replays in a single `advance`. A timer that falls
/// further behind resumes one interval after the present.
const MAX_CATCH_UP: u32 = 256;

/// What a timer task wants after it has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    /// Fire again after the timer's own interval.
    Continue,
    /// Fire again after the given delay.
    After(Duration),
    /// Never fire again.
    Stop,
}

/// A timer callback.
pub type Task = Box<dyn FnMut() -> TickControl>;

/// Identifier of a scheduled timer, unique per scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Handle to a scheduled timer.
///
/// Clones share the same flag, so cancelling any clone cancels the timer.
#[derive(Debug, Clone)]
pub struct CancelToken {
    id: TimerId,
    cancelled: Rc<Cell<bool>>,
}

impl CancelToken {
    fn new(id: TimerId) -> Self {
        Self {
            id,
            cancelled: Rc::new(Cell::new(false)),
        }
    }

    /// Identifier of the timer this token controls.
    pub fn id(&self) -> TimerId {
        self.id
    }

    /// Cancel the timer. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    /// Whether the timer has been cancelled or has stopped itself.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }

    /// Wrap the token in a guard that cancels the timer on drop.
    pub fn into_guard(self) -> TimerGuard {
        TimerGuard(self)
    }
}

/// Cancels its timer when dropped.
#[derive(Debug)]
#[must_use = "dropping a TimerGuard cancels its timer immediately"]
pub struct TimerGuard(CancelToken);

impl TimerGuard {
    /// The guarded token.
    pub fn token(&self) -> &CancelToken {
        &self.0
    }

    /// Whether the guarded timer can still fire.
    pub fn is_active(&self) -> bool {
        !self.0.is_cancelled()
    }
}

impl From<CancelToken> for TimerGuard {
    fn from(token: CancelToken) -> Self {
        token.into_guard()
    }
}

impl Drop for TimerGuard {
    fn drop(&mut self) {
        self.0.cancel();
    }
}

/// Something that can run tasks at fixed intervals.
pub trait Scheduler {
    /// Run `task` every `interval` until it returns [`TickControl::Stop`] or
    /// the returned token is cancelled. The first tick fires one interval
    /// from now.
    fn schedule(&self, interval: Duration, task: Task) -> CancelToken;

    /// Cancel a timer. A cancelled task is never invoked again.
    fn cancel(&self, token: &CancelToken) {
        token.cancel();
    }
}

struct Entry {
    token: CancelToken,
    interval: Duration,
    deadline: Duration,
    /// Ticks fired during the current `advance`.
    burst: u32,
    task: Task,
}

/// Single-threaded scheduler driven by the host loop.
///
/// The host calls [`FrameScheduler::advance`] with the wall time elapsed
/// since the previous call; every tick that came due fires in deadline
/// order. Tasks run with no internal borrow held, so they may schedule new
/// timers or cancel any timer, themselves included.
#[derive(Default)]
pub struct FrameScheduler {
    now: Cell<Duration>,
    next_id: Cell<u64>,
    entries: RefCell<Vec<Entry>>,
}

impl fmt::Debug for FrameScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameScheduler")
            .field("now", &self.now.get())
            .field("active", &self.active_count())
            .finish()
    }
}

impl FrameScheduler {
    /// Create an empty scheduler at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scheduler time, the sum of every `advance` so far.
    pub fn now(&self) -> Duration {
        self.now.get()
    }

    /// Number of timers that can still fire.
    pub fn active_count(&self) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|e| !e.token.is_cancelled())
            .count()
    }

    /// Time until the earliest live deadline, `None` when idle.
    pub fn next_deadline(&self) -> Option<Duration> {
        let now = self.now.get();
        self.entries
            .borrow()
            .iter()
            .filter(|e| !e.token.is_cancelled())
            .map(|e| e.deadline.saturating_sub(now))
            .min()
    }

    /// Move time forward and fire every due tick, catching up when the
    /// frame covers several intervals. Returns the number of task
    /// invocations.
    pub fn advance(&self, elapsed: Duration) -> usize {
        let target = self.now.get() + elapsed;
        let mut fired = 0;
        for entry in self.entries.borrow_mut().iter_mut() {
            entry.burst = 0;
        }

        while let Some(mut entry) = self.take_due(target) {
            self.now.set(entry.deadline.max(self.now.get()));
            let control = (entry.task)();
            fired += 1;
            entry.burst += 1;

            if entry.token.is_cancelled() {
                continue;
            }
            let step = match control {
                TickControl::Continue => entry.interval,
                TickControl::After(delay) => delay.max(MIN_INTERVAL),
                TickControl::Stop => {
                    entry.token.cancel();
                    continue;
                }
            };
            let next = entry.deadline + step;
            entry.deadline = if entry.burst >= MAX_CATCH_UP && next <= target {
                target + step
            } else {
                next
            };
            self.entries.borrow_mut().push(entry);
        }

        self.now.set(target);
        fired
    }

    /// Remove and return the earliest live entry due at or before `target`.
    /// Cancelled entries are dropped on the way.
    fn take_due(&self, target: Duration) -> Option<Entry> {
        let mut entries = self.entries.borrow_mut();
        entries.retain(|e| !e.token.is_cancelled());
        let idx = entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.deadline <= target)
            .min_by_key(|(_, e)| (e.deadline, e.token.id))
            .map(|(i, _)| i)?;
        Some(entries.swap_remove(idx))
    }
}

impl Scheduler for FrameScheduler {
    fn schedule(&self, interval: Duration, task: Task) -> CancelToken {
        let id = TimerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        let interval = interval.max(MIN_INTERVAL);
        let token = CancelToken::new(id);
        self.entries.borrow_mut().push(Entry {
            token: token.clone(),
            interval,
            deadline: self.now.get() + interval,
            burst: 0,
            task,
        });
        token
    }
}

impl<S: Scheduler + ?Sized> Scheduler for Rc<S> {
    fn schedule(&self, interval: Duration, task: Task) -> CancelToken {
        (**self).schedule(interval, task)
    }
}
