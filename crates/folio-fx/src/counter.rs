//! Count-up animation for statistics.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use folio_core::{Scheduler, TickControl, TimerGuard};
use tracing::debug;

/// Interpolates from 0 to a target over a fixed number of ticks.
///
/// After tick `k` the value is `floor(target * k / steps)`, so the
/// sequence never decreases and the last value is exactly the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterAnimator {
    target: u32,
    steps: u32,
    ticks: u32,
    current: u32,
}

impl CounterAnimator {
    /// A zero step count behaves as a single step.
    pub fn new(target: u32, steps: u32) -> Self {
        Self {
            target,
            steps: steps.max(1),
            ticks: 0,
            current: 0,
        }
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn is_done(&self) -> bool {
        self.ticks >= self.steps
    }

    /// Advance one tick and return the new value, or `None` once the
    /// target has been reached.
    pub fn tick(&mut self) -> Option<u32> {
        if self.is_done() {
            return None;
        }
        self.ticks += 1;
        self.current = (u64::from(self.target) * u64::from(self.ticks) / u64::from(self.steps)) as u32;
        Some(self.current)
    }
}

/// A counter that starts on demand and runs on a scheduler.
///
/// Starting is one-shot: once started, later `start` calls do nothing, so
/// a section becoming visible again never restarts its numbers.
#[derive(Debug)]
pub struct StatCounter {
    animator: Rc<RefCell<CounterAnimator>>,
    guard: Option<TimerGuard>,
    started: bool,
}

impl StatCounter {
    pub fn new(target: u32, steps: u32) -> Self {
        Self {
            animator: Rc::new(RefCell::new(CounterAnimator::new(target, steps))),
            guard: None,
            started: false,
        }
    }

    /// Begin ticking every `interval`. Returns false when already started.
    pub fn start(&mut self, scheduler: &dyn Scheduler, interval: Duration) -> bool {
        if self.started {
            return false;
        }
        self.started = true;

        let animator = Rc::clone(&self.animator);
        let token = scheduler.schedule(
            interval,
            Box::new(move || {
                let mut animator = animator.borrow_mut();
                animator.tick();
                if animator.is_done() {
                    debug!(target = animator.target(), "counter finished");
                    TickControl::Stop
                } else {
                    TickControl::Continue
                }
            }),
        );
        self.guard = Some(token.into_guard());
        true
    }

    /// Cancel the timer. The displayed value freezes where it is.
    pub fn stop(&mut self) {
        self.guard = None;
    }

    pub fn value(&self) -> u32 {
        self.animator.borrow().current()
    }

    pub fn target(&self) -> u32 {
        self.animator.borrow().target()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_done(&self) -> bool {
        self.animator.borrow().is_done()
    }

    /// Whether a timer is still driving this counter.
    pub fn is_running(&self) -> bool {
        self.guard.as_ref().is_some_and(TimerGuard::is_active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::FrameScheduler;

    fn run(target: u32, steps: u32) -> Vec<u32> {
        let mut animator = CounterAnimator::new(target, steps);
        std::iter::from_fn(|| animator.tick()).collect()
    }

    #[test]
    fn test_monotonic_and_exact() {
        for target in [0, 1, 2, 5, 7, 80, 87, 100, 1000] {
            for steps in [0, 1, 3, 30, 60] {
                let values = run(target, steps);
                assert_eq!(values.len(), steps.max(1) as usize);
                assert!(values.windows(2).all(|w| w[0] <= w[1]));
                assert!(values.iter().all(|&v| v <= target));
                assert_eq!(values.last().copied(), Some(target));
            }
        }
    }

    #[test]
    fn test_zero_target_finishes_immediately() {
        assert_eq!(run(0, 30), vec![0; 30]);
        let mut animator = CounterAnimator::new(0, 1);
        assert_eq!(animator.tick(), Some(0));
        assert_eq!(animator.tick(), None);
    }

    #[test]
    fn test_stat_counter_runs_to_target() {
        let scheduler = FrameScheduler::new();
        let mut counter = StatCounter::new(5, 30);
        assert!(counter.start(&scheduler, Duration::from_millis(50)));

        let mut last = 0;
        for _ in 0..200 {
            scheduler.advance(Duration::from_millis(16));
            assert!(counter.value() >= last);
            last = counter.value();
        }
        assert_eq!(counter.value(), 5);
        assert!(counter.is_done());
        assert!(!counter.is_running());
        assert_eq!(scheduler.active_count(), 0);
    }

    #[test]
    fn test_slow_frames_catch_up() {
        let scheduler = FrameScheduler::new();
        let mut counter = StatCounter::new(5, 30);
        counter.start(&scheduler, Duration::from_millis(50));
        assert_eq!(scheduler.advance(Duration::from_millis(1500)), 30);
        assert_eq!(counter.value(), 5);
        assert!(counter.is_done());

        let mut counter = StatCounter::new(100, 60);
        counter.start(&scheduler, Duration::from_millis(30));
        scheduler.advance(Duration::from_millis(30));
        assert_eq!(scheduler.advance(Duration::from_millis(1200)), 40);
        assert_eq!(counter.value(), 68);
    }

    #[test]
    fn test_start_is_idempotent() {
        let scheduler = FrameScheduler::new();
        let mut counter = StatCounter::new(100, 60);
        assert!(counter.start(&scheduler, Duration::from_millis(30)));
        for _ in 0..20 {
            scheduler.advance(Duration::from_millis(10));
        }
        let mid = counter.value();
        assert!(mid > 0);

        assert!(!counter.start(&scheduler, Duration::from_millis(30)));
        assert_eq!(scheduler.active_count(), 1);
        scheduler.advance(Duration::from_millis(10));
        assert!(counter.value() >= mid);
    }

    #[test]
    fn test_stop_freezes_value() {
        let scheduler = FrameScheduler::new();
        let mut counter = StatCounter::new(100, 60);
        counter.start(&scheduler, Duration::from_millis(30));
        scheduler.advance(Duration::from_millis(90));
        let frozen = counter.value();

        counter.stop();
        scheduler.advance(Duration::from_millis(30));
        assert_eq!(counter.value(), frozen);
        assert_eq!(scheduler.active_count(), 0);
    }
}
