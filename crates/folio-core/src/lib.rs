//! Core types shared by the folio crates.
//!
//! Everything animated in folio runs on a single cooperative
//! [`FrameScheduler`]: components schedule repeating tasks, keep the
//! returned [`TimerGuard`], and are torn down by dropping it.

mod rng;
mod speed;
mod theme;
mod timer;

pub use rng::{RandomSource, SequenceRandom, XorShift64};
pub use speed::AnimationSpeed;
pub use theme::ColorTheme;
pub use timer::{CancelToken, FrameScheduler, Scheduler, Task, TickControl, TimerGuard, TimerId};
