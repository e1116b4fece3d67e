//! Micro-animations for the folio page.
//!
//! Each effect is an independent, per-instance state machine advanced one
//! tick at a time. The `*Loop`/`*Handle` types mount an effect on a
//! [`folio_core::Scheduler`] and cancel its timer when dropped.

mod chars;
mod color;
pub mod counter;
pub mod cycler;
pub mod rain;
pub mod reveal;
pub mod visibility;

pub use chars::RAIN_CHARS;
pub use color::{brighten, hex, scale_rgb};
pub use counter::{CounterAnimator, StatCounter};
pub use cycler::{CyclerPhase, CyclerTiming, TextCycler, TypewriterHandle};
pub use rain::{RainColor, RainField, RainLoop, RainSettings};
pub use reveal::RevealStore;
pub use visibility::{
    GeometryObserver, ManualObserver, Region, VisibilityObserver, VisibilityTrigger, Viewport,
    intersection_ratio,
};
