//! Global animation speed.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Speed preset applied on top of every configured tick interval.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl AnimationSpeed {
    /// Cycle to the next preset.
    pub fn next(self) -> Self {
        match self {
            AnimationSpeed::Slow => AnimationSpeed::Normal,
            AnimationSpeed::Normal => AnimationSpeed::Fast,
            AnimationSpeed::Fast => AnimationSpeed::Slow,
        }
    }

    /// Interval multiplier: slower presets stretch ticks.
    pub fn interval_factor(self) -> f32 {
        match self {
            AnimationSpeed::Slow => 1.6,
            AnimationSpeed::Normal => 1.0,
            AnimationSpeed::Fast => 0.6,
        }
    }

    /// Scale a tick interval by this preset.
    pub fn scale(self, interval: Duration) -> Duration {
        match self {
            AnimationSpeed::Normal => interval,
            _ => {
                let ms = interval.as_millis() as f32 * self.interval_factor();
                Duration::from_millis(ms.round() as u64)
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AnimationSpeed::Slow => "slow",
            AnimationSpeed::Normal => "normal",
            AnimationSpeed::Fast => "fast",
        }
    }
}
