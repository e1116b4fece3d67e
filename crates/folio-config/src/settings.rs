//! Runtime tunables loaded from `config.toml`.

use std::fs;
use std::path::Path;
use std::time::Duration;

use folio_core::{AnimationSpeed, ColorTheme};
use folio_fx::CyclerTiming;
use folio_fx::RainSettings;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ConfigError;

/// Top-level configuration. Every field has a default, so any subset may
/// appear in the file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: ColorTheme,
    pub speed: AnimationSpeed,
    /// Fixed seed for the rain; random per run when unset.
    pub seed: Option<u64>,
    pub rain: RainConfig,
    pub typewriter: TypewriterConfig,
    pub counters: CounterConfig,
    pub reveal: RevealConfig,
    pub loading: LoadingConfig,
    pub contact: ContactConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RainConfig {
    pub enabled: bool,
    pub cell_width: u16,
    pub tick_ms: u64,
    pub fade: f32,
    pub glow_probability: f32,
    pub reset_probability: f32,
    pub primary_share: f32,
    pub stagger_rows: f32,
    pub brightness: f32,
}

impl Default for RainConfig {
    fn default() -> Self {
        let d = RainSettings::default();
        Self {
            enabled: true,
            cell_width: d.cell_width,
            tick_ms: d.tick.as_millis() as u64,
            fade: d.fade,
            glow_probability: d.glow_probability,
            reset_probability: d.reset_probability,
            primary_share: d.primary_share,
            stagger_rows: d.stagger_rows,
            brightness: d.brightness,
        }
    }
}

impl RainConfig {
    pub fn settings(&self, speed: AnimationSpeed) -> RainSettings {
        RainSettings {
            cell_width: self.cell_width,
            tick: speed.scale(Duration::from_millis(self.tick_ms)),
            fade: self.fade,
            glow_probability: self.glow_probability,
            reset_probability: self.reset_probability,
            primary_share: self.primary_share,
            stagger_rows: self.stagger_rows,
            brightness: self.brightness,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypewriterConfig {
    pub type_ms: u64,
    pub delete_ms: u64,
    pub hold_ms: u64,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        let d = CyclerTiming::default();
        Self {
            type_ms: d.type_delay.as_millis() as u64,
            delete_ms: d.delete_delay.as_millis() as u64,
            hold_ms: d.hold_delay.as_millis() as u64,
        }
    }
}

impl TypewriterConfig {
    pub fn timing(&self, speed: AnimationSpeed) -> CyclerTiming {
        CyclerTiming {
            type_delay: speed.scale(Duration::from_millis(self.type_ms)),
            delete_delay: speed.scale(Duration::from_millis(self.delete_ms)),
            hold_delay: speed.scale(Duration::from_millis(self.hold_ms)),
        }
    }
}

/// Count-up timing for the about statistics and skill percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    pub stat_steps: u32,
    pub stat_tick_ms: u64,
    pub skill_steps: u32,
    pub skill_tick_ms: u64,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            stat_steps: 30,
            stat_tick_ms: 50,
            skill_steps: 60,
            skill_tick_ms: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Visible fraction needed to reveal most sections.
    pub threshold: f32,
    /// Project cards are tall, so they reveal earlier.
    pub projects_threshold: f32,
    pub stagger_ms: u64,
    pub fade_ms: u64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.3,
            projects_threshold: 0.2,
            stagger_ms: 100,
            fade_ms: 600,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadingConfig {
    pub delay_ms: u64,
    pub skip_on_key: bool,
}

impl Default for LoadingConfig {
    fn default() -> Self {
        Self {
            delay_ms: 2000,
            skip_on_key: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    /// How long the "message sent" notice stays up.
    pub confirmation_ms: u64,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            confirmation_ms: 4000,
        }
    }
}

impl Config {
    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config.sanitized())
    }

    /// Load from the platform config directory.
    pub fn load() -> Result<Self, ConfigError> {
        match crate::config_file() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write the config, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let text = self.to_toml()?;
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(path, text).map_err(write_err)
    }

    /// Clamp values that would break the animations.
    pub fn sanitized(mut self) -> Self {
        let unit = |v: f32| if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 };
        self.rain.cell_width = self.rain.cell_width.max(2);
        self.rain.tick_ms = self.rain.tick_ms.max(1);
        self.rain.fade = unit(self.rain.fade);
        self.rain.glow_probability = unit(self.rain.glow_probability);
        self.rain.reset_probability = unit(self.rain.reset_probability);
        self.rain.primary_share = unit(self.rain.primary_share);
        self.rain.brightness = unit(self.rain.brightness);
        self.rain.stagger_rows = self.rain.stagger_rows.max(0.0);
        self.reveal.threshold = unit(self.reveal.threshold);
        self.reveal.projects_threshold = unit(self.reveal.projects_threshold);
        self.counters.stat_steps = self.counters.stat_steps.max(1);
        self.counters.skill_steps = self.counters.skill_steps.max(1);
        self
    }
}
