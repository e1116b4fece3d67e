//! Configuration and profile content for folio.
//!
//! Both files are TOML and optional. The config lives at
//! `<config dir>/folio/config.toml`, the profile beside it as
//! `profile.toml`; a missing file means built-in defaults.

mod error;
pub mod filter;
mod paths;
mod profile;
mod settings;

pub use error::ConfigError;
pub use filter::{ALL_CATEGORIES, Categorized, categories, filter_by_category};
pub use paths::{config_file, log_dir, profile_file};
pub use profile::{AboutInfo, ContactInfo, EducationEntry, Profile, Project, Skill, Social, Stat};
pub use settings::{
    Config, ContactConfig, CounterConfig, LoadingConfig, RainConfig, RevealConfig,
    TypewriterConfig,
};
