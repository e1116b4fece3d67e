//! Platform paths resolved through `directories`.

use std::path::PathBuf;

use directories::ProjectDirs;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "folio")
}

/// Default location of `config.toml`.
pub fn config_file() -> Option<PathBuf> {
    project_dirs().map(|d| d.config_dir().join("config.toml"))
}

/// Default location of `profile.toml`.
pub fn profile_file() -> Option<PathBuf> {
    project_dirs().map(|d| d.config_dir().join("profile.toml"))
}

/// Directory for log files. The terminal belongs to the UI, so logs go
/// here instead.
pub fn log_dir() -> Option<PathBuf> {
    project_dirs().map(|d| d.data_local_dir().join("logs"))
}
