//! File logging. The terminal belongs to the UI, so events go to
//! `<data dir>/folio/logs/folio.log`.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use color_eyre::eyre::eyre;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `FOLIO_LOG=debug`.
pub const FILTER_ENV: &str = "FOLIO_LOG";

/// Install the global subscriber. Returns the log file path, or `None`
/// when there is nowhere writable to log to; the page runs either way.
pub fn init() -> color_eyre::Result<Option<PathBuf>> {
    let Some((path, file)) = folio_config::log_dir().and_then(|dir| open_log(&dir)) else {
        return Ok(None);
    };

    let filter = EnvFilter::try_from_env(FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|err| eyre!(err))?;
    Ok(Some(path))
}

/// Open `dir/folio.log` for appending, creating `dir` if needed.
fn open_log(dir: &Path) -> Option<(PathBuf, File)> {
    fs::create_dir_all(dir).ok()?;
    let path = dir.join("folio.log");
    let file = OpenOptions::new().create(true).append(true).open(&path).ok()?;
    Some((path, file))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("folio-log-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        let _ = fs::remove_file(&dir);
        dir
    }

    #[test]
    fn test_opens_log_in_new_dir() {
        let dir = scratch("ok").join("logs");
        let (path, _file) = open_log(&dir).unwrap();
        assert_eq!(path, dir.join("folio.log"));
        assert!(path.exists());
        fs::remove_dir_all(dir.parent().unwrap()).unwrap();
    }

    #[test]
    fn test_unwritable_dir_gives_up_quietly() {
        // A plain file where the directory should be.
        let blocker = scratch("blocked");
        fs::write(&blocker, "").unwrap();
        assert!(open_log(&blocker.join("logs")).is_none());
        fs::remove_file(&blocker).unwrap();
    }
}
