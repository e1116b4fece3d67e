use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::eyre::eyre;
use folio_config::{Config, Profile};
use tracing::{info, warn};

mod app;
mod form;
mod loading;
mod logging;
mod overlay;
mod page;
mod scroll;
mod section;
mod sections;
mod tabs;
mod text;

use app::App;

#[derive(Debug, Parser)]
#[command(name = "folio", version)]
#[command(about = "A terminal portfolio with scroll reveals and matrix rain", long_about = None)]
struct Cli {
    /// Config file [default: <config dir>/folio/config.toml]
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Profile content file [default: <config dir>/folio/profile.toml]
    #[arg(long, value_name = "PATH")]
    profile: Option<PathBuf>,

    /// Seed for the rain, for a repeatable background
    #[arg(long)]
    seed: Option<u64>,

    /// Start without the rain background
    #[arg(long)]
    no_rain: bool,

    /// Skip the loading splash
    #[arg(long)]
    skip_intro: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,

    /// Save the effective configuration to the config file and exit
    #[arg(long)]
    write_config: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let log_path = logging::init()?;

    let mut config = load_config(cli.config.as_deref());
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if cli.no_rain {
        config.rain.enabled = false;
    }
    if cli.skip_intro {
        config.loading.delay_ms = 0;
    }
    if cli.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }
    if cli.write_config {
        let path = cli
            .config
            .clone()
            .or_else(folio_config::config_file)
            .ok_or_else(|| eyre!("no config directory on this platform, pass --config"))?;
        config.save_to(&path)?;
        info!(path = %path.display(), "config written");
        println!("{}", path.display());
        return Ok(());
    }

    let profile = match &cli.profile {
        Some(path) => Profile::load_from(path)?,
        None => Profile::load()?,
    };
    info!(
        version = env!("CARGO_PKG_VERSION"),
        log = ?log_path,
        theme = config.theme.label(),
        speed = config.speed.label(),
        "starting folio"
    );

    let terminal = ratatui::init();
    let result = App::new(config, profile).run(terminal);
    ratatui::restore();
    result
}

/// A broken config file should not keep the page from showing.
fn load_config(path: Option<&Path>) -> Config {
    let loaded = match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    loaded.unwrap_or_else(|err| {
        warn!(%err, "using default config");
        Config::default()
    })
}
