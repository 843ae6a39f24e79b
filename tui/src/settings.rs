//! Configuration and logging setup.

use color_eyre::eyre::{Result, WrapErr};
use config::{Config, Environment, File};
use serde::Deserialize;
use spotter_core::SessionSettings;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const ENV_PREFIX: &str = "SPOTTER";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub session: SessionSettings,
    /// JSON exercise list replacing the built-in catalog.
    pub catalog_path: Option<PathBuf>,
    pub keybindings_path: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    /// Reads the config file (if any) and then `SPOTTER__*` overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| config_dir().join("config.toml"));

        Config::builder()
            .add_source(File::from(path.as_path()).required(false))
            .add_source(env_source())
            .build()
            .wrap_err_with(|| format!("failed to load config from {}", path.display()))?
            .try_deserialize()
            .wrap_err("failed to parse config")
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| config_dir().join("spotter.log"))
    }
}

fn env_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
}

pub fn config_dir() -> PathBuf {
    std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))
        .map(|p| p.join("spotter"))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Sends log output to a file; the terminal belongs to the UI.
pub fn init_tracing(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .wrap_err_with(|| format!("failed to open log file {}", path.display()))?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn,spotter_core=info,spotter_tui=info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(env_filter);

    let _ = subscriber.try_init();
    Ok(())
}
