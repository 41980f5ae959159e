//! Optional configuration file
//!
//! `$TRXKIT_CONFIG` > `$XDG_CONFIG_HOME/trxkit/config.toml` >
//! `~/.config/trxkit/config.toml`. Missing or unparsable files fall back
//! to the defaults; the toolkit must keep working with no config at all.

use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct NetworkSpec {
    pub name: String,
    /// TronGrid-compatible node API base, e.g. `https://nile.trongrid.io`.
    pub grid: String,
    /// TronScan-compatible explorer API base.
    pub scan: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Default JSON-RPC endpoint for the `eth` commands.
    #[serde(default)]
    pub eth_rpc: Option<String>,

    /// Extra networks beyond the built-in `main` and `nile`.
    #[serde(default)]
    pub networks: Vec<NetworkSpec>,
}

pub fn load() -> Config {
    let Some(path) = config_path() else {
        return Config::default();
    };
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(_) => return Config::default(),
    };
    match toml::from_str::<Config>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("ignoring malformed config {}: {err}", path.display());
            Config::default()
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("TRXKIT_CONFIG").map(PathBuf::from) {
        return Some(path);
    }
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
        return Some(xdg.join("trxkit").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".config").join("trxkit").join("config.toml"));
    }
    directories::ProjectDirs::from("io", "trxkit", "trxkit")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}
