//! Layered runtime settings: built-in defaults, then an optional
//! `netvendor.toml`, then `NETVENDOR_*` environment variables. CLI flags are
//! applied on top by the binary.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

pub const CONFIG_FILE: &str = "netvendor.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Where resolver state (cache, failed lookups, seed) lives.
    pub data_dir: PathBuf,
    /// Where reports are written.
    pub output_dir: PathBuf,
    /// Skip all network lookups; uncached devices resolve to `None`.
    pub offline: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("output/data"),
            output_dir: PathBuf::from("output"),
            offline: false,
        }
    }
}

impl Config {
    /// Load settings: defaults, overlaid by `config_file` (or `netvendor.toml`
    /// in the working directory if present), overlaid by environment.
    pub fn load(config_file: Option<&Path>) -> Self {
        let mut config = Config::default();

        let path = config_file
            .map(Path::to_path_buf)
            .or_else(|| Path::new(CONFIG_FILE).exists().then(|| PathBuf::from(CONFIG_FILE)));
        if let Some(path) = path {
            match fs::read_to_string(&path) {
                Ok(content) => config.apply_toml(&content),
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "could not read config file")
                }
            }
        }

        config.apply_env_from(|key| std::env::var(key).ok());
        config
    }

    fn apply_toml(&mut self, content: &str) {
        let parsed: toml::Value = match content.parse() {
            Ok(value) => value,
            Err(err) => {
                warn!(error = %err, "ignoring unparseable config file");
                return;
            }
        };
        if let Some(dir) = parsed.get("data_dir").and_then(|v| v.as_str()) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(dir) = parsed.get("output_dir").and_then(|v| v.as_str()) {
            self.output_dir = PathBuf::from(dir);
        }
        if let Some(offline) = parsed.get("offline").and_then(|v| v.as_bool()) {
            self.offline = offline;
        }
    }

    /// Apply environment overrides through a lookup closure so tests don't
    /// have to mutate the process environment.
    fn apply_env_from<F: Fn(&str) -> Option<String>>(&mut self, get: F) {
        if let Some(dir) = get("NETVENDOR_DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(dir) = get("NETVENDOR_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(dir);
        }
        if let Some(flag) = get("NETVENDOR_OFFLINE") {
            self.offline = matches!(flag.to_lowercase().as_str(), "1" | "true" | "yes");
        }
    }
}
