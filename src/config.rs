//! Flightline configuration.
//!
//! The API key always comes from the `AVIATION_KEY` environment variable.
//! Everything else is optional and lives in `~/.flightline/config.toml`:
//!
//! ```toml
//! base-url = "http://api.aviationstack.com/v1/flights"
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use reqwest::Url;
use serde::Deserialize;

use crate::lookup::DEFAULT_BASE_URL;

/// Environment variable holding the Aviation Stack access key.
pub const API_KEY_VAR: &str = "AVIATION_KEY";

/// Environment variable naming an alternative config file.
pub const CONFIG_PATH_VAR: &str = "FLIGHTLINE_CONFIG";

/// On-disk shape of the config file.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct ConfigFile {
    base_url: Option<String>,
}

/// Resolved configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Flights endpoint that lookups are sent to.
    pub base_url: Url,
}

impl Config {
    /// Load config from `path`, or from the default location when `None`.
    ///
    /// An explicitly named file must exist. The default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, String> {
        let file = match path {
            Some(path) => read_config_file(path)?,
            None => match Self::path() {
                Some(path) => match read_config_file(&path) {
                    Ok(file) => file,
                    Err(_) if !path.exists() => ConfigFile::default(),
                    Err(e) => return Err(e),
                },
                None => ConfigFile::default(),
            },
        };

        let base_url = file.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        let base_url =
            Url::parse(base_url).map_err(|e| format!("invalid base-url '{base_url}': {e}"))?;

        Ok(Self { base_url })
    }

    /// The default config file path: `~/.flightline/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".flightline").join("config.toml"))
    }
}

fn read_config_file(path: &Path) -> Result<ConfigFile, String> {
    let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => format!("no config file found at {}", path.display()),
        _ => format!("failed to read {}: {e}", path.display()),
    })?;

    toml::from_str(&contents).map_err(|e| format!("invalid config at {}: {e}", path.display()))
}
