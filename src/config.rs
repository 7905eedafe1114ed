//! Configuration management
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! environment variables prefixed with `TICKET_DESK_` (for example
//! `TICKET_DESK_DEFAULT_FILE=/srv/tickets.csv`).

use crate::error::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const ENV_PREFIX: &str = "TICKET_DESK";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Runtime configuration for the ticket desk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// File offered by the save and load prompts when none is entered
    pub default_file: PathBuf,

    /// Load `default_file` on start-up when it exists
    pub autoload: bool,

    /// Tracing filter directive, e.g. `info` or `ticket_desk=debug`
    #[serde(default)]
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_file: PathBuf::from("tickets.csv"),
            autoload: false,
            log_level: None,
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from the per-user location
    ///
    /// A missing file is not an error; defaults and environment variables
    /// still apply.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let defaults = Self::default();
        let mut builder = config::Config::builder()
            .set_default("default_file", defaults.default_file.to_string_lossy().into_owned())?
            .set_default("autoload", defaults.autoload)?;

        if let Some(file) = path.map(Path::to_path_buf).or_else(Self::user_config_path) {
            tracing::debug!(path = %file.display(), "Reading configuration file");
            builder = builder.add_source(config::File::from(file.as_path()).required(false));
        }

        let settings = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Per-user configuration file location
    pub fn user_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "ticket-desk").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}
