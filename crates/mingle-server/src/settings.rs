//! Layered server configuration.
//!
//! The configuration document holds one table per named profile. Sources are
//! merged in order: built-in defaults, the optional config file, then
//! `MINGLE_<PROFILE>__<KEY>` environment variables (e.g.
//! `MINGLE_PRODUCTION__PORT=8080`).

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

const DEFAULTS: &str = r#"
[development]
host                 = "127.0.0.1"
port                 = 6001
store_path           = "mingle-dev.db"
assets_dir           = "public/assets"
request_timeout_secs = 30
request_log          = true

[production]
host                 = "0.0.0.0"
port                 = 6001
store_path           = "~/.local/share/mingle/mingle.db"
assets_dir           = "public/assets"
request_timeout_secs = 10
request_log          = false
"#;

/// A named deployment profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Profile {
  Development,
  Production,
}

/// Runtime settings for one profile.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  pub host:                 String,
  pub port:                 u16,
  pub store_path:           PathBuf,
  /// Directory served under `/assets`.
  pub assets_dir:           PathBuf,
  pub request_timeout_secs: u64,
  /// Emit a tracing span per HTTP request.
  pub request_log:          bool,
}

/// Every profile, as read from all configuration sources.
#[derive(Debug, Clone, Deserialize)]
pub struct Profiles {
  pub development: ServerConfig,
  pub production:  ServerConfig,
}

impl Profiles {
  pub fn select(self, profile: Profile) -> ServerConfig {
    match profile {
      Profile::Development => self.development,
      Profile::Production => self.production,
    }
  }
}

/// Load all profiles, with `path` layered over the defaults if it exists.
pub fn load(path: &Path) -> Result<Profiles, ConfigError> {
  layered(File::from(path).required(false))
}

fn layered<S>(overrides: S) -> Result<Profiles, ConfigError>
where
  S: config::Source + Send + Sync + 'static,
{
  Config::builder()
    .add_source(File::from_str(DEFAULTS, FileFormat::Toml))
    .add_source(overrides)
    .add_source(
      Environment::with_prefix("MINGLE")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true),
    )
    .build()?
    .try_deserialize()
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
