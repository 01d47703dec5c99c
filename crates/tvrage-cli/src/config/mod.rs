//! Application configuration module.
//!
//! Reads the TOML config file holding the TVRage API client settings.

#[allow(clippy::module_inception)]
mod config;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use config::{ApiConfig, AppConfig};
pub use paths::resolve_config_path;
