use super::ForgeConfig;
use crate::error::ForgeError;
use figment::Figment;
use figment::providers::{Env, Format, Toml};
use std::path::Path;

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

/// Configuration file picked up from the working directory when `--config` is absent
pub const REPO_CONFIG_FILE: &str = "contextforge.toml";
/// Prefix of environment overrides; nested keys are separated by `__`
pub const ENV_PREFIX: &str = "CONTEXTFORGE_";

impl ForgeConfig {
    /// Load defaults, `contextforge.toml` from the working directory and environment overrides
    pub fn load() -> Result<Self, ForgeError> {
        Self::load_with_custom_config(None)
    }

    /// Load configuration, reading `custom_config` instead of the working-directory file
    ///
    /// Unlike the working-directory file, an explicit config file must exist.
    pub fn load_with_custom_config(custom_config: Option<&Path>) -> Result<Self, ForgeError> {
        let config = Self::figment(custom_config)?
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(|e| ForgeError::Config(e.to_string()))?;
        tracing::debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    /// File-based layers only, without environment overrides
    fn figment(custom_config: Option<&Path>) -> Result<Figment, ForgeError> {
        let figment = Figment::new().merge(Toml::string(DEFAULT_CONFIG)); // Embedded defaults

        match custom_config {
            Some(path) => {
                if !path.is_file() {
                    return Err(ForgeError::Config(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                tracing::debug!("Using config file {}", path.display());
                Ok(figment.merge(Toml::file(path)))
            }
            None => Ok(figment.merge(Toml::file(REPO_CONFIG_FILE))),
        }
    }
}
