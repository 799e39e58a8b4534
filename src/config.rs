//! Configuration System
//!
//! Layered configuration for the registry and its logging: built-in defaults, an
//! optional TOML file, then `SURFACE_CTX__*` environment overrides. Loaded by the host
//! before it constructs the registry.

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::surface::SurfaceKind;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Prefix for environment overrides, e.g. `SURFACE_CTX__REGISTRY__FALLBACK=web`.
pub const ENV_PREFIX: &str = "SURFACE_CTX";
const ENV_SEPARATOR: &str = "__";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SurfaceConfig {
    #[serde(default)]
    pub registry: RegistryConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Registry behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Surface consulted when the current surface has no live context
    #[serde(default = "default_fallback")]
    pub fallback: SurfaceKind,
}

fn default_fallback() -> SurfaceKind {
    SurfaceKind::Primary
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            fallback: default_fallback(),
        }
    }
}

impl RegistryConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.fallback == SurfaceKind::None {
            return Err("Fallback surface cannot be 'none': its slot is never populated".to_string());
        }
        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Registry(String),
    Logging(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Registry(msg) => write!(f, "Registry: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl SurfaceConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.registry.validate() {
            errors.push(ValidationError::Registry(e));
        }
        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Loads [`SurfaceConfig`] from defaults, files, and the environment
pub struct ConfigLoader;

impl ConfigLoader {
    /// Defaults plus environment overrides
    pub fn load() -> Result<SurfaceConfig, ApiError> {
        Self::finish(Self::builder_with_defaults()?)
    }

    /// Defaults, then the TOML file at `path`, then environment overrides
    pub fn load_from_file(path: &Path) -> Result<SurfaceConfig, ApiError> {
        // config's File source gives a vaguer error for a missing file
        if !path.exists() {
            return Err(ApiError::ConfigError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        let builder = Self::builder_with_defaults()?.add_source(File::from(path).required(true));
        Self::finish(builder)
    }

    fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ApiError> {
        // Seed defaults so partial files and env-only setups still deserialize
        let defaults = LoggingConfig::default();
        Ok(Config::builder()
            .set_default("registry.fallback", default_fallback().as_str())?
            .set_default("logging.level", defaults.level)?
            .set_default("logging.format", defaults.format)?
            .set_default("logging.output", defaults.output)?)
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<SurfaceConfig, ApiError> {
        // Environment overrides apply last (highest precedence)
        let config: SurfaceConfig = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR),
            )
            .build()?
            .try_deserialize()?;

        // Validate after merge so every source is checked together
        config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;

        Ok(config)
    }
}
