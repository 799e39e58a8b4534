//! Error types for the surface context registry.

use crate::surface::SurfaceKind;
use thiserror::Error;

/// Errors surfaced by the registry and its ambient configuration
#[derive(Debug, Error)]
pub enum ApiError {
    /// Neither the current surface nor the fallback surface has a live context.
    /// Callers hitting this queried outside the registration window.
    #[error("No context available: current surface is {current}, fallback {fallback} is not registered")]
    NoContextAvailable {
        current: SurfaceKind,
        fallback: SurfaceKind,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
