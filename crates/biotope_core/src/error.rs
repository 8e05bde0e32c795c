//! Error types for biotope_core.
//!
//! Simulation steps never fail for domain reasons: invalid traits are
//! clamped, stale targets are dropped, reproduction at the cap is skipped.
//! What remains are configuration and I/O failures.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BiotopeError {
    /// Configuration failed validation
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// File system errors
    #[error("File system error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing errors
    #[error("TOML parse error: {0}")]
    TomlDecode(#[from] toml::de::Error),

    /// TOML serialization errors
    #[error("TOML write error: {0}")]
    TomlEncode(#[from] toml::ser::Error),

    /// Telemetry sink errors
    #[error("Telemetry error: {0}")]
    Telemetry(String),
}

pub type Result<T> = std::result::Result<T, BiotopeError>;

impl BiotopeError {
    #[must_use]
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    #[must_use]
    pub fn telemetry<S: Into<String>>(msg: S) -> Self {
        Self::Telemetry(msg.into())
    }
}
