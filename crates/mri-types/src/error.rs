use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EmError {
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Invalid waveform: {0}")]
    InvalidWaveform(String),

    #[error("Invalid conductivity: {0}")]
    InvalidConductivity(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Copyable tag for an [`EmError`], kept on failed sweep points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidGeometry,
    InvalidWaveform,
    InvalidConductivity,
    Config,
    Io,
    Json,
}

impl EmError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EmError::InvalidGeometry(_) => ErrorKind::InvalidGeometry,
            EmError::InvalidWaveform(_) => ErrorKind::InvalidWaveform,
            EmError::InvalidConductivity(_) => ErrorKind::InvalidConductivity,
            EmError::ConfigError(_) => ErrorKind::Config,
            EmError::Io(_) => ErrorKind::Io,
            EmError::Json(_) => ErrorKind::Json,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::InvalidGeometry => "invalid_geometry",
            ErrorKind::InvalidWaveform => "invalid_waveform",
            ErrorKind::InvalidConductivity => "invalid_conductivity",
            ErrorKind::Config => "config",
            ErrorKind::Io => "io",
            ErrorKind::Json => "json",
        };
        f.write_str(name)
    }
}

pub type EmResult<T> = Result<T, EmError>;
