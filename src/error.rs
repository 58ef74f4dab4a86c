//! Unified error type for the security service.
//!
//! Every fallible service operation funnels into [`Error`].  Port errors
//! convert with `?`; the core adds exactly one failure of its own,
//! [`Error::InvalidSensor`].

use core::fmt;

use crate::app::ports::{ClassifierError, StoreError};
use crate::config::ConfigError;
use crate::sensors::SensorId;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A sensor change named a sensor the store does not know.
    InvalidSensor(SensorId),
    /// The status store failed.
    Store(StoreError),
    /// The image classifier failed.
    Classifier(ClassifierError),
    /// Configuration is invalid.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSensor(id) => write!(f, "invalid sensor: {id}"),
            Self::Store(e) => write!(f, "store: {e}"),
            Self::Classifier(e) => write!(f, "classifier: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidSensor(_) => None,
            Self::Store(e) => Some(e),
            Self::Classifier(e) => Some(e),
            Self::Config(e) => Some(e),
        }
    }
}

impl From<StoreError> for Error {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

impl From<ClassifierError> for Error {
    fn from(e: ClassifierError) -> Self {
        Self::Classifier(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
