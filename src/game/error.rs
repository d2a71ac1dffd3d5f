//! Error types for aim setup and projectile spawning.

use std::fmt;

/// Startup/configuration failures. Raised before the first frame so a
/// misconfigured scene never gets as far as a mid-frame failure.
#[derive(Debug)]
pub enum ConfigError {
    /// A config field is out of range or inconsistent.
    InvalidValue {
        field: &'static str,
        reason: String,
    },
    /// A collaborator the configuration requires was not supplied.
    MissingCollaborator(&'static str),
    /// The rig has no bone with this name.
    MissingBone(String),
    /// Reading a config file failed.
    Io(std::io::Error),
    /// A config file is not valid JSON for [`super::config::AimConfig`].
    Json(serde_json::Error),
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "invalid config value `{field}`: {reason}")
            }
            ConfigError::MissingCollaborator(name) => {
                write!(f, "missing required collaborator: {name}")
            }
            ConfigError::MissingBone(name) => write!(f, "rig has no bone named `{name}`"),
            ConfigError::Io(e) => write!(f, "IO error: {e}"),
            ConfigError::Json(e) => write!(f, "JSON error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

/// Runtime spawn failures, reported back to the frame that released the shot.
#[derive(Debug, Clone, PartialEq)]
pub enum SpawnError {
    /// The projectile world already holds its maximum number of arrows.
    CapacityExhausted { limit: usize },
    /// Launch parameters are not finite.
    InvalidLaunch(&'static str),
}

impl fmt::Display for SpawnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpawnError::CapacityExhausted { limit } => {
                write!(f, "projectile limit reached ({limit} active)")
            }
            SpawnError::InvalidLaunch(reason) => write!(f, "invalid launch: {reason}"),
        }
    }
}

impl std::error::Error for SpawnError {}
