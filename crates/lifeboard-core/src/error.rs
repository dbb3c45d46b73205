//! Error types for the ledger
//!
//! Only opening a ledger can fail. Once loaded, operations report
//! [`Outcome`](crate::Outcome) values instead of errors.

use std::path::PathBuf;

use lifeboard_record::Domain;

/// Errors raised while reading or validating configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`LedgerConfig`](crate::LedgerConfig)
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Values parsed but are not usable
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl ConfigError {
    /// Create read error for path
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }
}

/// Errors raised when opening a ledger
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// Configuration rejected
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type alias for ledger construction
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Rejected promotion state machine transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub(crate) enum TransitionError {
    /// Record is already shown under main, remembering `0`
    #[error("already promoted from {0}")]
    AlreadyPromoted(Domain),

    /// Record was created under main and has no domain to come from
    #[error("native main record")]
    NativeMain,

    /// Record carries no domain to return to
    #[error("not promoted")]
    NotPromoted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::Invalid("window_days must be at least 1".to_string());
        assert_eq!(err.to_string(), "invalid config: window_days must be at least 1");

        let err = ConfigError::read_error(
            "/etc/lifeboard.toml",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.to_string().contains("/etc/lifeboard.toml"));
    }

    #[test]
    fn ledger_error_is_transparent() {
        let err = LedgerError::from(ConfigError::Invalid("x".to_string()));
        assert_eq!(err.to_string(), "invalid config: x");
    }

    #[test]
    fn transition_error_display() {
        assert_eq!(
            TransitionError::AlreadyPromoted(Domain::Financial).to_string(),
            "already promoted from FINANCIAL"
        );
    }
}
