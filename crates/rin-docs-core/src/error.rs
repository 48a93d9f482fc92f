//! Core error types for the Rin docs components.
//!
//! The code block widget has a single runtime failure, [`DocsError::ClipboardCopyFailed`],
//! which is contained inside the copy action. The remaining variants cover
//! setup concerns (runtime binding, rendering); configuration loading reports
//! [`ConfigError`] on its own.

use thiserror::Error;

/// Central error type for all Rin docs operations.
#[derive(Error, Debug)]
pub enum DocsError {
    /// The host clipboard-write capability was unavailable or rejected the copy.
    #[error("failed to copy code block: {0}")]
    ClipboardCopyFailed(#[source] ClipboardError),

    /// No event loop is available to schedule the status reset on
    #[error("no async runtime available: {0}")]
    RuntimeUnavailable(String),

    /// Markup rendering errors
    #[error("render error: {0}")]
    Render(String),
}

/// Failures reported by a host clipboard capability.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    /// The hosting runtime exposes no clipboard
    #[error("clipboard capability is not available in this host")]
    Unavailable,

    /// The host refused the copy (permissions, focus, platform error)
    #[error("clipboard rejected the copy: {0}")]
    Rejected(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to determine config directory path
    #[error("could not determine config directory (XDG base directories not available)")]
    NoConfigDir,

    /// Failed to parse TOML
    #[error("failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Failed to serialize config
    #[error("failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// I/O error reading/writing config
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration value
    #[error("invalid config value for {field}: {reason}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Reason for invalidity
        reason: String,
    },
}

impl From<ClipboardError> for DocsError {
    fn from(err: ClipboardError) -> Self {
        Self::ClipboardCopyFailed(err)
    }
}

/// Result type alias using `DocsError`.
pub type Result<T> = std::result::Result<T, DocsError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DocsError::ClipboardCopyFailed(ClipboardError::Rejected(
            "document is not focused".to_string(),
        ));
        assert_eq!(
            err.to_string(),
            "failed to copy code block: clipboard rejected the copy: document is not focused"
        );

        let err = ConfigError::NoConfigDir;
        assert_eq!(
            err.to_string(),
            "could not determine config directory (XDG base directories not available)"
        );
    }

    #[test]
    fn test_error_from_clipboard() {
        let docs_err: DocsError = ClipboardError::Unavailable.into();
        assert!(matches!(
            docs_err,
            DocsError::ClipboardCopyFailed(ClipboardError::Unavailable)
        ));
    }

    #[test]
    fn test_error_source_chain() {
        use std::error::Error as _;

        let err = DocsError::from(ClipboardError::Unavailable);
        let source = err.source().expect("copy failure keeps its cause");
        assert_eq!(
            source.to_string(),
            "clipboard capability is not available in this host"
        );
    }
}
