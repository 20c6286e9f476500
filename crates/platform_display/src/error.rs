//! Platform display errors

use crate::config::ConfigError;
use crate::kind::BackendKind;
use thiserror::Error;

/// Result type for platform display operations
pub type DisplayResult<T> = Result<T, DisplayError>;

/// Lifecycle rule that an operation violated
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidState {
    /// The native backend was queried before `initialize` succeeded
    #[error("native backend requested before initialization succeeded")]
    NotInitialized,

    /// `initialize` was called on a display that already owns a backend
    #[error("display already owns a native backend")]
    AlreadyInitialized,

    /// A shared display is already installed on this thread
    #[error("a shared display is already installed on this thread")]
    SharedDisplayInstalled,
}

/// Platform display errors
#[derive(Error, Debug)]
pub enum DisplayError {
    /// The native library refused to create a backend for the identifier
    #[error("Failed to initialize {kind} display for native identifier {identifier}: {reason}")]
    Initialization {
        /// Backend that was being initialized
        kind: BackendKind,
        /// Identifier handed to the native library
        identifier: i32,
        /// Reason reported by the native library
        reason: String,
    },

    /// Operation not allowed in the display's current state
    #[error("Invalid {kind} display state: {state}")]
    InvalidState {
        /// Backend of the offending display
        kind: BackendKind,
        /// Violated lifecycle rule
        state: InvalidState,
    },

    /// The selected backend failed and the headless fallback failed as well
    #[error("{primary}; headless fallback failed too: {fallback}")]
    FallbackFailed {
        /// Failure of the selected backend
        primary: Box<DisplayError>,
        /// Failure of the headless display created in its place
        fallback: Box<DisplayError>,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl DisplayError {
    /// Whether this is a native backend creation failure
    pub const fn is_initialization(&self) -> bool {
        matches!(self, Self::Initialization { .. })
    }

    /// Failure of the backend that was asked for
    ///
    /// For [`FallbackFailed`](Self::FallbackFailed) this is the original
    /// backend's error rather than the fallback's.
    pub fn primary(&self) -> &Self {
        match self {
            Self::FallbackFailed { primary, .. } => primary,
            _ => self,
        }
    }

    /// The violated lifecycle rule, if this is a state error
    pub const fn invalid_state(&self) -> Option<InvalidState> {
        match self {
            Self::InvalidState { state, .. } => Some(*state),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialization_message() {
        let err = DisplayError::Initialization {
            kind: BackendKind::Wpe,
            identifier: -1,
            reason: "bad descriptor".to_string(),
        };
        assert!(err.is_initialization());
        assert_eq!(err.invalid_state(), None);
        assert_eq!(
            err.to_string(),
            "Failed to initialize WPE display for native identifier -1: bad descriptor"
        );
    }

    #[test]
    fn test_fallback_failure_keeps_primary() {
        let err = DisplayError::FallbackFailed {
            primary: Box::new(DisplayError::Initialization {
                kind: BackendKind::Wpe,
                identifier: -1,
                reason: "bad descriptor".to_string(),
            }),
            fallback: Box::new(DisplayError::Initialization {
                kind: BackendKind::Headless,
                identifier: 3,
                reason: "no render node".to_string(),
            }),
        };
        assert!(!err.is_initialization());
        assert!(matches!(
            err.primary(),
            DisplayError::Initialization {
                kind: BackendKind::Wpe,
                ..
            }
        ));
        assert!(err.to_string().starts_with("Failed to initialize WPE display"));
        assert!(err.to_string().contains("no render node"));
    }

    #[test]
    fn test_config_error_converts() {
        let err = DisplayError::from(ConfigError::Invalid("log level cannot be empty".to_string()));
        assert!(matches!(err, DisplayError::Config(ConfigError::Invalid(_))));
        assert!(std::ptr::eq(err.primary(), &err));
    }

    #[test]
    fn test_invalid_state_accessor() {
        let err = DisplayError::InvalidState {
            kind: BackendKind::X11,
            state: InvalidState::AlreadyInitialized,
        };
        assert!(!err.is_initialization());
        assert_eq!(err.invalid_state(), Some(InvalidState::AlreadyInitialized));
        assert_eq!(
            err.to_string(),
            "Invalid X11 display state: display already owns a native backend"
        );
    }
}
