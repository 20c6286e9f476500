//! Backend identifiers
//!
//! [`BackendKind`] is the closed set of windowing backends a
//! [`PlatformDisplay`](crate::PlatformDisplay) can be bound to. Each display
//! variant is associated with exactly one kind at compile time through
//! [`DisplayVariant::KIND`](crate::DisplayVariant::KIND).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Windowing backend a platform display talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// X11 server connection
    X11,
    /// Wayland compositor connection
    Wayland,
    /// WPE EGL renderer backend
    Wpe,
    /// Win32 display device
    Win32,
    /// Cocoa / AppKit
    Cocoa,
    /// Surfaceless rendering without a windowing system
    Headless,
}

impl BackendKind {
    /// Every backend kind, in declaration order
    pub const ALL: [Self; 6] = [
        Self::X11,
        Self::Wayland,
        Self::Wpe,
        Self::Win32,
        Self::Cocoa,
        Self::Headless,
    ];

    /// Lowercase identifier used in configuration files
    pub const fn name(self) -> &'static str {
        match self {
            Self::X11 => "x11",
            Self::Wayland => "wayland",
            Self::Wpe => "wpe",
            Self::Win32 => "win32",
            Self::Cocoa => "cocoa",
            Self::Headless => "headless",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::X11 => "X11",
            Self::Wayland => "Wayland",
            Self::Wpe => "WPE",
            Self::Win32 => "Win32",
            Self::Cocoa => "Cocoa",
            Self::Headless => "Headless",
        };
        f.write_str(label)
    }
}

/// Error returned when a string names no known backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown display backend: {0}")]
pub struct ParseBackendKindError(pub String);

impl FromStr for BackendKind {
    type Err = ParseBackendKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseBackendKindError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_parse_back() {
        for kind in BackendKind::ALL {
            assert_eq!(kind.name().parse::<BackendKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_parse_ignores_case_and_whitespace() {
        assert_eq!(" WPE ".parse::<BackendKind>(), Ok(BackendKind::Wpe));
        assert_eq!("Wayland".parse::<BackendKind>(), Ok(BackendKind::Wayland));
    }

    #[test]
    fn test_parse_unknown_backend() {
        let err = "directfb".parse::<BackendKind>().unwrap_err();
        assert_eq!(err, ParseBackendKindError("directfb".to_string()));
        assert_eq!(err.to_string(), "Unknown display backend: directfb");
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(BackendKind::Wpe.to_string(), "WPE");
        assert_eq!(BackendKind::Headless.to_string(), "Headless");
    }
}
