//! # Platform Display
//!
//! Backend-agnostic ownership of native display handles for a rendering
//! engine's graphics layer.
//!
//! ## Features
//!
//! - **Closed backend set**: X11, Wayland, WPE, Win32, Cocoa and headless
//!   displays behind one [`PlatformDisplay`] type
//! - **Safe downcasting**: [`DisplayVariant`] ties every display type to its
//!   [`BackendKind`] at compile time
//! - **Owned handles**: each display owns at most one native backend and
//!   releases it exactly once when dropped
//! - **Bootstrap helpers**: backend selection, headless fallback and a
//!   per-thread shared display in [`registry`]
//!
//! ## Quick Start
//!
//! ```rust
//! use platform_display::prelude::*;
//! use std::rc::Rc;
//!
//! let library = Rc::new(MockNativeLibrary::new());
//!
//! let mut wpe = PlatformDisplayWpe::new(library.clone());
//! wpe.initialize(7)?;
//!
//! let display = PlatformDisplay::from(wpe);
//! assert_eq!(display.kind(), BackendKind::Wpe);
//! assert!(display.downcast_ref::<PlatformDisplayWpe>().is_some());
//! assert!(display.downcast_ref::<PlatformDisplayX11>().is_none());
//!
//! let handle = display.try_backend()?;
//! drop(display);
//! assert_eq!(library.release_count(handle), 1);
//! # Ok::<(), DisplayError>(())
//! ```
//!
//! ## Threading
//!
//! Displays are created, used and dropped on one thread. They hold an
//! `Rc<dyn NativeLibrary>`, so the compiler keeps them there.

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod capabilities;
pub mod config;
pub mod display;
pub mod error;
pub mod kind;
pub mod logging;
pub mod native;
pub mod registry;

pub use capabilities::DisplayCapabilities;
pub use config::{BackendPreference, Config, ConfigError, DisplayConfig};
pub use display::{
    DisplayVariant, PlatformDisplay, PlatformDisplayCocoa, PlatformDisplayHeadless,
    PlatformDisplayWayland, PlatformDisplayWin32, PlatformDisplayWpe, PlatformDisplayX11,
};
pub use error::{DisplayError, DisplayResult, InvalidState};
pub use kind::{BackendKind, ParseBackendKindError};
pub use native::{MockNativeLibrary, NativeHandle, NativeLibrary, OwnedBackend};

/// Common imports for display users
pub mod prelude {
    pub use crate::{
        BackendKind, Config, DisplayCapabilities, DisplayConfig, DisplayError, DisplayResult,
        DisplayVariant, InvalidState, MockNativeLibrary, NativeHandle, NativeLibrary,
        PlatformDisplay, PlatformDisplayCocoa, PlatformDisplayHeadless, PlatformDisplayWayland,
        PlatformDisplayWin32, PlatformDisplayWpe, PlatformDisplayX11,
    };
}
