//! WPE platform display
//!
//! Owns the EGL renderer backend that the WPE backend library creates from
//! the host file descriptor passed to the web process at launch.
//!
//! # Lifecycle
//!
//! ```text
//! new(library) ──▶ initialize(host_fd) ──▶ backend() / kind() ... ──▶ drop
//!   (unset)          (at most one success)                          (release if set)
//! ```

use super::slot::BackendSlot;
use super::DisplayVariant;
use crate::error::DisplayResult;
use crate::kind::BackendKind;
use crate::native::{NativeHandle, NativeLibrary};
use std::rc::Rc;

/// Platform display backed by a WPE EGL renderer backend
#[derive(Debug)]
pub struct PlatformDisplayWpe {
    slot: BackendSlot,
}

impl PlatformDisplayWpe {
    /// Create a display with no renderer backend yet
    pub fn new(library: Rc<dyn NativeLibrary>) -> Self {
        Self {
            slot: BackendSlot::new(Self::KIND, library),
        }
    }

    /// Create the EGL renderer backend bound to `host_fd`
    ///
    /// # Errors
    ///
    /// - [`DisplayError::Initialization`](crate::DisplayError::Initialization)
    ///   if the backend library refuses the descriptor. No backend is held
    ///   afterwards and the call may be repeated.
    /// - [`DisplayError::InvalidState`](crate::DisplayError::InvalidState) with
    ///   [`InvalidState::AlreadyInitialized`](crate::InvalidState::AlreadyInitialized)
    ///   if a backend is already held. The existing backend is kept.
    pub fn initialize(&mut self, host_fd: i32) -> DisplayResult<()> {
        self.slot.initialize(host_fd)
    }

    /// The renderer backend, `None` until `initialize` succeeds
    pub fn backend(&self) -> Option<NativeHandle> {
        self.slot.backend()
    }

    /// The renderer backend
    ///
    /// # Errors
    ///
    /// [`InvalidState::NotInitialized`](crate::InvalidState::NotInitialized)
    /// if `initialize` has not succeeded.
    pub fn try_backend(&self) -> DisplayResult<NativeHandle> {
        self.slot.try_backend()
    }

    /// Host file descriptor the backend was created from
    pub fn host_fd(&self) -> Option<i32> {
        self.slot.identifier()
    }

    /// Whether a renderer backend is held
    pub const fn is_initialized(&self) -> bool {
        self.slot.is_initialized()
    }

    /// Always [`BackendKind::Wpe`]
    pub const fn kind(&self) -> BackendKind {
        Self::KIND
    }
}

display_variant!(PlatformDisplayWpe, Wpe);
