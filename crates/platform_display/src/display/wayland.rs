//! Wayland platform display

use super::slot::BackendSlot;
use super::DisplayVariant;
use crate::error::DisplayResult;
use crate::kind::BackendKind;
use crate::native::{NativeHandle, NativeLibrary};
use raw_window_handle::{RawDisplayHandle, WaylandDisplayHandle};
use std::rc::Rc;

/// Platform display backed by a `wl_display` connection
#[derive(Debug)]
pub struct PlatformDisplayWayland {
    slot: BackendSlot,
}

impl PlatformDisplayWayland {
    /// Create a display with no compositor connection yet
    pub fn new(library: Rc<dyn NativeLibrary>) -> Self {
        Self {
            slot: BackendSlot::new(Self::KIND, library),
        }
    }

    /// Connect over the already opened compositor socket `socket_fd`
    pub fn initialize(&mut self, socket_fd: i32) -> DisplayResult<()> {
        self.slot.initialize(socket_fd)
    }

    /// The `wl_display*`, `None` until `initialize` succeeds
    pub fn backend(&self) -> Option<NativeHandle> {
        self.slot.backend()
    }

    /// The `wl_display*`, failing fast when not initialized
    pub fn try_backend(&self) -> DisplayResult<NativeHandle> {
        self.slot.try_backend()
    }

    /// Whether a connection is held
    pub const fn is_initialized(&self) -> bool {
        self.slot.is_initialized()
    }

    /// Always [`BackendKind::Wayland`]
    pub const fn kind(&self) -> BackendKind {
        Self::KIND
    }

    /// Wayland display handle for surface creation
    pub fn raw_display_handle(&self) -> Option<RawDisplayHandle> {
        let display = self.slot.backend()?;
        let mut handle = WaylandDisplayHandle::empty();
        handle.display = display.as_ptr();
        Some(RawDisplayHandle::Wayland(handle))
    }
}

display_variant!(PlatformDisplayWayland, Wayland);
