//! X11 platform display

use super::slot::BackendSlot;
use super::DisplayVariant;
use crate::error::DisplayResult;
use crate::kind::BackendKind;
use crate::native::{NativeHandle, NativeLibrary};
use raw_window_handle::{RawDisplayHandle, XlibDisplayHandle};
use std::rc::Rc;

/// Platform display backed by an Xlib `Display` connection
#[derive(Debug)]
pub struct PlatformDisplayX11 {
    slot: BackendSlot,
    screen: i32,
}

impl PlatformDisplayX11 {
    /// Create a display with no connection yet, targeting screen 0
    pub fn new(library: Rc<dyn NativeLibrary>) -> Self {
        Self {
            slot: BackendSlot::new(Self::KIND, library),
            screen: 0,
        }
    }

    /// Target a different default screen
    #[must_use]
    pub fn with_screen(mut self, screen: i32) -> Self {
        self.screen = screen;
        self
    }

    /// Open the connection identified by `connection`
    ///
    /// Same contract as [`PlatformDisplayWpe::initialize`](super::PlatformDisplayWpe::initialize).
    pub fn initialize(&mut self, connection: i32) -> DisplayResult<()> {
        self.slot.initialize(connection)
    }

    /// The `Display*`, `None` until `initialize` succeeds
    pub fn backend(&self) -> Option<NativeHandle> {
        self.slot.backend()
    }

    /// The `Display*`, failing fast when not initialized
    pub fn try_backend(&self) -> DisplayResult<NativeHandle> {
        self.slot.try_backend()
    }

    /// Default screen number
    pub const fn screen(&self) -> i32 {
        self.screen
    }

    /// Whether a connection is held
    pub const fn is_initialized(&self) -> bool {
        self.slot.is_initialized()
    }

    /// Always [`BackendKind::X11`]
    pub const fn kind(&self) -> BackendKind {
        Self::KIND
    }

    /// Xlib display handle for surface creation
    pub fn raw_display_handle(&self) -> Option<RawDisplayHandle> {
        let display = self.slot.backend()?;
        let mut handle = XlibDisplayHandle::empty();
        handle.display = display.as_ptr();
        handle.screen = self.screen;
        Some(RawDisplayHandle::Xlib(handle))
    }
}

display_variant!(PlatformDisplayX11, X11);
