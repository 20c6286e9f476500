//! Cocoa platform display

use super::slot::BackendSlot;
use super::DisplayVariant;
use crate::error::DisplayResult;
use crate::kind::BackendKind;
use crate::native::{NativeHandle, NativeLibrary};
use raw_window_handle::{AppKitDisplayHandle, RawDisplayHandle};
use std::rc::Rc;

/// Platform display backed by an `NSScreen`
#[derive(Debug)]
pub struct PlatformDisplayCocoa {
    slot: BackendSlot,
}

impl PlatformDisplayCocoa {
    /// Create a display with no screen attached yet
    pub fn new(library: Rc<dyn NativeLibrary>) -> Self {
        Self {
            slot: BackendSlot::new(Self::KIND, library),
        }
    }

    /// Attach to the screen with CoreGraphics display id `display_id`
    pub fn initialize(&mut self, display_id: i32) -> DisplayResult<()> {
        self.slot.initialize(display_id)
    }

    /// The screen handle, `None` until `initialize` succeeds
    pub fn backend(&self) -> Option<NativeHandle> {
        self.slot.backend()
    }

    /// The screen handle, failing fast when not initialized
    pub fn try_backend(&self) -> DisplayResult<NativeHandle> {
        self.slot.try_backend()
    }

    /// Whether a screen is attached
    pub const fn is_initialized(&self) -> bool {
        self.slot.is_initialized()
    }

    /// Always [`BackendKind::Cocoa`]
    pub const fn kind(&self) -> BackendKind {
        Self::KIND
    }

    /// AppKit display handle
    pub fn raw_display_handle(&self) -> Option<RawDisplayHandle> {
        self.slot
            .backend()
            .map(|_| RawDisplayHandle::AppKit(AppKitDisplayHandle::empty()))
    }
}

display_variant!(PlatformDisplayCocoa, Cocoa);
