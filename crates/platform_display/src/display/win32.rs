//! Win32 platform display

use super::slot::BackendSlot;
use super::DisplayVariant;
use crate::error::DisplayResult;
use crate::kind::BackendKind;
use crate::native::{NativeHandle, NativeLibrary};
use raw_window_handle::{RawDisplayHandle, WindowsDisplayHandle};
use std::rc::Rc;

/// Platform display backed by a Win32 display device context
#[derive(Debug)]
pub struct PlatformDisplayWin32 {
    slot: BackendSlot,
}

impl PlatformDisplayWin32 {
    /// Create a display with no device context yet
    pub fn new(library: Rc<dyn NativeLibrary>) -> Self {
        Self {
            slot: BackendSlot::new(Self::KIND, library),
        }
    }

    /// Open the device context of display device `device_index`
    pub fn initialize(&mut self, device_index: i32) -> DisplayResult<()> {
        self.slot.initialize(device_index)
    }

    /// The `HDC`, `None` until `initialize` succeeds
    pub fn backend(&self) -> Option<NativeHandle> {
        self.slot.backend()
    }

    /// The `HDC`, failing fast when not initialized
    pub fn try_backend(&self) -> DisplayResult<NativeHandle> {
        self.slot.try_backend()
    }

    /// Whether a device context is held
    pub const fn is_initialized(&self) -> bool {
        self.slot.is_initialized()
    }

    /// Always [`BackendKind::Win32`]
    pub const fn kind(&self) -> BackendKind {
        Self::KIND
    }

    /// Windows display handle; it carries no data but marks the platform
    pub fn raw_display_handle(&self) -> Option<RawDisplayHandle> {
        self.slot
            .backend()
            .map(|_| RawDisplayHandle::Windows(WindowsDisplayHandle::empty()))
    }
}

display_variant!(PlatformDisplayWin32, Win32);
