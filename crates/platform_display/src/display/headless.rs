//! Headless platform display
//!
//! Surfaceless rendering on a DRM render node. Used when no windowing system
//! is available and as the fallback of
//! [`create_platform_display`](crate::registry::create_platform_display).

use super::slot::BackendSlot;
use super::DisplayVariant;
use crate::error::DisplayResult;
use crate::kind::BackendKind;
use crate::native::{NativeHandle, NativeLibrary};
use raw_window_handle::{DrmDisplayHandle, RawDisplayHandle};
use std::rc::Rc;

/// Platform display backed by a surfaceless EGL display on a render node
#[derive(Debug)]
pub struct PlatformDisplayHeadless {
    slot: BackendSlot,
}

impl PlatformDisplayHeadless {
    /// Create a display with no render node yet
    pub fn new(library: Rc<dyn NativeLibrary>) -> Self {
        Self {
            slot: BackendSlot::new(Self::KIND, library),
        }
    }

    /// Create the surfaceless display on the render node opened as `render_node_fd`
    pub fn initialize(&mut self, render_node_fd: i32) -> DisplayResult<()> {
        self.slot.initialize(render_node_fd)
    }

    /// The surfaceless display, `None` until `initialize` succeeds
    pub fn backend(&self) -> Option<NativeHandle> {
        self.slot.backend()
    }

    /// The surfaceless display, failing fast when not initialized
    pub fn try_backend(&self) -> DisplayResult<NativeHandle> {
        self.slot.try_backend()
    }

    /// Render node descriptor the display was created on
    pub fn render_node_fd(&self) -> Option<i32> {
        self.slot.identifier()
    }

    /// Whether a surfaceless display is held
    pub const fn is_initialized(&self) -> bool {
        self.slot.is_initialized()
    }

    /// Always [`BackendKind::Headless`]
    pub const fn kind(&self) -> BackendKind {
        Self::KIND
    }

    /// DRM display handle pointing at the render node
    pub fn raw_display_handle(&self) -> Option<RawDisplayHandle> {
        let fd = self.slot.identifier()?;
        let mut handle = DrmDisplayHandle::empty();
        handle.fd = fd;
        Some(RawDisplayHandle::Drm(handle))
    }
}

display_variant!(PlatformDisplayHeadless, Headless);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::MockNativeLibrary;

    #[test]
    fn test_drm_handle_uses_render_node() {
        let mock = Rc::new(MockNativeLibrary::new());
        let mut display = PlatformDisplayHeadless::new(mock);
        display.initialize(12).unwrap();

        assert_eq!(display.render_node_fd(), Some(12));
        match display.raw_display_handle() {
            Some(RawDisplayHandle::Drm(drm)) => assert_eq!(drm.fd, 12),
            other => panic!("expected DRM handle, got {other:?}"),
        }
    }
}
