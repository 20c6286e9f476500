//! Capability queries
//!
//! Engine code that only needs to know *what* a display can do should test
//! these flags instead of matching on [`BackendKind`].

use crate::kind::BackendKind;
use bitflags::bitflags;

bitflags! {
    /// What a platform display can be used for
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DisplayCapabilities: u32 {
        /// Exports a `raw-window-handle` display handle
        const RAW_DISPLAY_HANDLE = 1 << 0;
        /// Owns an EGL renderer backend rather than a windowing connection
        const EGL_RENDERER_BACKEND = 1 << 1;
        /// Bound to a descriptor shared with a host process
        const HOST_FD_SHARING = 1 << 2;
        /// Cannot present to on-screen windows
        const OFFSCREEN_ONLY = 1 << 3;
        /// Can create native top-level windows
        const NATIVE_WINDOWS = 1 << 4;
    }
}

impl DisplayCapabilities {
    /// Capabilities every display of `kind` has
    pub const fn for_kind(kind: BackendKind) -> Self {
        match kind {
            BackendKind::X11 | BackendKind::Wayland | BackendKind::Win32 | BackendKind::Cocoa => {
                Self::RAW_DISPLAY_HANDLE.union(Self::NATIVE_WINDOWS)
            }
            BackendKind::Wpe => Self::EGL_RENDERER_BACKEND.union(Self::HOST_FD_SHARING),
            BackendKind::Headless => Self::RAW_DISPLAY_HANDLE.union(Self::OFFSCREEN_ONLY),
        }
    }
}
