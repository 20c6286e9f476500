//! Platform displays
//!
//! A [`PlatformDisplay`] is a labelled owner of one native display handle.
//! The rest of the engine receives it without knowing which windowing backend
//! is present, asks it for [`capabilities`](PlatformDisplay::capabilities),
//! and downcasts to a concrete variant only where backend-specific access is
//! unavoidable.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────┐
//! │ PlatformDisplay (enum)        │ ← kind(), backend(), downcast_ref::<V>()
//! └──────────────┬────────────────┘
//!                │ one of
//!  ┌─────────────▼──────────────┐
//!  │ PlatformDisplayWpe         │
//!  │ PlatformDisplayX11         │  each owns a BackendSlot
//!  │ PlatformDisplayWayland     │  (set-once OwnedBackend)
//!  │ PlatformDisplayWin32       │
//!  │ PlatformDisplayCocoa       │
//!  │ PlatformDisplayHeadless    │
//!  └────────────────────────────┘
//! ```
//!
//! # Downcasting
//!
//! The kind of a display is read off the active enum variant, and the
//! [`DisplayVariant`] impls match that same variant. Each variant type names
//! its enum arm once, and that name also selects its `KIND`, so `kind()` and
//! the downcast helpers cannot drift apart.

// `PlatformDisplay` arms and `BackendKind` variants share their names, so one
// identifier fixes both the enum arm and the reported kind.
macro_rules! display_variant {
    ($display:ident, $variant:ident) => {
        impl $crate::display::private::Sealed for $display {}

        impl $crate::display::DisplayVariant for $display {
            const KIND: $crate::kind::BackendKind = $crate::kind::BackendKind::$variant;

            fn from_display(display: &$crate::display::PlatformDisplay) -> Option<&Self> {
                match display {
                    $crate::display::PlatformDisplay::$variant(inner) => Some(inner),
                    _ => None,
                }
            }

            fn from_display_mut(
                display: &mut $crate::display::PlatformDisplay,
            ) -> Option<&mut Self> {
                match display {
                    $crate::display::PlatformDisplay::$variant(inner) => Some(inner),
                    _ => None,
                }
            }

            fn from_display_owned(
                display: $crate::display::PlatformDisplay,
            ) -> Result<Self, $crate::display::PlatformDisplay> {
                match display {
                    $crate::display::PlatformDisplay::$variant(inner) => Ok(inner),
                    other => Err(other),
                }
            }
        }

        impl From<$display> for $crate::display::PlatformDisplay {
            fn from(display: $display) -> Self {
                Self::$variant(display)
            }
        }
    };
}

mod cocoa;
mod headless;
mod slot;
mod wayland;
mod win32;
mod wpe;
mod x11;

pub use cocoa::PlatformDisplayCocoa;
pub use headless::PlatformDisplayHeadless;
pub use wayland::PlatformDisplayWayland;
pub use win32::PlatformDisplayWin32;
pub use wpe::PlatformDisplayWpe;
pub use x11::PlatformDisplayX11;

use crate::capabilities::DisplayCapabilities;
use crate::error::DisplayResult;
use crate::kind::BackendKind;
use crate::native::{NativeHandle, NativeLibrary};
use raw_window_handle::RawDisplayHandle;
use std::rc::Rc;

mod private {
    pub trait Sealed {}
}

/// Association between a concrete display type and its [`BackendKind`]
///
/// Implemented only by the variant types of this crate.
pub trait DisplayVariant: private::Sealed + Sized {
    /// Kind every instance of this type reports
    const KIND: BackendKind;

    /// Borrow `display` as this variant, if it is one
    fn from_display(display: &PlatformDisplay) -> Option<&Self>;

    /// Mutably borrow `display` as this variant, if it is one
    fn from_display_mut(display: &mut PlatformDisplay) -> Option<&mut Self>;

    /// Unwrap `display` into this variant, handing it back untouched otherwise
    fn from_display_owned(display: PlatformDisplay) -> Result<Self, PlatformDisplay>;
}

/// A native display connection of one of the supported backends
#[derive(Debug)]
pub enum PlatformDisplay {
    /// X11 server connection
    X11(PlatformDisplayX11),
    /// Wayland compositor connection
    Wayland(PlatformDisplayWayland),
    /// WPE EGL renderer backend
    Wpe(PlatformDisplayWpe),
    /// Win32 display device
    Win32(PlatformDisplayWin32),
    /// Cocoa screen
    Cocoa(PlatformDisplayCocoa),
    /// Surfaceless display
    Headless(PlatformDisplayHeadless),
}

impl PlatformDisplay {
    /// Construct an uninitialized display of `kind`
    pub fn new(kind: BackendKind, library: Rc<dyn NativeLibrary>) -> Self {
        match kind {
            BackendKind::X11 => Self::X11(PlatformDisplayX11::new(library)),
            BackendKind::Wayland => Self::Wayland(PlatformDisplayWayland::new(library)),
            BackendKind::Wpe => Self::Wpe(PlatformDisplayWpe::new(library)),
            BackendKind::Win32 => Self::Win32(PlatformDisplayWin32::new(library)),
            BackendKind::Cocoa => Self::Cocoa(PlatformDisplayCocoa::new(library)),
            BackendKind::Headless => Self::Headless(PlatformDisplayHeadless::new(library)),
        }
    }

    /// Backend this display belongs to
    pub const fn kind(&self) -> BackendKind {
        match self {
            Self::X11(_) => PlatformDisplayX11::KIND,
            Self::Wayland(_) => PlatformDisplayWayland::KIND,
            Self::Wpe(_) => PlatformDisplayWpe::KIND,
            Self::Win32(_) => PlatformDisplayWin32::KIND,
            Self::Cocoa(_) => PlatformDisplayCocoa::KIND,
            Self::Headless(_) => PlatformDisplayHeadless::KIND,
        }
    }

    /// Acquire the native backend from `identifier`
    ///
    /// See [`PlatformDisplayWpe::initialize`] for the exact contract; every
    /// variant follows it.
    pub fn initialize(&mut self, identifier: i32) -> DisplayResult<()> {
        match self {
            Self::X11(display) => display.initialize(identifier),
            Self::Wayland(display) => display.initialize(identifier),
            Self::Wpe(display) => display.initialize(identifier),
            Self::Win32(display) => display.initialize(identifier),
            Self::Cocoa(display) => display.initialize(identifier),
            Self::Headless(display) => display.initialize(identifier),
        }
    }

    /// Native backend handle, `None` until `initialize` succeeds
    pub fn backend(&self) -> Option<NativeHandle> {
        match self {
            Self::X11(display) => display.backend(),
            Self::Wayland(display) => display.backend(),
            Self::Wpe(display) => display.backend(),
            Self::Win32(display) => display.backend(),
            Self::Cocoa(display) => display.backend(),
            Self::Headless(display) => display.backend(),
        }
    }

    /// Native backend handle, failing fast if `initialize` has not succeeded
    pub fn try_backend(&self) -> DisplayResult<NativeHandle> {
        match self {
            Self::X11(display) => display.try_backend(),
            Self::Wayland(display) => display.try_backend(),
            Self::Wpe(display) => display.try_backend(),
            Self::Win32(display) => display.try_backend(),
            Self::Cocoa(display) => display.try_backend(),
            Self::Headless(display) => display.try_backend(),
        }
    }

    /// Whether the display owns a native backend
    pub fn is_initialized(&self) -> bool {
        self.backend().is_some()
    }

    /// What the display can be used for
    ///
    /// Generic engine code should branch on this rather than on [`kind`](Self::kind).
    pub const fn capabilities(&self) -> DisplayCapabilities {
        DisplayCapabilities::for_kind(self.kind())
    }

    /// The display as a `raw-window-handle` value for surface creation
    ///
    /// `None` until initialized, and always `None` for WPE, which has no
    /// `raw-window-handle` counterpart.
    pub fn raw_display_handle(&self) -> Option<RawDisplayHandle> {
        match self {
            Self::X11(display) => display.raw_display_handle(),
            Self::Wayland(display) => display.raw_display_handle(),
            Self::Wpe(_) => None,
            Self::Win32(display) => display.raw_display_handle(),
            Self::Cocoa(display) => display.raw_display_handle(),
            Self::Headless(display) => display.raw_display_handle(),
        }
    }

    /// Whether this display is a `V`
    pub fn is<V: DisplayVariant>(&self) -> bool {
        V::from_display(self).is_some()
    }

    /// Borrow as variant `V`, or `None` if it is another backend
    pub fn downcast_ref<V: DisplayVariant>(&self) -> Option<&V> {
        V::from_display(self)
    }

    /// Mutably borrow as variant `V`, or `None` if it is another backend
    pub fn downcast_mut<V: DisplayVariant>(&mut self) -> Option<&mut V> {
        V::from_display_mut(self)
    }

    /// Convert into variant `V`, returning `self` unchanged on mismatch
    ///
    /// # Errors
    ///
    /// Returns the original display when it is not a `V`.
    pub fn downcast<V: DisplayVariant>(self) -> Result<V, Self> {
        V::from_display_owned(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvalidState;
    use crate::native::MockNativeLibrary;

    fn all_displays(mock: &Rc<MockNativeLibrary>) -> Vec<PlatformDisplay> {
        BackendKind::ALL
            .into_iter()
            .map(|kind| PlatformDisplay::new(kind, mock.clone()))
            .collect()
    }

    #[test]
    fn test_new_matches_requested_kind() {
        let mock = Rc::new(MockNativeLibrary::new());
        for (kind, display) in BackendKind::ALL.into_iter().zip(all_displays(&mock)) {
            assert_eq!(display.kind(), kind);
            assert!(!display.is_initialized());
        }
        assert_eq!(mock.acquired_count(), 0);
    }

    #[test]
    fn test_downcast_only_to_own_variant() {
        let mock = Rc::new(MockNativeLibrary::new());
        for display in all_displays(&mock) {
            let kind = display.kind();
            assert_eq!(display.is::<PlatformDisplayX11>(), kind == BackendKind::X11);
            assert_eq!(display.is::<PlatformDisplayWayland>(), kind == BackendKind::Wayland);
            assert_eq!(display.is::<PlatformDisplayWpe>(), kind == BackendKind::Wpe);
            assert_eq!(display.is::<PlatformDisplayWin32>(), kind == BackendKind::Win32);
            assert_eq!(display.is::<PlatformDisplayCocoa>(), kind == BackendKind::Cocoa);
            assert_eq!(display.is::<PlatformDisplayHeadless>(), kind == BackendKind::Headless);
        }
    }

    fn claimed_kind<V: DisplayVariant>(display: &PlatformDisplay) -> Option<BackendKind> {
        display.is::<V>().then_some(V::KIND)
    }

    #[test]
    fn test_matching_variant_reports_display_kind() {
        let mock = Rc::new(MockNativeLibrary::new());
        for display in all_displays(&mock) {
            let claims: Vec<BackendKind> = [
                claimed_kind::<PlatformDisplayX11>(&display),
                claimed_kind::<PlatformDisplayWayland>(&display),
                claimed_kind::<PlatformDisplayWpe>(&display),
                claimed_kind::<PlatformDisplayWin32>(&display),
                claimed_kind::<PlatformDisplayCocoa>(&display),
                claimed_kind::<PlatformDisplayHeadless>(&display),
            ]
            .into_iter()
            .flatten()
            .collect();
            assert_eq!(claims, vec![display.kind()]);
        }
    }

    #[test]
    fn test_downcast_owned_returns_original_on_mismatch() {
        let mock = Rc::new(MockNativeLibrary::new());
        let mut display = PlatformDisplay::new(BackendKind::Wayland, mock.clone());
        display.initialize(5).unwrap();
        let handle = display.backend().unwrap();

        let display = display.downcast::<PlatformDisplayWpe>().unwrap_err();
        assert_eq!(display.kind(), BackendKind::Wayland);
        assert_eq!(display.backend(), Some(handle));
        assert_eq!(mock.released_count(), 0);

        let wayland = display.downcast::<PlatformDisplayWayland>().unwrap();
        assert_eq!(wayland.backend(), Some(handle));
    }

    #[test]
    fn test_initialize_through_downcast_mut() {
        let mock = Rc::new(MockNativeLibrary::new());
        let mut display = PlatformDisplay::new(BackendKind::Wpe, mock.clone());

        assert!(display.downcast_mut::<PlatformDisplayX11>().is_none());
        display
            .downcast_mut::<PlatformDisplayWpe>()
            .unwrap()
            .initialize(7)
            .unwrap();

        assert!(display.is_initialized());
        assert_eq!(
            display.initialize(7).unwrap_err().invalid_state(),
            Some(InvalidState::AlreadyInitialized)
        );
    }

    #[test]
    fn test_try_backend_before_initialize() {
        let mock = Rc::new(MockNativeLibrary::new());
        for display in all_displays(&mock) {
            let err = display.try_backend().unwrap_err();
            assert_eq!(err.invalid_state(), Some(InvalidState::NotInitialized));
            assert!(display.raw_display_handle().is_none());
        }
    }

    #[test]
    fn test_raw_handle_matches_capability() {
        let mock = Rc::new(MockNativeLibrary::new());
        for mut display in all_displays(&mock) {
            display.initialize(3).unwrap();
            let exports = display
                .capabilities()
                .contains(DisplayCapabilities::RAW_DISPLAY_HANDLE);
            assert_eq!(display.raw_display_handle().is_some(), exports, "{}", display.kind());
        }
    }

    #[test]
    fn test_drop_releases_each_backend_once() {
        let mock = Rc::new(MockNativeLibrary::new());
        let mut handles = Vec::new();
        for mut display in all_displays(&mock) {
            display.initialize(1).unwrap();
            handles.push(display.backend().unwrap());
        }

        assert_eq!(mock.released_count(), BackendKind::ALL.len());
        for handle in handles {
            assert_eq!(mock.release_count(handle), 1);
        }
    }
}
