//! Native backend handles
//!
//! The graphics library that actually creates EGL backends, X connections and
//! so on lives outside this crate. It is reached through the [`NativeLibrary`]
//! trait, and every handle it hands out is wrapped in an [`OwnedBackend`] that
//! gives it back exactly once when dropped.
//!
//! # Ownership
//!
//! ```text
//! PlatformDisplay ──owns──▶ OwnedBackend ──release on drop──▶ NativeLibrary
//! ```
//!
//! Handles are never shared: `OwnedBackend` is neither `Clone` nor `Copy`, and
//! the library reference is an `Rc`, which keeps every display on the thread
//! that created it.

pub mod mock;

pub use mock::{MockEvent, MockNativeLibrary};

use crate::error::{DisplayError, DisplayResult};
use crate::kind::BackendKind;
use log::debug;
use std::ffi::c_void;
use std::fmt;
use std::num::NonZeroUsize;
use std::rc::Rc;

/// Opaque handle to a resource owned by the native graphics library
///
/// The value is never dereferenced here; it only travels back to the library
/// or out through [`raw_display_handle`](crate::PlatformDisplay::raw_display_handle).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativeHandle(NonZeroUsize);

impl NativeHandle {
    /// Wrap a raw handle value, rejecting null
    pub const fn new(raw: usize) -> Option<Self> {
        match NonZeroUsize::new(raw) {
            Some(raw) => Some(Self(raw)),
            None => None,
        }
    }

    /// Wrap a handle value known to be non-null
    pub const fn from_non_zero(raw: NonZeroUsize) -> Self {
        Self(raw)
    }

    /// Raw handle value
    pub const fn get(self) -> usize {
        self.0.get()
    }

    /// Handle value as an untyped pointer for native APIs
    pub fn as_ptr(self) -> *mut c_void {
        self.0.get() as *mut c_void
    }
}

impl fmt::Display for NativeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Boundary to the native graphics library
///
/// Implementations create and destroy the per-backend native resources. The
/// `identifier` is whatever integer the windowing bootstrap hands over: a host
/// file descriptor for WPE, a socket descriptor for Wayland, and so on.
pub trait NativeLibrary {
    /// Create the native backend of `kind` bound to `identifier`
    ///
    /// Returns the reason reported by the library when it refuses.
    fn acquire(&self, kind: BackendKind, identifier: i32) -> Result<NativeHandle, String>;

    /// Destroy a backend previously returned by [`acquire`](Self::acquire)
    ///
    /// Teardown is best-effort; failures are the library's to log.
    fn release(&self, kind: BackendKind, handle: NativeHandle);
}

/// Uniquely owned native backend, released when dropped
pub struct OwnedBackend {
    kind: BackendKind,
    identifier: i32,
    handle: NativeHandle,
    library: Rc<dyn NativeLibrary>,
}

impl OwnedBackend {
    /// Ask `library` for a backend of `kind` bound to `identifier`
    ///
    /// A refusal is reported as [`DisplayError::Initialization`]; nothing is
    /// held in that case.
    pub fn acquire(
        library: Rc<dyn NativeLibrary>,
        kind: BackendKind,
        identifier: i32,
    ) -> DisplayResult<Self> {
        let handle = library
            .acquire(kind, identifier)
            .map_err(|reason| DisplayError::Initialization {
                kind,
                identifier,
                reason,
            })?;

        debug!("Acquired {} native backend {} for identifier {}", kind, handle, identifier);

        Ok(Self {
            kind,
            identifier,
            handle,
            library,
        })
    }

    /// The native handle
    pub const fn handle(&self) -> NativeHandle {
        self.handle
    }

    /// Backend kind the handle was created for
    pub const fn kind(&self) -> BackendKind {
        self.kind
    }

    /// Identifier the handle was created from
    pub const fn identifier(&self) -> i32 {
        self.identifier
    }
}

impl fmt::Debug for OwnedBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OwnedBackend")
            .field("kind", &self.kind)
            .field("identifier", &self.identifier)
            .field("handle", &self.handle)
            .finish_non_exhaustive()
    }
}

impl Drop for OwnedBackend {
    fn drop(&mut self) {
        debug!("Releasing {} native backend {}", self.kind, self.handle);
        self.library.release(self.kind, self.handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_handle_rejects_null() {
        assert!(NativeHandle::new(0).is_none());
        let handle = NativeHandle::new(0x2a).unwrap();
        assert_eq!(handle.get(), 0x2a);
        assert_eq!(handle.as_ptr() as usize, 0x2a);
        assert_eq!(handle.to_string(), "0x2a");
    }

    #[test]
    fn test_owned_backend_releases_once_on_drop() {
        let mock = Rc::new(MockNativeLibrary::new());
        let backend = OwnedBackend::acquire(mock.clone(), BackendKind::Wpe, 7).unwrap();
        let handle = backend.handle();

        assert_eq!(backend.kind(), BackendKind::Wpe);
        assert_eq!(backend.identifier(), 7);
        assert!(mock.is_live(handle));

        drop(backend);
        assert_eq!(mock.release_count(handle), 1);
        assert!(!mock.is_live(handle));
    }

    #[test]
    fn test_refused_acquire_holds_nothing() {
        let mock = Rc::new(MockNativeLibrary::new());
        let err = OwnedBackend::acquire(mock.clone(), BackendKind::Wayland, -3).unwrap_err();

        match err {
            DisplayError::Initialization { kind, identifier, .. } => {
                assert_eq!(kind, BackendKind::Wayland);
                assert_eq!(identifier, -3);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(mock.acquired_count(), 0);
        assert_eq!(mock.released_count(), 0);
    }
}
