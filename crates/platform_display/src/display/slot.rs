//! Set-once storage for a display's native backend

use crate::error::{DisplayError, DisplayResult, InvalidState};
use crate::kind::BackendKind;
use crate::native::{NativeHandle, NativeLibrary, OwnedBackend};
use log::{info, warn};
use std::fmt;
use std::rc::Rc;

/// Holds at most one [`OwnedBackend`] for a display variant.
///
/// Empty after construction and after a refused `initialize`. Once filled it
/// stays filled until the slot is dropped.
pub(crate) struct BackendSlot {
    kind: BackendKind,
    library: Rc<dyn NativeLibrary>,
    backend: Option<OwnedBackend>,
}

impl BackendSlot {
    pub(crate) fn new(kind: BackendKind, library: Rc<dyn NativeLibrary>) -> Self {
        Self {
            kind,
            library,
            backend: None,
        }
    }

    pub(crate) fn initialize(&mut self, identifier: i32) -> DisplayResult<()> {
        if let Some(existing) = &self.backend {
            warn!(
                "{} display already owns native backend {}; refusing to initialize again with {}",
                self.kind,
                existing.handle(),
                identifier
            );
            return Err(self.state_error(InvalidState::AlreadyInitialized));
        }

        let backend = OwnedBackend::acquire(Rc::clone(&self.library), self.kind, identifier)?;
        info!(
            "{} display initialized with native backend {}",
            self.kind,
            backend.handle()
        );
        self.backend = Some(backend);
        Ok(())
    }

    pub(crate) fn backend(&self) -> Option<NativeHandle> {
        self.backend.as_ref().map(OwnedBackend::handle)
    }

    pub(crate) fn try_backend(&self) -> DisplayResult<NativeHandle> {
        self.backend()
            .ok_or_else(|| self.state_error(InvalidState::NotInitialized))
    }

    /// Identifier the held backend was created from
    pub(crate) fn identifier(&self) -> Option<i32> {
        self.backend.as_ref().map(OwnedBackend::identifier)
    }

    pub(crate) const fn is_initialized(&self) -> bool {
        self.backend.is_some()
    }

    const fn state_error(&self, state: InvalidState) -> DisplayError {
        DisplayError::InvalidState {
            kind: self.kind,
            state,
        }
    }
}

impl fmt::Debug for BackendSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendSlot")
            .field("kind", &self.kind)
            .field("backend", &self.backend)
            .finish_non_exhaustive()
    }
}
