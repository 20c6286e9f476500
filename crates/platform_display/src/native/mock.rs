//! In-process stand-in for the native graphics library
//!
//! [`MockNativeLibrary`] hands out fake, increasing handles and records every
//! call, so tests and headless bootstrap code can drive the full display
//! lifecycle without a GPU. Negative identifiers are always refused, matching
//! what the real libraries do with an invalid descriptor; further identifiers
//! can be refused with [`MockNativeLibrary::rejecting`].

use super::{NativeHandle, NativeLibrary};
use crate::kind::BackendKind;
use std::cell::RefCell;
use std::collections::HashSet;

const FIRST_HANDLE: usize = 0x1000;
const HANDLE_STRIDE: usize = 0x10;

/// One recorded call into the mock library
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockEvent {
    /// A backend was created
    Acquired {
        /// Requested backend
        kind: BackendKind,
        /// Identifier it was bound to
        identifier: i32,
        /// Handle that was handed out
        handle: NativeHandle,
    },
    /// A creation request was refused
    Refused {
        /// Requested backend
        kind: BackendKind,
        /// Identifier that was refused
        identifier: i32,
    },
    /// A backend was destroyed
    Released {
        /// Backend kind reported by the caller
        kind: BackendKind,
        /// Handle that was given back
        handle: NativeHandle,
    },
}

#[derive(Debug, Default)]
struct MockState {
    next_handle: usize,
    events: Vec<MockEvent>,
}

/// Recording fake of [`NativeLibrary`]
#[derive(Debug, Default)]
pub struct MockNativeLibrary {
    refused: HashSet<i32>,
    state: RefCell<MockState>,
}

impl MockNativeLibrary {
    /// Create a mock that accepts every non-negative identifier
    pub fn new() -> Self {
        Self::default()
    }

    /// Also refuse `identifier`
    pub fn rejecting(mut self, identifier: i32) -> Self {
        self.refused.insert(identifier);
        self
    }

    /// Every call recorded so far, oldest first
    pub fn events(&self) -> Vec<MockEvent> {
        self.state.borrow().events.clone()
    }

    /// Number of backends created
    pub fn acquired_count(&self) -> usize {
        self.count(|event| matches!(event, MockEvent::Acquired { .. }))
    }

    /// Number of refused creation requests
    pub fn refused_count(&self) -> usize {
        self.count(|event| matches!(event, MockEvent::Refused { .. }))
    }

    /// Number of backends destroyed
    pub fn released_count(&self) -> usize {
        self.count(|event| matches!(event, MockEvent::Released { .. }))
    }

    /// How many times `handle` was given back
    pub fn release_count(&self, handle: NativeHandle) -> usize {
        self.count(|event| matches!(event, MockEvent::Released { handle: h, .. } if *h == handle))
    }

    /// Whether `handle` was created and not yet released
    pub fn is_live(&self, handle: NativeHandle) -> bool {
        let created = self.count(
            |event| matches!(event, MockEvent::Acquired { handle: h, .. } if *h == handle),
        );
        created > self.release_count(handle)
    }

    fn count(&self, predicate: impl Fn(&MockEvent) -> bool) -> usize {
        self.state.borrow().events.iter().filter(|event| predicate(*event)).count()
    }
}

impl NativeLibrary for MockNativeLibrary {
    fn acquire(&self, kind: BackendKind, identifier: i32) -> Result<NativeHandle, String> {
        let mut state = self.state.borrow_mut();

        if identifier < 0 || self.refused.contains(&identifier) {
            state.events.push(MockEvent::Refused { kind, identifier });
            return Err(format!("{kind} backend refused identifier {identifier}"));
        }

        let raw = FIRST_HANDLE + state.next_handle * HANDLE_STRIDE;
        state.next_handle += 1;
        let handle = NativeHandle::new(raw)
            .ok_or_else(|| format!("{kind} backend produced a null handle"))?;

        state.events.push(MockEvent::Acquired {
            kind,
            identifier,
            handle,
        });
        Ok(handle)
    }

    fn release(&self, kind: BackendKind, handle: NativeHandle) {
        self.state
            .borrow_mut()
            .events
            .push(MockEvent::Released { kind, handle });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_are_distinct() {
        let mock = MockNativeLibrary::new();
        let first = mock.acquire(BackendKind::X11, 0).unwrap();
        let second = mock.acquire(BackendKind::X11, 0).unwrap();

        assert_ne!(first, second);
        assert_eq!(first.get(), FIRST_HANDLE);
        assert_eq!(mock.acquired_count(), 2);
    }

    #[test]
    fn test_refuses_negative_and_listed_identifiers() {
        let mock = MockNativeLibrary::new().rejecting(9);

        assert!(mock.acquire(BackendKind::Wpe, -1).is_err());
        assert!(mock.acquire(BackendKind::Wpe, 9).is_err());
        assert!(mock.acquire(BackendKind::Wpe, 7).is_ok());

        assert_eq!(mock.refused_count(), 2);
        assert_eq!(mock.acquired_count(), 1);
        assert_eq!(
            mock.events()[0],
            MockEvent::Refused {
                kind: BackendKind::Wpe,
                identifier: -1
            }
        );
    }

    #[test]
    fn test_release_tracking() {
        let mock = MockNativeLibrary::new();
        let handle = mock.acquire(BackendKind::Headless, 3).unwrap();
        assert!(mock.is_live(handle));

        mock.release(BackendKind::Headless, handle);
        assert!(!mock.is_live(handle));
        assert_eq!(mock.release_count(handle), 1);
        assert_eq!(mock.released_count(), 1);
    }
}
