//! Platform display registry
//!
//! Bootstrap helpers that sit on top of the display types:
//!
//! - [`select_backend`] picks a [`BackendKind`] from configuration and the
//!   process environment.
//! - [`create_platform_display`] builds and initializes that display, with an
//!   optional headless fallback.
//! - [`bootstrap`] does the above from the process environment after
//!   starting logging.
//! - The shared display slot holds the one "main" display of the current
//!   thread for callers that want singleton-style access.
//!
//! Nothing here is required to use a display; the variant types work on their
//! own.

use crate::config::{BackendPreference, DisplayConfig};
use crate::display::PlatformDisplay;
use crate::error::{DisplayError, DisplayResult, InvalidState};
use crate::kind::BackendKind;
use crate::logging;
use crate::native::NativeLibrary;
use log::{info, warn};
use std::cell::RefCell;
use std::rc::Rc;

/// Environment variable naming the Wayland compositor socket
pub const WAYLAND_DISPLAY_VAR: &str = "WAYLAND_DISPLAY";
/// Environment variable naming the X11 server
pub const X11_DISPLAY_VAR: &str = "DISPLAY";

/// Read a variable from the process environment, treating empty as unset
pub fn system_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

/// Pick the backend to create
///
/// An explicit backend in `config` wins. Otherwise Wayland is chosen when
/// `WAYLAND_DISPLAY` is set, then X11 when `DISPLAY` is set, then the native
/// backend of the target OS, and finally headless.
pub fn select_backend<F>(config: &DisplayConfig, env: F) -> BackendKind
where
    F: Fn(&str) -> Option<String>,
{
    if let BackendPreference::Kind(kind) = config.backend {
        return kind;
    }

    let is_set = |name: &str| env(name).is_some_and(|value| !value.is_empty());

    if is_set(WAYLAND_DISPLAY_VAR) {
        BackendKind::Wayland
    } else if is_set(X11_DISPLAY_VAR) {
        BackendKind::X11
    } else if cfg!(target_os = "windows") {
        BackendKind::Win32
    } else if cfg!(target_os = "macos") {
        BackendKind::Cocoa
    } else {
        BackendKind::Headless
    }
}

/// Create and initialize the display selected by `config`
///
/// # Errors
///
/// - [`DisplayError::Config`] when `config` fails
///   [`validate`](DisplayConfig::validate); no backend is attempted.
/// - The backend's [`DisplayError::Initialization`] when it fails and
///   `config.fallback_to_headless` is off.
/// - [`DisplayError::FallbackFailed`] carrying both errors when the headless
///   fallback fails too. The failed backend is never retried.
pub fn create_platform_display<F>(
    config: &DisplayConfig,
    library: &Rc<dyn NativeLibrary>,
    env: F,
) -> DisplayResult<PlatformDisplay>
where
    F: Fn(&str) -> Option<String>,
{
    config.validate()?;

    let kind = select_backend(config, env);
    let identifier = config.identifier();
    info!("Creating {} platform display (identifier {})", kind, identifier);

    let mut display = PlatformDisplay::new(kind, Rc::clone(library));
    let primary = match display.initialize(identifier) {
        Ok(()) => return Ok(display),
        Err(err) => err,
    };

    let can_fall_back = primary.is_initialization()
        && config.fallback_to_headless
        && kind != BackendKind::Headless;
    if !can_fall_back {
        return Err(primary);
    }

    warn!("{}; falling back to a headless display", primary);
    drop(display);

    let mut headless = PlatformDisplay::new(BackendKind::Headless, Rc::clone(library));
    match headless.initialize(config.headless_identifier) {
        Ok(()) => Ok(headless),
        Err(fallback) => {
            warn!("Headless fallback failed: {}", fallback);
            Err(DisplayError::FallbackFailed {
                primary: Box::new(primary),
                fallback: Box::new(fallback),
            })
        }
    }
}

/// Application entry point for the display layer
///
/// Validates `config`, starts logging with `config.log_level`, and creates the
/// display selected from `config` and the process environment.
///
/// # Errors
///
/// Same as [`create_platform_display`].
pub fn bootstrap(
    config: &DisplayConfig,
    library: &Rc<dyn NativeLibrary>,
) -> DisplayResult<PlatformDisplay> {
    config.validate()?;
    logging::init_with_filter(&config.log_level);
    create_platform_display(config, library, system_env)
}

thread_local! {
    static SHARED_DISPLAY: RefCell<Option<PlatformDisplay>> = const { RefCell::new(None) };
}

/// Make `display` the shared display of the current thread
///
/// Must not be called from inside [`with_shared`].
///
/// # Errors
///
/// [`InvalidState::SharedDisplayInstalled`] if one is already installed. The
/// rejected display is dropped, releasing its backend.
pub fn install_shared(display: PlatformDisplay) -> DisplayResult<()> {
    SHARED_DISPLAY.with(|slot| {
        let mut slot = slot.borrow_mut();
        if let Some(existing) = slot.as_ref() {
            warn!(
                "Refusing to install {} display: {} display is already shared",
                display.kind(),
                existing.kind()
            );
            return Err(DisplayError::InvalidState {
                kind: display.kind(),
                state: InvalidState::SharedDisplayInstalled,
            });
        }

        info!("Installed shared {} display", display.kind());
        *slot = Some(display);
        Ok(())
    })
}

/// Run `f` on the shared display of the current thread, if any
pub fn with_shared<R>(f: impl FnOnce(&PlatformDisplay) -> R) -> Option<R> {
    SHARED_DISPLAY.with(|slot| slot.borrow().as_ref().map(f))
}

/// Whether the current thread has a shared display
pub fn has_shared() -> bool {
    SHARED_DISPLAY.with(|slot| slot.borrow().is_some())
}

/// Remove and return the shared display of the current thread
pub fn take_shared() -> Option<PlatformDisplay> {
    SHARED_DISPLAY.with(|slot| slot.borrow_mut().take())
}
