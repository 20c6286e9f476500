//! Logging utilities

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system from `RUST_LOG`
///
/// Safe to call more than once; later calls leave the first logger in place.
pub fn init() {
    if env_logger::try_init().is_err() {
        debug!("Logger already initialized");
    }
}

/// Initialize the logging system with an explicit filter such as `"debug"` or
/// `"platform_display=trace"`
pub fn init_with_filter(filter: &str) {
    let result = env_logger::Builder::new().parse_filters(filter).try_init();
    if result.is_err() {
        debug!("Logger already initialized; ignoring filter {}", filter);
    }
}
