//! The `log` module defines an interface to `roster`'s internal logging facilities, used to
//! report failures such as a model constructor rejecting an entity. Hosts can use the same
//! facilities for their own messages.
//!
//! This module (re)exports the five logging macros: `error!`, `warn!`, `info!`, `debug!` and
//! `trace!` where `error!` represents the highest-priority log messages and `trace!` the
//! lowest. To emit a log message, simply use one of these macros in your code:
//!
//! ```rust
//! use roster::info;
//!
//! pub fn do_a_thing() {
//!     info!("A thing is being done.");
//! }
//! ```
//!
//! Logging is _disabled_ by default. Log messages are enabled/disabled using the functions:
//!
//!  - `enable_logging()`: turns on all log messages
//!  - `disable_logging()`: turns off all log messages
//!  - `set_log_level(level: LevelFilter)`: enables only log messages with priority at least `level`

use env_logger::Builder;
pub use log::{debug, error, info, trace, warn, LevelFilter};

use std::sync::Once;

// Logging disabled.
const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Off;

static INIT_LOGGER: Once = Once::new();

/// Enables the logger with no global level filter / full logging. Equivalent to
/// `set_log_level(LevelFilter::Trace)`.
pub fn enable_logging() {
    set_log_level(LevelFilter::Trace);
}

/// Turns off all log messages.
pub fn disable_logging() {
    set_log_level(DEFAULT_LOG_LEVEL);
}

/// Sets the global log level. A level of `LevelFilter::Off` disables logging.
pub fn set_log_level(level: LevelFilter) {
    INIT_LOGGER.call_once(|| {
        // The process-wide logger can only be installed once, so it is
        // installed wide open and `log::set_max_level` does the filtering
        // from here on.
        let _ = Builder::new().filter_level(LevelFilter::Trace).try_init();
    });
    log::set_max_level(level);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_can_be_adjusted_after_installation() {
        set_log_level(LevelFilter::Debug);
        assert_eq!(log::max_level(), LevelFilter::Debug);

        set_log_level(LevelFilter::Warn);
        assert_eq!(log::max_level(), LevelFilter::Warn);

        disable_logging();
        assert_eq!(log::max_level(), LevelFilter::Off);
    }
}
