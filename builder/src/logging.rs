//! Diagnostic logging for the builder binary.
//!
//! The library logs through the `log` facade. The binary installs a
//! `tracing-subscriber` formatter on stderr, which also captures `log`
//! records. `SMELLYBLOX_LOG` takes precedence over `RUST_LOG`; when neither
//! is set the level follows `-v`/`-q`.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a log filter directive.
pub const LOG_ENV: &str = "SMELLYBLOX_LOG";

/// Error returned when a global logger is already installed.
pub type InitError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Map CLI verbosity flags to a default filter directive.
///
/// # Examples
///
/// ```
/// use smellyblox_builder::logging::default_directive;
///
/// assert_eq!(default_directive(0, false), "warn");
/// assert_eq!(default_directive(2, false), "debug");
/// assert_eq!(default_directive(0, true), "error");
/// ```
#[must_use]
pub fn default_directive(verbosity: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the stderr log subscriber.
///
/// # Errors
///
/// Returns [`InitError`] if a global subscriber or logger is already set.
pub fn init_logging(verbosity: u8, quiet: bool) -> Result<(), InitError> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity, quiet)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init()
}
