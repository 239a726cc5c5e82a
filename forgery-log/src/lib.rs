//! Logging for forgery
//!
//! A small logging facade shared by every forgery crate. Records go to
//! stderr; verbosity and shape are controlled from the environment so that
//! template authors can watch directive dispatch without recompiling.
//!
//! # Usage
//!
//! ```rust
//! use forgery_log::{debug, info, trace};
//!
//! info!("Faker ready for locale {}", "zh_CN");
//! debug!(target: "forgery::expander", "dispatching {}", "#{Name.first_name}");
//! trace!("probing {} in {}", "name.first_name", "zh");
//! ```
//!
//! # Environment Variables
//!
//! - `FORGERY_DEBUG=1` - shorthand for debug level
//! - `FORGERY_LOG_LEVEL=trace|debug|info|warn|error|off` - minimum level (default `warn`)
//! - `FORGERY_LOG_FORMAT=pretty|compact|json` - line shape (default `pretty`)
//! - `FORGERY_LOG_TIMESTAMPS=1|0` - prefix timestamps (default on)

mod level;
mod output;

pub use level::{Format, Level};

use once_cell::sync::Lazy;
use std::env;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

/// Threshold and debug switch, seeded from [`LogConfig`] on first use.
struct Filter {
    threshold: AtomicU8,
    debug: AtomicBool,
}

static FILTER: Filter = Filter {
    threshold: AtomicU8::new(Level::Warn as u8),
    debug: AtomicBool::new(false),
};

static CONFIG: Lazy<LogConfig> = Lazy::new(|| {
    let config = LogConfig::from_env();
    FILTER.debug.store(config.debug, Ordering::SeqCst);
    FILTER.threshold.store(config.effective_level() as u8, Ordering::SeqCst);
    config
});

/// Logging configuration, read once from the environment.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// `FORGERY_DEBUG` was set
    pub debug: bool,
    /// Minimum level written
    pub level: Level,
    /// Line shape
    pub format: Format,
    /// Prefix each line with a timestamp
    pub timestamps: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            debug: false,
            level: Level::Warn,
            format: Format::Pretty,
            timestamps: true,
        }
    }
}

impl LogConfig {
    /// Build a configuration from `FORGERY_*` variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let debug = env_flag("FORGERY_DEBUG").unwrap_or(false);

        Self {
            debug,
            level: env_parse("FORGERY_LOG_LEVEL").unwrap_or(if debug {
                Level::Debug
            } else {
                defaults.level
            }),
            format: env_parse("FORGERY_LOG_FORMAT").unwrap_or(defaults.format),
            timestamps: env_flag("FORGERY_LOG_TIMESTAMPS").unwrap_or(defaults.timestamps),
        }
    }

    /// `level`, lowered to debug when the debug switch is on.
    pub fn effective_level(&self) -> Level {
        if self.debug { self.level.min(Level::Debug) } else { self.level }
    }
}

fn env_flag(name: &str) -> Option<bool> {
    env::var(name)
        .ok()
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

/// Read the environment now instead of on the first record.
pub fn init() {
    Lazy::force(&CONFIG);
}

/// The configuration read at startup.
pub fn config() -> &'static LogConfig {
    &CONFIG
}

/// Whether the debug switch is on.
pub fn is_debug_enabled() -> bool {
    init();
    FILTER.debug.load(Ordering::Relaxed)
}

/// Whether a record at `level` would be written.
#[inline]
pub fn is_level_enabled(level: Level) -> bool {
    init();
    level != Level::Off && level as u8 >= FILTER.threshold.load(Ordering::Relaxed)
}

pub fn current_level() -> Level {
    init();
    Level::from_u8(FILTER.threshold.load(Ordering::Relaxed))
}

/// Change the minimum level at runtime.
pub fn set_level(level: Level) {
    init();
    FILTER.threshold.store(level as u8, Ordering::SeqCst);
}

/// Flip the debug switch; turning it on also lowers the threshold to debug.
pub fn set_debug(enabled: bool) {
    init();
    FILTER.debug.store(enabled, Ordering::SeqCst);
    if enabled {
        FILTER.threshold.fetch_min(Level::Debug as u8, Ordering::SeqCst);
    }
}

#[doc(hidden)]
pub fn log(level: Level, target: &str, args: fmt::Arguments<'_>) {
    if !is_level_enabled(level) {
        return;
    }
    match args.as_str() {
        Some(message) => output::write_record(level, target, message, config()),
        None => output::write_record(level, target, &args.to_string(), config()),
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! __record {
    ($level:ident, target: $target:expr, $($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::$level) {
            $crate::log($crate::Level::$level, $target, format_args!($($arg)+));
        }
    };
    ($level:ident, $($arg:tt)+) => {
        $crate::__record!($level, target: module_path!(), $($arg)+)
    };
}

/// Log at trace level.
#[macro_export]
macro_rules! trace {
    ($($arg:tt)+) => { $crate::__record!(Trace, $($arg)+) };
}

/// Log at debug level.
///
/// ```rust
/// use forgery_log::debug;
///
/// let key = "name.first_name";
/// debug!("fetching {}", key);
/// debug!(target: "forgery::fetcher", "fetching {key}");
/// ```
#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => { $crate::__record!(Debug, $($arg)+) };
}

/// Log at info level.
#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => { $crate::__record!(Info, $($arg)+) };
}

/// Log at warn level.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => { $crate::__record!(Warn, $($arg)+) };
}

/// Log at error level.
#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => { $crate::__record!(Error, $($arg)+) };
}

#[cfg(feature = "tracing")]
pub mod tracing_compat {
    //! Tracing bridge.
    //!
    //! Builds a subscriber whose default filter follows `FORGERY_LOG_LEVEL`;
    //! `RUST_LOG` still wins when set.

    use super::config;

    /// Subscriber honoring the forgery log level.
    pub fn subscriber() -> impl tracing::Subscriber {
        use tracing_subscriber::prelude::*;
        use tracing_subscriber::{EnvFilter, fmt};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config().effective_level().filter_directive()));

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
    }
}
