//! Logging setup for hosts and the demo binary
//!
//! The library itself only emits `tracing` events; nothing is printed unless
//! the host installs a subscriber. Call [`init`] for the stock setup.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - registrations and focus handling
//! - `RUST_LOG=keyflow::action=trace` - per-action firing
//! - `RUST_LOG=keyflow::polling=trace` - every key transition
//!
//! # Log Files
//!
//! Logs are written to `~/.config/keyflow/logs/keyflow.log` with daily rotation.
//! The file gets keyflow's registrations and focus handling at debug level;
//! the windowing crates stay at info.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Console filter when RUST_LOG is unset: warnings, plus keyflow's config loading
const CONSOLE_DEFAULT: &str = "warn,keyflow=info";

/// File filter: keyflow at debug, dependencies at info
const FILE_DEFAULT: &str = "info,keyflow=debug";

/// Initialize tracing subscriber with console and file logging
///
/// Panics if a global subscriber is already installed.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(CONSOLE_DEFAULT));

    // Console layer - respects RUST_LOG
    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - keyflow at debug for troubleshooting
    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "keyflow.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new(FILE_DEFAULT)),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filters_parse() {
        assert!(EnvFilter::try_new(CONSOLE_DEFAULT).is_ok());
        assert!(EnvFilter::try_new(FILE_DEFAULT).is_ok());
    }
}
