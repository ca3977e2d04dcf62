// src/logging.rs

//! Logging setup for `rf` using `tracing` + `tracing-subscriber`.
//!
//! Filter priority:
//! 1. `--log-level` or `-v` on the command line (applies to everything)
//! 2. `RF_LOG`, in `EnvFilter` syntax (e.g. "debug", "rf::discover=trace")
//! 3. `info`
//!
//! Logs go to STDERR; stdout belongs to `--print` and the build executor.

use anyhow::Result;
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::LogLevel;

/// Environment variable read when no level is given on the command line.
pub const LOG_ENV: &str = "RF_LOG";

const DEFAULT_FILTER: &str = "info";

/// Initialise global logging subscriber.
///
/// Safe to call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env = std::env::var(LOG_ENV).ok();
    let filter = build_filter(cli_level, env.as_deref());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

/// An unparsable `RF_LOG` falls back to the default rather than failing
/// the run.
fn build_filter(cli_level: Option<LogLevel>, env: Option<&str>) -> EnvFilter {
    if let Some(level) = cli_level {
        return EnvFilter::new(level_directive(level));
    }

    env.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| EnvFilter::try_new(s).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

fn level_directive(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_level_wins_over_environment() {
        let filter = build_filter(Some(LogLevel::Debug), Some("rf=trace"));
        assert_eq!(filter.to_string(), "debug");
    }

    #[test]
    fn environment_directives_are_used() {
        let filter = build_filter(None, Some(" rf=trace "));
        assert_eq!(filter.to_string(), "rf=trace");
    }

    #[test]
    fn missing_or_bad_environment_means_info() {
        assert_eq!(build_filter(None, None).to_string(), "info");
        assert_eq!(build_filter(None, Some("")).to_string(), "info");
        assert_eq!(build_filter(None, Some("rf=loud")).to_string(), "info");
    }
}
