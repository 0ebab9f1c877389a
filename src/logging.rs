//! # Logging / 日志
//!
//! Logging setup using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the log level:
//! 1. `--log-level` CLI flag or `log_level` in `CasperRunner.toml`
//! 2. `CASPER_RUNNER_LOG` environment variable (e.g. "info", "debug")
//! 3. default to `info`
//!
//! Logs go to STDERR; STDOUT carries the test runner's own output and the
//! final summary.

use anyhow::{anyhow, Result};
use tracing_subscriber::fmt;

/// Environment variable consulted when no explicit level is configured.
pub const LOG_ENV_VAR: &str = "CASPER_RUNNER_LOG";

/// Initialise the global logging subscriber.
///
/// Calling it twice is an error reported by the subscriber; the `run`
/// command only calls it once.
pub fn init_logging(configured: Option<&str>) -> Result<()> {
    let level = resolve_level(configured, std::env::var(LOG_ENV_VAR).ok().as_deref())?;

    fmt()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("failed to install logging subscriber: {e}"))
}

/// Picks the effective level. An explicitly configured level must be valid;
/// a garbage environment value silently falls back to `info`.
pub fn resolve_level(configured: Option<&str>, env_value: Option<&str>) -> Result<tracing::Level> {
    if let Some(raw) = configured.filter(|s| !s.trim().is_empty()) {
        return parse_level_str(raw).ok_or_else(|| {
            anyhow!("invalid log level '{raw}' (expected error, warn, info, debug or trace)")
        });
    }

    Ok(env_value
        .and_then(parse_level_str)
        .unwrap_or(tracing::Level::INFO))
}

pub fn parse_level_str(s: &str) -> Option<tracing::Level> {
    match s.trim().to_lowercase().as_str() {
        "error" => Some(tracing::Level::ERROR),
        "warn" | "warning" => Some(tracing::Level::WARN),
        "info" => Some(tracing::Level::INFO),
        "debug" => Some(tracing::Level::DEBUG),
        "trace" => Some(tracing::Level::TRACE),
        _ => None,
    }
}
