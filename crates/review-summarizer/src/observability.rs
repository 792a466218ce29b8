//! Logging setup.
//!
//! Human-readable events go to stderr so stdout carries only results. When a
//! log file is configured, the same events are also written there as JSONL.

use std::path::PathBuf;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Explicit log file path.
const LOG_PATH_ENV: &str = "REVIEW_SUMMARIZER_LOG_PATH";

/// Log directory; the file inside it is [`LOG_FILE_NAME`].
const LOG_DIR_ENV: &str = "REVIEW_SUMMARIZER_LOG_DIR";

const LOG_FILE_NAME: &str = "review-summarizer.jsonl";

/// Where (if anywhere) to write the JSONL log.
#[derive(Debug, Clone, Default)]
pub struct ObservabilityConfig {
    /// Full path of the log file. `None` disables file logging.
    pub log_path: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// Resolve the log file from the environment, falling back to `log_dir`.
    ///
    /// `REVIEW_SUMMARIZER_LOG_PATH` beats `REVIEW_SUMMARIZER_LOG_DIR`, which
    /// beats the configured directory.
    pub fn from_env_with_overrides(log_dir: Option<PathBuf>) -> Self {
        let explicit = std::env::var_os(LOG_PATH_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        let dir = std::env::var_os(LOG_DIR_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or(log_dir);
        Self {
            log_path: explicit.or_else(|| dir.map(|d| d.join(LOG_FILE_NAME))),
        }
    }
}

/// Build the event filter. `RUST_LOG` wins when set.
pub fn env_filter(quiet: bool, verbose: u8, default_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => default_level,
            1 => "debug",
            _ => "trace",
        }
    };
    EnvFilter::new(level)
}

/// Install the global subscriber.
///
/// Keep the returned guard alive until exit so buffered file events flush.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<Option<WorkerGuard>> {
    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    let (file_layer, guard) = match config.log_path {
        Some(ref path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map_or_else(|| PathBuf::from("."), PathBuf::from);
            let file_name = path
                .file_name()
                .with_context(|| format!("log path has no file name: {}", path.display()))?;
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::never(&dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().json().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_wins_over_verbose() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        assert_eq!(env_filter(true, 2, "warn").to_string(), "error");
    }

    #[test]
    fn verbosity_levels() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        assert_eq!(env_filter(false, 0, "warn").to_string(), "warn");
        assert_eq!(env_filter(false, 1, "warn").to_string(), "debug");
        assert_eq!(env_filter(false, 3, "warn").to_string(), "trace");
    }

    #[test]
    fn config_dir_used_without_env() {
        if std::env::var_os(LOG_PATH_ENV).is_some() || std::env::var_os(LOG_DIR_ENV).is_some() {
            return;
        }
        let cfg = ObservabilityConfig::from_env_with_overrides(Some(PathBuf::from("/tmp/logs")));
        assert_eq!(
            cfg.log_path,
            Some(PathBuf::from("/tmp/logs").join(LOG_FILE_NAME))
        );
        assert!(ObservabilityConfig::from_env_with_overrides(None).log_path.is_none());
    }
}
