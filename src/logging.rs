//! File-based logging.
//!
//! The terminal belongs to the TUI, so `tracing` output goes to a daily
//! rotating file under the state directory instead of stderr.

use std::error::Error;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingSettings;

const LOG_FILE_PREFIX: &str = "cadence.log";

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `logging.filter`. The returned guard flushes pending
/// lines on drop, so keep it alive until exit.
pub fn init_logging(settings: &LoggingSettings) -> Result<WorkerGuard, Box<dyn Error>> {
    let dir = log_dir(settings);
    std::fs::create_dir_all(&dir)?;

    let appender = RollingFileAppender::new(Rotation::DAILY, &dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let fmt_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_names(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::info!(dir = %dir.display(), "logging initialized");
    Ok(guard)
}

fn log_dir(settings: &LoggingSettings) -> PathBuf {
    log_dir_from(
        settings.dir.as_deref(),
        std::env::var_os("XDG_STATE_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

fn log_dir_from(configured: Option<&Path>, xdg_state: Option<PathBuf>, home: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = configured {
        return dir.to_path_buf();
    }
    if let Some(state) = xdg_state.filter(|p| !p.as_os_str().is_empty()) {
        return state.join("cadence");
    }
    match home {
        Some(home) => home.join(".local").join("state").join("cadence"),
        None => PathBuf::from(".logs"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_dir_wins() {
        let dir = log_dir_from(
            Some(Path::new("/var/log/cadence")),
            Some("/state".into()),
            Some("/home/u".into()),
        );
        assert_eq!(dir, PathBuf::from("/var/log/cadence"));
    }

    #[test]
    fn xdg_state_then_home() {
        assert_eq!(
            log_dir_from(None, Some("/state".into()), Some("/home/u".into())),
            PathBuf::from("/state/cadence")
        );
        assert_eq!(
            log_dir_from(None, Some("".into()), Some("/home/u".into())),
            PathBuf::from("/home/u/.local/state/cadence")
        );
        assert_eq!(log_dir_from(None, None, None), PathBuf::from(".logs"));
    }
}
