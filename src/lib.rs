pub mod api;
pub mod error;
pub mod models;
pub mod services;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

const LOG_PREFIX: &str = "stylomark_";
const LOG_KEEP: usize = 30;

fn env_flag(name: &str) -> bool {
    matches!(
        std::env::var(name).as_deref(),
        Ok("1") | Ok("true") | Ok("TRUE")
    )
}

/// Initialize logging with a timestamped log file per session.
/// Console output goes to stderr so stdout stays machine-readable.
pub fn init_logging() {
    let disable_file_log = env_flag("STYLOMARK_DISABLE_FILE_LOG");
    let disable_cleanup = env_flag("STYLOMARK_DISABLE_LOG_CLEANUP");

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if disable_file_log {
        init_console_only_logging(env_filter);
        info!("File logging disabled via STYLOMARK_DISABLE_FILE_LOG");
        return;
    }

    let logs_dir = match std::env::var("STYLOMARK_LOG_DIR") {
        Ok(p) if !p.trim().is_empty() => PathBuf::from(p),
        _ => get_logs_dir(),
    };

    if let Err(e) = fs::create_dir_all(&logs_dir) {
        eprintln!("Failed to create logs directory: {}", e);
        init_console_only_logging(env_filter);
        info!("Falling back to console-only logging (log dir not writable)");
        return;
    }

    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let log_filename = format!("{}{}.log", LOG_PREFIX, timestamp);

    let file_appender = rolling::never(&logs_dir, &log_filename);
    let (file_writer, file_guard) = tracing_appender::non_blocking(file_appender);
    let _ = LOG_GUARD.set(file_guard);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true);

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(cfg!(debug_assertions))
        .with_target(true);

    // A subscriber may already be installed by an embedding shell.
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .try_init();

    info!("=== Stylomark Started ===");
    info!("Log file: {}/{}", logs_dir.display(), log_filename);
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    if !disable_cleanup {
        std::thread::spawn(move || {
            cleanup_old_logs(&logs_dir, LOG_KEEP);
        });
    }
}

/// Get the logs directory path
fn get_logs_dir() -> PathBuf {
    #[cfg(debug_assertions)]
    {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("logs")
    }

    #[cfg(not(debug_assertions))]
    {
        if let Some(data_dir) = dirs::data_local_dir() {
            return data_dir.join("stylomark").join("logs");
        }
        PathBuf::from("logs")
    }
}

/// Remove all but the newest `keep` session logs. Returns how many were removed.
fn cleanup_old_logs(logs_dir: &Path, keep: usize) -> usize {
    let mut entries: Vec<_> = match fs::read_dir(logs_dir) {
        Ok(rd) => rd.filter_map(|e| e.ok()).collect(),
        Err(_) => return 0,
    };

    entries.retain(|e| {
        let name = e.file_name().to_string_lossy().to_string();
        name.starts_with(LOG_PREFIX) && name.ends_with(".log")
    });

    if entries.len() <= keep {
        return 0;
    }

    // Names embed a sortable timestamp.
    entries.sort_by_key(|e| e.file_name());

    let remove_count = entries.len().saturating_sub(keep);
    entries
        .into_iter()
        .take(remove_count)
        .filter(|entry| fs::remove_file(entry.path()).is_ok())
        .count()
}

fn init_console_only_logging(env_filter: EnvFilter) {
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(cfg!(debug_assertions))
        .with_target(true);

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleanup_keeps_newest_logs() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..5 {
            let name = format!("{}20260101_00000{}.log", LOG_PREFIX, i);
            fs::write(dir.path().join(name), "x").unwrap();
        }
        fs::write(dir.path().join("other.log"), "x").unwrap();

        assert_eq!(cleanup_old_logs(dir.path(), 2), 3);

        let mut left: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        left.sort();
        assert_eq!(
            left,
            vec![
                "other.log".to_string(),
                format!("{}20260101_000003.log", LOG_PREFIX),
                format!("{}20260101_000004.log", LOG_PREFIX),
            ]
        );
    }

    #[test]
    fn test_cleanup_missing_dir_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(cleanup_old_logs(&dir.path().join("absent"), 1), 0);
    }
}
