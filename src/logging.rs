use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Where log output goes.
#[derive(Debug, Clone, Default)]
pub struct LogTarget {
    /// Compact human-readable lines on stderr
    pub stderr: bool,
    /// Daily-rotated JSON lines
    pub file: Option<PathBuf>,
}

/// Default log file for the TUI, which cannot write to stderr.
pub fn default_log_file() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "mdblog")
        .map(|dirs| dirs.data_local_dir().join("mdblog.log"))
}

/// Initialize the logging system
///
/// # Arguments
/// * `verbose` - Enable verbose (DEBUG) logging
/// * `target` - Which sinks receive log lines
pub fn init(verbose: bool, target: LogTarget) {
    // Determine log level from verbose flag or RUST_LOG env var
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("mdblog={}", default_level)));

    let stderr_layer = target.stderr.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact()
    });

    let file_layer = target.file.map(|log_path| {
        if let Some(parent) = log_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }

        let file_appender = tracing_appender::rolling::daily(
            log_path.parent().unwrap_or_else(|| Path::new(".")),
            log_path
                .file_name()
                .unwrap_or_else(|| std::ffi::OsStr::new("mdblog.log")),
        );

        fmt::layer()
            .with_writer(file_appender)
            .with_ansi(false)
            .json()
    });

    // A second init (tests, repeated runs in one process) keeps the first one.
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init();
}
