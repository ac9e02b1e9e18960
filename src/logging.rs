use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset.
pub fn default_directive(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    format!("taskora={}", level)
}

/// Install the global subscriber.
///
/// Logs go to stderr in compact form. With `log_file`, a daily-rolling JSON
/// log is written next to it as well; keep the returned guard alive until
/// exit so buffered lines are flushed. If the log directory cannot be
/// created, a warning goes to stderr and only the stderr layer is installed.
pub fn init(verbose: bool, log_file: Option<&Path>) -> Option<WorkerGuard> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer);

    let Some(log_path) = log_file else {
        let _ = subscriber.try_init();
        return None;
    };

    let directory = log_path.parent().unwrap_or_else(|| Path::new("."));
    if let Err(e) = std::fs::create_dir_all(directory) {
        // No subscriber is installed yet, so tracing would drop this.
        eprintln!(
            "Warning: cannot create log directory {}: {}; file logging disabled",
            directory.display(),
            e
        );
        let _ = subscriber.try_init();
        return None;
    }
    let file_name = log_path
        .file_name()
        .unwrap_or_else(|| std::ffi::OsStr::new("taskora.log"));
    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(directory, file_name));

    let file_layer = fmt::layer().with_writer(writer).with_ansi(false).json();
    let _ = subscriber.with(file_layer).try_init();
    Some(guard)
}
