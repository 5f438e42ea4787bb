//! Tracing setup

use std::path::Path;

/// Console logging at the default level
pub fn init_logger() {
    init_logger_with_file(None, None);
}

/// Logging with an optional level override and daily-rolling file output.
///
/// When `log_dir` does not exist the file layer is skipped and output
/// stays on the console; missing a log directory should never stop the
/// server.
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&str>) {
    let level = log_level
        .and_then(|l| l.parse().ok())
        .unwrap_or(tracing::Level::INFO);

    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false);

    match log_dir.map(Path::new).filter(|d| d.exists()) {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "depot-server");
            builder.with_writer(appender).init();
        }
        None => builder.init(),
    }
}
