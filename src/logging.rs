use std::fs;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initializes the logging system with both console and file output.
pub fn init_logging() {
    // Make sure the log directory is there before the appender opens its file
    let _ = fs::create_dir_all("logs");

    // Rotate the file daily and write it from a background worker
    let file_appender = tracing_appender::rolling::daily("logs", "editorial_api.log");
    let (non_blocking_writer, _guard) = tracing_appender::non_blocking(file_appender);

    // Structured JSON lines in the file
    let file_layer = fmt::layer().json().with_writer(non_blocking_writer);

    // Human-readable lines on stderr; stdout carries resolved documents
    let console_layer = fmt::layer().with_writer(std::io::stderr);

    // RUST_LOG wins, otherwise this crate at info and everything else at warn
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("editorial_api=info,warn"));

    // Install the subscriber with the filter and both layers
    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    // The guard flushes pending lines when dropped, so it lives until exit
    std::mem::forget(_guard);
}
