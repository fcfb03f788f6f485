use std::env;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Sets up stdout + file logging and returns the appender guard, which must
/// stay alive for the duration of the process.
pub fn init_logger(verbose: u8) -> impl Drop {
    // Attempt to read the tracing level from the `TRACING_LEVEL` environment variable.
    // Fall back to a level derived from the -v count.
    let default_filter = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = env::var("TRACING_LEVEL").unwrap_or_else(|_| default_filter.to_string());
    let filter_layer = EnvFilter::new(filter);

    // Attempt to read the log file path from the `LOG_FILE_PATH` environment variable.
    // Default to `./logs/divvy.log` if not specified.
    let default_log_path = "./logs/divvy.log";
    let log_file_path = env::var("LOG_FILE_PATH").unwrap_or_else(|_| default_log_path.to_string());

    // Set up file logging
    let file_appender = tracing_appender::rolling::never("./", log_file_path);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Combine everything together
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stdout) // Log to stdout
                .with_file(false)
                .pretty()
                .without_time()
                .with_ansi(true),
        ) // Enable ANSI escape codes for colors in the terminal
        .with(
            fmt::layer()
                .with_writer(non_blocking) // Log to file
                .with_ansi(false),
        ) // Disable ANSI escape codes for the file logger
        .with(filter_layer)
        .init();

    guard // Return the guard to keep it alive
}
