use std::path::Path;

use miette::{Context, IntoDiagnostic, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};


/// Initializes the global tracing subscriber.
///
/// Console output goes to stderr, so it never mixes with the resolved configuration
/// printed on stdout. If `log_file_output` is provided, a daily-rolling log file
/// is written into that directory as well.
///
/// The returned guard must be kept alive until the program exits,
/// otherwise buffered file output may be lost.
pub fn initialize_tracing(
    console_level_filter: EnvFilter,
    log_file_output: Option<(EnvFilter, &Path)>,
    log_file_name: &str,
) -> Result<Option<WorkerGuard>> {
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(console_level_filter);


    let (file_layer, guard) = match log_file_output {
        Some((file_level_filter, log_file_directory)) => {
            std::fs::create_dir_all(log_file_directory)
                .into_diagnostic()
                .wrap_err("Failed to create log file output directory.")?;

            let file_appender = tracing_appender::rolling::daily(log_file_directory, log_file_name);
            let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);

            let file_layer = fmt::layer()
                .with_writer(non_blocking_writer)
                .with_ansi(false)
                .with_filter(file_level_filter);

            (Some(file_layer), Some(guard))
        }
        None => (None, None),
    };


    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .into_diagnostic()
        .wrap_err("Failed to install global tracing subscriber.")?;

    Ok(guard)
}
