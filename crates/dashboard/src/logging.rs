//! provides logging helpers

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::{self};
use tracing_subscriber::fmt::layer;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry;

/// Initiate the global tracing subscriber, writing to a rolling file so
/// output never lands on the terminal the dashboard is drawing to.
///
/// The returned guard must stay alive for the duration of the program.
pub fn init(log_dir: &Path) -> WorkerGuard {
    let appender = tracing_appender::rolling::daily(log_dir, "pulseboard.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let env_filter = filter::EnvFilter::builder()
        .with_default_directive(filter::LevelFilter::INFO.into())
        .from_env_lossy();

    let fmt_layer = layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_filter(env_filter);

    registry().with(fmt_layer).init();
    guard
}
