use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

/// Terminal dashboard for polled automation metrics.
#[derive(Parser, Debug)]
#[command(name = "pulseboard", about, long_about = None)]
pub struct Cli {
    #[arg(
        long,
        env = "PULSEBOARD_ENDPOINT",
        default_value = "http://127.0.0.1:54321/rest/v1/rpc/dashboard_metrics",
        help = "Metrics endpoint URL"
    )]
    pub endpoint_url: String,

    #[arg(
        long,
        env = "PULSEBOARD_TOKEN",
        help = "Opaque bearer credential for the metrics endpoint"
    )]
    pub token: Option<String>,

    #[arg(
        long,
        default_value = "30",
        help = "Poll period in seconds"
    )]
    pub poll_interval_secs: u64,

    #[arg(
        long,
        default_value = "1200",
        help = "Counter animation duration in milliseconds"
    )]
    pub animation_ms: u64,

    #[arg(
        long,
        default_value = "en",
        help = "Locale for thousands separators, e.g. en, fr, de"
    )]
    pub locale: String,

    #[arg(
        long,
        env = "PULSEBOARD_LOG_DIR",
        value_hint = clap::ValueHint::DirPath,
        default_value = "logs",
        help = "Directory for the rolling log file"
    )]
    pub log_dir: PathBuf,
}

impl Cli {
    /// poll period as a duration
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// animation duration as a duration
    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_ms)
    }
}
