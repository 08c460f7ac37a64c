//! Poll state published to display-layer consumers.

use api_types::MetricsSnapshot;
use chrono::DateTime;
use chrono::Utc;

/// Snapshot of the poller's progress, published through a watch channel
/// after every attempt.
///
/// A failed poll never clears previously successful `data`; it only sets
/// `error`, and the display layer decides whether to keep showing the stale
/// snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PollState {
    /// Last successfully fetched snapshot, if any
    pub data: Option<MetricsSnapshot>,
    /// True until the first attempt has completed
    pub is_loading: bool,
    /// Human-readable message from the most recent failed attempt
    pub error: Option<String>,
    /// When `data` was last refreshed
    pub fetched_at: Option<DateTime<Utc>>,
}

impl PollState {
    /// Initial state before any attempt has completed.
    pub fn loading() -> Self {
        Self {
            data: None,
            is_loading: true,
            error: None,
            fetched_at: None,
        }
    }

    /// State after a successful fetch. Clears any previous error.
    pub fn with_snapshot(&self, snapshot: MetricsSnapshot) -> Self {
        Self {
            data: Some(snapshot),
            is_loading: false,
            error: None,
            fetched_at: Some(Utc::now()),
        }
    }

    /// State after a failed attempt. Prior data is retained untouched.
    pub fn with_error(&self, message: impl Into<String>) -> Self {
        Self {
            data: self.data.clone(),
            is_loading: false,
            error: Some(message.into()),
            fetched_at: self.fetched_at,
        }
    }

    /// Whether any usable snapshot exists, stale or fresh.
    pub fn has_data(&self) -> bool {
        self.data.is_some()
    }
}
