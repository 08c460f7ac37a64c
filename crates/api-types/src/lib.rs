//! Shared API type definitions
//!
//! This crate contains the wire types exchanged with the metrics endpoint:
//! the point-in-time [`MetricsSnapshot`] and the [`MetricsEnvelope`] the
//! endpoint wraps it in.

use serde::Deserialize;
use serde::Serialize;

/// A single point-in-time set of metric values retrieved from the remote
/// source. Created fresh on every successful poll and superseded, never
/// mutated, by the next one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MetricsSnapshot {
    /// Total automation tasks executed
    pub tasks_executed: u64,
    /// Minutes of manual work saved
    pub time_saved_minutes: u64,
    /// Estimated return on investment
    pub estimated_roi: f64,
    /// Automations currently active
    pub active_automations: u64,
    /// Events processed, when the backend reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events_processed: Option<u64>,
}

/// Success response body of the metrics endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsEnvelope {
    /// The metrics payload
    pub data: MetricsSnapshot,
}
