//! Error types for metrics polling.

use core::error::Error;

use derive_more::Display;
use error_stack::Report;

/// Result type for polling operations.
pub type PollResult<T> = Result<T, Report<PollError>>;

/// Errors that can occur while polling the metrics endpoint.
///
/// All variants are absorbed into [`PollState::error`](crate::PollState) as
/// their display strings; none propagate out of the polling task.
#[derive(Debug, Display)]
pub enum PollError {
    /// No credential was supplied for this activation. Terminal: a new
    /// poller with a credential is needed to recover.
    #[display("credential absent")]
    CredentialAbsent,

    /// Network-level failure reaching the endpoint
    #[display("Transport error: {message}")]
    Transport { message: String },

    /// Non-2xx response from the endpoint. The status line is the
    /// user-visible message.
    #[display("{status_line}")]
    Http { status_line: String },

    /// Malformed success response body
    #[display("Parse error: {message}")]
    Parse { message: String },

    /// Invalid endpoint URL or HTTP client construction failure
    #[display("Configuration error: {message}")]
    Configuration { message: String },
}

impl Error for PollError {}
