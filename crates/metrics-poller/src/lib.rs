//! Periodic metrics polling library.
//!
//! This library keeps a small set of metric displays periodically fresh
//! without excessive network chatter:
//!
//! - [`ValuePoller`] fetches a [`api_types::MetricsSnapshot`] from a remote
//!   endpoint on a fixed period, attaching a caller-supplied bearer
//!   credential
//! - [`PollState`] tracks loading/error/data for the display layer, never
//!   discarding the last good snapshot on failure
//! - [`retry_with_backoff`] is a generic budgeted-retry helper for call
//!   sites that want it (the poller itself stays at one attempt per tick)
//!
//! # Examples
//!
//! ```no_run
//! # use metrics_poller::{PollerConfig, ValuePoller};
//! # use tokio_util::sync::CancellationToken;
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PollerConfig::new("https://api.example.com/rest/v1/rpc/dashboard_metrics")
//!     .with_bearer_token("token");
//! let poller = ValuePoller::new(config)?;
//! let mut state = poller.subscribe();
//!
//! let cancel = CancellationToken::new();
//! tokio::spawn(async move { poller.run(cancel).await });
//!
//! state.changed().await?;
//! println!("{:?}", state.borrow().data);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod poller;
pub mod retry;
pub mod state;

pub use config::PollerConfig;
pub use error::PollError;
pub use error::PollResult;
pub use poller::ValuePoller;
pub use retry::retry_with_backoff;
pub use retry::RetryPolicy;
pub use state::PollState;
