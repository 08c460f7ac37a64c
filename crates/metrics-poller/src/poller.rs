//! Periodic metrics poller.
//!
//! On a fixed period the poller issues one bare `GET` against the metrics
//! endpoint, attaching the configured bearer credential, and publishes the
//! resulting [`PollState`] through a watch channel. The first attempt fires
//! immediately on activation. There is no per-tick retry: a failed attempt
//! is simply retried by the next scheduled tick.
//!
//! Each tick's fetch runs as its own task, so the interval keeps firing
//! while a slow request is still in flight; a hung fetch costs only its own
//! tick's result.

use api_types::MetricsEnvelope;
use api_types::MetricsSnapshot;
use error_stack::Report;
use reqwest::Client;
use tokio::sync::mpsc;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use tracing::info;
use tracing::warn;
use url::Url;

use crate::config::PollerConfig;
use crate::error::PollError;
use crate::error::PollResult;
use crate::state::PollState;

/// Periodically fetches [`MetricsSnapshot`]s and publishes poll state.
pub struct ValuePoller {
    config: PollerConfig,
    http: Client,
    state_tx: watch::Sender<PollState>,
}

impl ValuePoller {
    /// Create a poller. Validates the endpoint URL and builds the HTTP
    /// client; no fetch happens until [`run`](Self::run).
    pub fn new(config: PollerConfig) -> PollResult<Self> {
        let _ = Url::parse(&config.endpoint_url).map_err(|err| {
            Report::new(err).change_context(PollError::Configuration {
                message: format!("Invalid endpoint URL: {}", config.endpoint_url),
            })
        })?;

        // No request timeout on purpose: a hung fetch blocks only its own
        // tick's result, the interval keeps firing independently.
        let http = Client::builder().build().map_err(|err| {
            Report::new(err).change_context(PollError::Configuration {
                message: "Failed to create HTTP client".into(),
            })
        })?;

        let (state_tx, _) = watch::channel(PollState::loading());

        info!(endpoint = %config.endpoint_url, "Value poller created");

        Ok(Self {
            config,
            http,
            state_tx,
        })
    }

    /// Subscribe to poll state updates.
    pub fn subscribe(&self) -> watch::Receiver<PollState> {
        self.state_tx.subscribe()
    }

    /// Run the periodic polling loop until `cancel` is triggered.
    ///
    /// Without a credential this publishes the terminal credential-absent
    /// state and returns without ever touching the network. Each tick
    /// spawns its fetch as a separate task, so the timer fires
    /// independently of fetch completion: a hung request stalls only its
    /// own tick's result.
    pub async fn run(&self, cancel: CancellationToken) {
        let Some(token) = self.config.bearer_token.clone() else {
            warn!("No credential supplied, poller is terminal for this activation");
            self.publish(PollState::loading().with_error(PollError::CredentialAbsent.to_string()));
            return;
        };

        let mut ticker = tokio::time::interval(self.config.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        // completed fetches report back here so that publishing stays in
        // one place, in completion order
        let (outcome_tx, mut outcome_rx) = mpsc::channel::<PollResult<MetricsSnapshot>>(8);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("Poller shutdown requested");
                    break;
                }
                _ = ticker.tick() => {
                    let http = self.http.clone();
                    let endpoint_url = self.config.endpoint_url.clone();
                    let token = token.clone();
                    let outcome_tx = outcome_tx.clone();
                    let fetch_cancel = cancel.clone();

                    tokio::spawn(async move {
                        let outcome = fetch_once(&http, &endpoint_url, &token).await;

                        // A fetch that was in flight when cancellation hit
                        // is allowed to finish, but its result is discarded.
                        if fetch_cancel.is_cancelled() {
                            debug!("Discarding fetch result after shutdown");
                            return;
                        }
                        let _ = outcome_tx.send(outcome).await;
                    });
                }
                Some(outcome) = outcome_rx.recv() => {
                    let current = self.state_tx.borrow().clone();
                    let next = match outcome {
                        Ok(snapshot) => {
                            debug!(
                                tasks_executed = snapshot.tasks_executed,
                                active_automations = snapshot.active_automations,
                                "Fetched metrics snapshot"
                            );
                            current.with_snapshot(snapshot)
                        }
                        Err(report) => {
                            warn!("Metrics fetch failed: {report:?}");
                            current.with_error(report.current_context().to_string())
                        }
                    };
                    self.publish(next);
                }
            }
        }
    }

    fn publish(&self, state: PollState) {
        // Receivers may all be gone during teardown; that is not an error.
        let _ = self.state_tx.send(state);
    }
}

async fn fetch_once(http: &Client, endpoint_url: &str, token: &str) -> PollResult<MetricsSnapshot> {
    let response = http
        .get(endpoint_url)
        .bearer_auth(token)
        .send()
        .await
        .map_err(|err| {
            let message = err.to_string();
            Report::new(err).change_context(PollError::Transport { message })
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(Report::new(PollError::Http {
            status_line: format!(
                "{} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown Status")
            ),
        }));
    }

    let envelope: MetricsEnvelope = response.json().await.map_err(|err| {
        let message = err.to_string();
        Report::new(err).change_context(PollError::Parse { message })
    })?;

    Ok(envelope.data)
}
