//! Cancellable frame-loop driver for a [`Counter`].
//!
//! The driver owns a counter on a spawned task: targets arrive through a
//! watch channel, the one-shot visibility signal through a [`Notify`], and
//! the displayed value is published back through a watch channel. The
//! ~60 Hz frame tick is only armed while an animation is in flight, so an
//! idle counter schedules no frames at all.

use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;

use tokio::sync::watch;
use tokio::sync::Notify;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::counter::Counter;

/// Nominal display refresh period (~60 Hz).
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Handle to a spawned counter driver. Dropping the handle does not stop
/// the task; cancel the token passed to [`CounterDriver::spawn`] for that.
#[derive(Debug, Clone)]
pub struct CounterHandle {
    target_tx: Arc<watch::Sender<f64>>,
    visibility: Arc<Notify>,
    value_rx: watch::Receiver<f64>,
}

impl CounterHandle {
    /// Set a new target value for the counter. Re-sending the current
    /// target wakes nothing, so callers may push targets every tick.
    pub fn set_target(&self, target: f64) {
        let _ = self.target_tx.send_if_modified(|current| {
            if *current == target {
                false
            } else {
                *current = target;
                true
            }
        });
    }

    /// Fire the one-shot visibility signal. Safe to call repeatedly.
    pub fn mark_visible(&self) {
        self.visibility.notify_one();
    }

    /// Currently displayed value.
    pub fn value(&self) -> f64 {
        *self.value_rx.borrow()
    }

    /// Subscribe to displayed-value updates.
    pub fn subscribe(&self) -> watch::Receiver<f64> {
        self.value_rx.clone()
    }
}

/// Spawns and drives counters.
pub struct CounterDriver;

impl CounterDriver {
    /// Spawn a frame-loop task owning `counter`, stopping when `cancel`
    /// fires. Must be called within a tokio runtime.
    pub fn spawn(counter: Counter, cancel: CancellationToken) -> CounterHandle {
        let (target_tx, target_rx) = watch::channel(0.0_f64);
        let (value_tx, value_rx) = watch::channel(counter.displayed());
        let visibility = Arc::new(Notify::new());

        let task_visibility = Arc::clone(&visibility);
        tokio::spawn(async move {
            run_loop(counter, target_rx, task_visibility, value_tx, cancel).await;
        });

        CounterHandle {
            target_tx: Arc::new(target_tx),
            visibility,
            value_rx,
        }
    }
}

async fn run_loop(
    mut counter: Counter,
    mut target_rx: watch::Receiver<f64>,
    visibility: Arc<Notify>,
    value_tx: watch::Sender<f64>,
    cancel: CancellationToken,
) {
    let mut frame = tokio::time::interval(FRAME_INTERVAL);
    frame.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                debug!("Counter driver shutdown requested");
                break;
            }
            changed = target_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let target = *target_rx.borrow_and_update();
                counter.set_target(target, Instant::now());
                let _ = value_tx.send(counter.displayed());
            }
            // the observer disengages once visibility has fired
            _ = visibility.notified(), if !counter.is_visible() => {
                counter.mark_visible(Instant::now());
                let _ = value_tx.send(counter.displayed());
            }
            // no frames are scheduled while idle
            _ = frame.tick(), if counter.is_animating() => {
                let displayed = counter.on_frame(Instant::now());
                let _ = value_tx.send(displayed);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    const FAST: Duration = Duration::from_millis(120);

    async fn wait_for_value(
        rx: &mut watch::Receiver<f64>,
        pred: impl Fn(f64) -> bool,
    ) -> f64 {
        loop {
            let value = *rx.borrow_and_update();
            if pred(value) {
                return value;
            }
            tokio::time::timeout(Duration::from_secs(5), rx.changed())
                .await
                .expect("timed out waiting for counter value")
                .expect("driver dropped");
        }
    }

    #[test(tokio::test)]
    async fn animates_to_target_after_visibility() {
        let cancel = CancellationToken::new();
        let handle = CounterDriver::spawn(Counter::new(FAST), cancel.clone());
        let mut values = handle.subscribe();

        handle.set_target(100.0);
        handle.mark_visible();

        let settled = wait_for_value(&mut values, |v| v == 100.0).await;
        assert_eq!(settled, 100.0);

        cancel.cancel();
    }

    #[test(tokio::test)]
    async fn stays_frozen_before_visibility() {
        let cancel = CancellationToken::new();
        let handle = CounterDriver::spawn(Counter::new(FAST), cancel.clone());

        handle.set_target(100.0);
        tokio::time::sleep(FAST * 3).await;

        assert_eq!(handle.value(), 0.0);

        handle.mark_visible();
        let mut values = handle.subscribe();
        let settled = wait_for_value(&mut values, |v| v == 100.0).await;
        assert_eq!(settled, 100.0);

        cancel.cancel();
    }

    #[test(tokio::test)]
    async fn retarget_lands_on_new_value() {
        let cancel = CancellationToken::new();
        let handle = CounterDriver::spawn(Counter::new(FAST), cancel.clone());
        let mut values = handle.subscribe();

        handle.mark_visible();
        handle.set_target(1000.0);

        // re-target while the first animation is still in flight
        let _ = wait_for_value(&mut values, |v| v > 0.0).await;
        handle.set_target(2000.0);

        let settled = wait_for_value(&mut values, |v| v == 2000.0).await;
        assert_eq!(settled, 2000.0);

        cancel.cancel();
    }

    #[test(tokio::test)]
    async fn cancellation_stops_frame_updates() {
        let cancel = CancellationToken::new();
        let handle = CounterDriver::spawn(Counter::new(Duration::from_secs(30)), cancel.clone());

        handle.mark_visible();
        handle.set_target(1_000_000.0);

        let mut values = handle.subscribe();
        let _ = wait_for_value(&mut values, |v| v > 0.0).await;

        cancel.cancel();
        tokio::time::sleep(Duration::from_millis(50)).await;

        let frozen = handle.value();
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(handle.value(), frozen);
    }
}
