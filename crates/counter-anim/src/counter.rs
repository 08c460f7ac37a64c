//! Per-counter animation state machine.
//!
//! A [`Counter`] is a pure state machine advanced by caller-supplied
//! [`Instant`]s, so it can be driven by any frame source and tested with
//! synthetic time. The lifecycle:
//!
//! - **Dormant**: never been visible; the display is frozen at 0 no matter
//!   what targets arrive.
//! - **Armed**: a visibility signal fired (at most once per instance); new
//!   targets animate from the currently displayed value.
//! - **Animating**: an eased interpolation is in flight; at completion the
//!   display snaps exactly to the target and the counter settles.

use std::time::Duration;
use std::time::Instant;

use crate::easing::ease_out_cubic;

/// Default animation duration.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(1200);

#[derive(Debug, Clone, Copy)]
struct ActiveAnimation {
    start_value: f64,
    started_at: Instant,
}

/// A single animated numeric display.
#[derive(Debug)]
pub struct Counter {
    displayed: f64,
    settled: f64,
    target: f64,
    visible: bool,
    duration: Duration,
    animation: Option<ActiveAnimation>,
}

impl Counter {
    /// Counter with a custom animation duration.
    pub fn new(duration: Duration) -> Self {
        Self {
            displayed: 0.0,
            settled: 0.0,
            target: 0.0,
            visible: false,
            duration,
            animation: None,
        }
    }

    /// Currently displayed (possibly mid-interpolation) value.
    pub fn displayed(&self) -> f64 {
        self.displayed
    }

    /// Whether an animation is in flight.
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Whether the visibility signal has fired.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Fire the one-shot visibility signal (Dormant → Armed). Later calls
    /// are no-ops; any pending target starts animating from 0.
    pub fn mark_visible(&mut self, now: Instant) {
        if self.visible {
            return;
        }
        self.visible = true;
        self.maybe_begin_animation(now);
    }

    /// Set a new target value.
    ///
    /// Before visibility the target is only recorded. While idle, a target
    /// equal to the settled value does nothing (this also covers the
    /// zero-to-zero case). While animating, the current interpolated value
    /// becomes the start of a fresh animation toward the new target; there
    /// is no snap to the old target first.
    pub fn set_target(&mut self, target: f64, now: Instant) {
        if self.is_animating() {
            if target == self.target {
                // already heading there, keep the in-flight animation
                return;
            }
            // advance to `now` with the old target before switching
            let _ = self.on_frame(now);
        }
        self.target = target;
        if self.visible {
            self.animation = None;
            self.maybe_begin_animation(now);
        }
    }

    /// Advance the in-flight animation to `now`, returning the displayed
    /// value. A no-op while idle or dormant.
    pub fn on_frame(&mut self, now: Instant) -> f64 {
        let Some(animation) = self.animation else {
            return self.displayed;
        };

        let elapsed = now.saturating_duration_since(animation.started_at);
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();

        if t >= 1.0 {
            // snap exactly to the target and settle
            self.displayed = self.target;
            self.settled = self.target;
            self.animation = None;
        } else {
            let eased = ease_out_cubic(t);
            self.displayed =
                animation.start_value + (self.target - animation.start_value) * eased;
        }

        self.displayed
    }

    /// Last value an animation settled on.
    pub fn settled(&self) -> f64 {
        self.settled
    }

    fn maybe_begin_animation(&mut self, now: Instant) {
        // nothing to animate when the display already shows the target;
        // covers idempotent re-targets and the zero-to-zero case
        if self.target == self.displayed {
            self.settled = self.target;
            return;
        }
        self.animation = Some(ActiveAnimation {
            start_value: self.displayed,
            started_at: now,
        });
    }
}

impl Default for Counter {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION)
    }
}
