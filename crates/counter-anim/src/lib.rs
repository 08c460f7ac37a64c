//! Animated numeric counter library.
//!
//! Keeps a small set of numeric displays visually smooth: each [`Counter`]
//! eases from its previous value to a new target over a fixed duration
//! (cubic ease-out), gated on the display first becoming visible, and snaps
//! exactly to the target at completion.
//!
//! The state machine itself is pure and driven by caller-supplied instants;
//! [`CounterDriver`] wraps it in a cancellable ~60 Hz frame-loop task for
//! hosts that want values pushed to them. [`CounterFormat`] renders settled
//! values with locale thousands separators and an optional unit suffix.
//!
//! # Examples
//!
//! ```
//! use std::time::{Duration, Instant};
//!
//! use counter_anim::Counter;
//!
//! let mut counter = Counter::default();
//! let t0 = Instant::now();
//!
//! counter.mark_visible(t0);
//! counter.set_target(1000.0, t0);
//!
//! // halfway through the 1.2s default duration the eased value is 875
//! let mid = counter.on_frame(t0 + Duration::from_millis(600));
//! assert!((mid - 875.0).abs() < 1.0);
//! ```

pub mod counter;
pub mod driver;
pub mod easing;
pub mod format;

pub use counter::Counter;
pub use num_format::Locale;
pub use counter::DEFAULT_DURATION;
pub use driver::CounterDriver;
pub use driver::CounterHandle;
pub use easing::ease_out_cubic;
pub use format::format_value;
pub use format::CounterFormat;
