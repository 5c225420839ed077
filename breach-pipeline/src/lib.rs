//! Debounced, cancelable breach checks for a password field.
//!
//! A [`BreachPipeline`] sits between the keystroke handler and a
//! [`pwned_range::RangeTransport`]. Each keystroke calls
//! [`schedule`](BreachPipeline::schedule); the pipeline waits for a quiet period,
//! fingerprints the last value it was given, queries its 5 character prefix and
//! reports the outcome to a [`BreachListener`].
//!
//! ```text
//!            schedule            delay elapsed            response
//!   Idle ──────────────► Armed ───────────────► InFlight ──────────► Idle
//!    ▲                     │                       │
//!    └──── cancel/reset ───┴───────────────────────┘
//! ```
//!
//! A monotonically increasing generation guards delivery. `schedule`, `cancel` and
//! `reset` all move the generation forward, and a response is only reported if its
//! generation is still current when it resolves. In-flight requests are never
//! aborted at the transport level; their results are simply dropped.

pub mod clock;
pub mod config;
pub mod listener;
pub mod pipeline;

pub use clock::{Clock, TokioClock};
pub use config::{DEFAULT_DELAY, PipelineConfig};
pub use listener::{BreachCheckFailed, BreachEvent, BreachListener};
pub use pipeline::{BreachPipeline, Phase};
