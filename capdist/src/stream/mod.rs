//! Streaming delivery of progress and results.
//!
//! Every session follows one state machine:
//!
//! ```text
//! Started ──► Progress* ──► Completed
//!    │            │
//!    └────────────┴───────► Failed
//! ```
//!
//! Events travel over a bounded channel from the computing task to a
//! [`DistanceSession`]. The producer side writes through a
//! [`SessionEmitter`], which enforces ordering and refuses anything after a
//! terminal event. Dropping the session cancels the computation.
//!
//! On the wire (`serde_json`), `Started` and `Progress` share the
//! `{done, total, latest?}` shape (scheduler progress also carries
//! `elapsedMs`, `pairsPerSecond` and `etaMs?`), `Completed` is the full
//! [`DistanceResult`](crate::result::DistanceResult) and `Failed` is
//! `{error}`.

mod emitter;
mod events;
mod metrics;
mod session;
mod state;

pub use emitter::{EmitError, SessionEmitter};
pub use events::{ErrorPayload, ProgressEvent, SessionEvent};
pub use metrics::ProgressMetrics;
pub use session::DistanceSession;
pub use state::{ProtocolError, SessionState, SessionTracker};

/// Default capacity of a session's event channel.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;
