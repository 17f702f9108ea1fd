//! Per-notebook status polling.
//!
//! [`PollSession`] holds the bounded-retry policy, [`StatusPoller`] runs it
//! on a tokio interval and reports [`PollEvent`]s to the list controller.

pub mod errors;
pub mod session;
pub mod status_poller;

pub use errors::PollError;
pub use session::{PollEvent, PollEventKind, PollMode, PollSession, SessionId, TickDecision};
pub use status_poller::StatusPoller;
