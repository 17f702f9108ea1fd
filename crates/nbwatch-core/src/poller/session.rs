use std::fmt;
use std::time::Duration;

use tracing::{debug, warn};

use crate::api::StatusReport;
use crate::notebooks::READY_LABEL;
use crate::poller::errors::PollError;

/// Identifies one poll session. Allocated by the list controller, strictly
/// increasing, so a superseded session can always be told apart from the
/// current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a session is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollMode {
    /// Waiting for the notebook to become ready (or disappear).
    Provisioning,
    /// A removal was accepted; waiting for the notebook to disappear.
    /// A `Ready` answer is just a stale label here.
    Teardown,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PollEventKind {
    /// Non-terminal status label, shown verbatim.
    Progress { label: String },
    Ready { url: Option<String> },
    NotFound,
    /// The attempt budget ran out before a terminal status.
    Exhausted { attempts: u32 },
}

impl PollEventKind {
    pub fn ends_session(&self) -> bool {
        !matches!(self, PollEventKind::Progress { .. })
    }
}

/// Message from a poller to the list controller.
#[derive(Debug, Clone, PartialEq)]
pub struct PollEvent {
    pub notebook_id: String,
    pub session_id: SessionId,
    pub kind: PollEventKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickDecision {
    Query { attempt: u32 },
    Exhausted { attempts: u32 },
    Inactive,
}

/// Bounded-retry policy of a single poll session.
///
/// Holds no timer and does no I/O: [`StatusPoller`](super::StatusPoller)
/// calls [`tick`](Self::tick) on every timer tick and feeds each query result
/// to [`apply_report`](Self::apply_report).
#[derive(Debug, Clone)]
pub struct PollSession {
    id: SessionId,
    notebook_id: String,
    interval: Duration,
    max_attempts: u32,
    attempt_count: u32,
    active: bool,
    mode: PollMode,
}

impl PollSession {
    pub fn new(
        id: SessionId,
        notebook_id: impl Into<String>,
        interval: Duration,
        max_attempts: u32,
        mode: PollMode,
    ) -> Result<Self, PollError> {
        let notebook_id = notebook_id.into();
        if interval.is_zero() {
            return Err(PollError::ZeroInterval { notebook_id });
        }
        if max_attempts == 0 {
            return Err(PollError::ZeroAttempts { notebook_id });
        }

        Ok(Self {
            id,
            notebook_id,
            interval,
            max_attempts,
            attempt_count: 0,
            active: true,
            mode,
        })
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn notebook_id(&self) -> &str {
        &self.notebook_id
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn attempt_count(&self) -> u32 {
        self.attempt_count
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn mode(&self) -> PollMode {
        self.mode
    }

    pub fn stop(&mut self) {
        self.active = false;
    }

    /// Count a timer tick and decide whether to query.
    ///
    /// Going past the budget deactivates the session without touching the
    /// notebook's status.
    pub fn tick(&mut self) -> TickDecision {
        if !self.active {
            return TickDecision::Inactive;
        }

        self.attempt_count += 1;
        if self.attempt_count > self.max_attempts {
            self.active = false;
            return TickDecision::Exhausted {
                attempts: self.max_attempts,
            };
        }

        TickDecision::Query {
            attempt: self.attempt_count,
        }
    }

    /// Fold one query result into the session and return what to emit.
    ///
    /// Results arriving after the session stopped produce nothing. Transport
    /// errors are absorbed. Once the last budgeted query came back without a
    /// terminal status, the session deactivates and reports exhaustion.
    pub fn apply_report(&mut self, report: StatusReport) -> Vec<PollEventKind> {
        if !self.active {
            debug!(
                event = "core.poller.response_discarded",
                notebook_id = %self.notebook_id,
                session = %self.id,
                reason = "session_inactive"
            );
            return Vec::new();
        }

        let mut emitted = Vec::new();
        match self.classify(report) {
            Some(kind) if kind.ends_session() => {
                self.active = false;
                emitted.push(kind);
                return emitted;
            }
            Some(kind) => emitted.push(kind),
            None => {}
        }

        if self.attempt_count >= self.max_attempts {
            self.active = false;
            emitted.push(PollEventKind::Exhausted {
                attempts: self.attempt_count,
            });
        }

        emitted
    }

    fn classify(&self, report: StatusReport) -> Option<PollEventKind> {
        match report {
            StatusReport::NotFound => Some(PollEventKind::NotFound),
            StatusReport::Ready { url } => match self.mode {
                PollMode::Provisioning => Some(PollEventKind::Ready { url }),
                PollMode::Teardown => Some(PollEventKind::Progress {
                    label: READY_LABEL.to_string(),
                }),
            },
            StatusReport::InProgress(label) => Some(PollEventKind::Progress { label }),
            StatusReport::TransportError(message) => {
                warn!(
                    event = "core.poller.query_failed",
                    notebook_id = %self.notebook_id,
                    session = %self.id,
                    attempt = self.attempt_count,
                    error = %message
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(max_attempts: u32, mode: PollMode) -> PollSession {
        PollSession::new(
            SessionId(1),
            "nb-1",
            Duration::from_millis(5),
            max_attempts,
            mode,
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_zero_interval() {
        let err = PollSession::new(SessionId(1), "nb-1", Duration::ZERO, 3, PollMode::Provisioning)
            .unwrap_err();
        assert!(matches!(err, PollError::ZeroInterval { .. }));
    }

    #[test]
    fn test_rejects_zero_attempts() {
        let err = PollSession::new(
            SessionId(1),
            "nb-1",
            Duration::from_secs(5),
            0,
            PollMode::Provisioning,
        )
        .unwrap_err();
        assert!(matches!(err, PollError::ZeroAttempts { .. }));
    }

    #[test]
    fn test_tick_past_budget_deactivates() {
        let mut s = session(2, PollMode::Provisioning);
        assert_eq!(s.tick(), TickDecision::Query { attempt: 1 });
        assert_eq!(s.tick(), TickDecision::Query { attempt: 2 });
        assert_eq!(s.tick(), TickDecision::Exhausted { attempts: 2 });
        assert!(!s.is_active());
        assert_eq!(s.tick(), TickDecision::Inactive);
        assert_eq!(s.attempt_count(), 3);
    }

    #[test]
    fn test_ready_ends_provisioning_session() {
        let mut s = session(5, PollMode::Provisioning);
        s.tick();
        let emitted = s.apply_report(StatusReport::Ready {
            url: Some("https://nb-1.example".to_string()),
        });
        assert_eq!(
            emitted,
            vec![PollEventKind::Ready {
                url: Some("https://nb-1.example".to_string())
            }]
        );
        assert!(!s.is_active());
    }

    #[test]
    fn test_ready_is_only_a_label_during_teardown() {
        let mut s = session(5, PollMode::Teardown);
        s.tick();
        let emitted = s.apply_report(StatusReport::Ready { url: None });
        assert_eq!(
            emitted,
            vec![PollEventKind::Progress {
                label: "Ready".to_string()
            }]
        );
        assert!(s.is_active());
    }

    #[test]
    fn test_transport_error_emits_nothing_and_keeps_polling() {
        let mut s = session(5, PollMode::Provisioning);
        s.tick();
        let emitted = s.apply_report(StatusReport::TransportError("timeout".to_string()));
        assert!(emitted.is_empty());
        assert!(s.is_active());
    }

    #[test]
    fn test_last_non_terminal_answer_exhausts() {
        let mut s = session(2, PollMode::Provisioning);
        s.tick();
        assert_eq!(
            s.apply_report(StatusReport::InProgress("Pending".to_string())),
            vec![PollEventKind::Progress {
                label: "Pending".to_string()
            }]
        );
        s.tick();
        assert_eq!(
            s.apply_report(StatusReport::InProgress("Pending".to_string())),
            vec![
                PollEventKind::Progress {
                    label: "Pending".to_string()
                },
                PollEventKind::Exhausted { attempts: 2 },
            ]
        );
        assert!(!s.is_active());
        assert_eq!(s.tick(), TickDecision::Inactive);
    }

    #[test]
    fn test_transport_error_on_last_attempt_exhausts() {
        let mut s = session(1, PollMode::Provisioning);
        s.tick();
        assert_eq!(
            s.apply_report(StatusReport::TransportError("refused".to_string())),
            vec![PollEventKind::Exhausted { attempts: 1 }]
        );
    }

    #[test]
    fn test_terminal_answer_on_last_attempt_is_not_exhaustion() {
        let mut s = session(1, PollMode::Provisioning);
        s.tick();
        assert_eq!(
            s.apply_report(StatusReport::NotFound),
            vec![PollEventKind::NotFound]
        );
    }

    #[test]
    fn test_response_after_stop_is_discarded() {
        let mut s = session(5, PollMode::Provisioning);
        s.tick();
        s.stop();
        assert!(s.apply_report(StatusReport::NotFound).is_empty());
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut s = session(5, PollMode::Provisioning);
        s.stop();
        s.stop();
        assert!(!s.is_active());
    }
}
