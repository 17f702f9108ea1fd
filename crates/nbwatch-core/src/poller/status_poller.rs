use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::api::{NotebookApi, StatusReport};
use crate::poller::session::{PollEvent, PollEventKind, PollMode, PollSession, SessionId, TickDecision};

fn lock(session: &Mutex<PollSession>) -> MutexGuard<'_, PollSession> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Drives one [`PollSession`] on a repeating timer.
///
/// The session state is shared with the spawned task; the lock is only taken
/// between await points. Dropping the poller stops it.
pub struct StatusPoller {
    session: Arc<Mutex<PollSession>>,
    task: JoinHandle<()>,
}

impl StatusPoller {
    /// Spawn the polling loop. The first query happens one interval from now.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(
        api: Arc<dyn NotebookApi>,
        session: PollSession,
        events: UnboundedSender<PollEvent>,
    ) -> Self {
        info!(
            event = "core.poller.started",
            notebook_id = %session.notebook_id(),
            session = %session.id(),
            interval_ms = session.interval().as_millis() as u64,
            max_attempts = session.max_attempts(),
            mode = ?session.mode()
        );

        let session = Arc::new(Mutex::new(session));
        let task = tokio::spawn(run_session(api, Arc::clone(&session), events));
        Self { session, task }
    }

    /// Cancel the timer. Safe to call any number of times, from any state.
    ///
    /// A query already in flight is abandoned; an event already queued is
    /// left for the controller to discard.
    pub fn stop(&self) {
        let mut session = lock(&self.session);
        if session.is_active() {
            debug!(
                event = "core.poller.stopped",
                notebook_id = %session.notebook_id(),
                session = %session.id()
            );
        }
        session.stop();
        drop(session);
        self.task.abort();
    }

    pub fn session_id(&self) -> SessionId {
        lock(&self.session).id()
    }

    pub fn is_active(&self) -> bool {
        lock(&self.session).is_active()
    }

    pub fn attempt_count(&self) -> u32 {
        lock(&self.session).attempt_count()
    }

    pub fn mode(&self) -> PollMode {
        lock(&self.session).mode()
    }

    pub fn interval(&self) -> Duration {
        lock(&self.session).interval()
    }
}

impl Drop for StatusPoller {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run_session(
    api: Arc<dyn NotebookApi>,
    session: Arc<Mutex<PollSession>>,
    events: UnboundedSender<PollEvent>,
) {
    let (notebook_id, session_id, interval) = {
        let s = lock(&session);
        (s.notebook_id().to_string(), s.id(), s.interval())
    };

    let emit = |kind: PollEventKind| {
        events
            .send(PollEvent {
                notebook_id: notebook_id.clone(),
                session_id,
                kind,
            })
            .is_ok()
    };

    let mut ticker = time::interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let decision = lock(&session).tick();
        let attempt = match decision {
            TickDecision::Query { attempt } => attempt,
            TickDecision::Exhausted { attempts } => {
                warn!(
                    event = "core.poller.budget_exhausted",
                    notebook_id = %notebook_id,
                    session = %session_id,
                    attempts = attempts
                );
                emit(PollEventKind::Exhausted { attempts });
                return;
            }
            TickDecision::Inactive => return,
        };

        debug!(
            event = "core.poller.query_started",
            notebook_id = %notebook_id,
            session = %session_id,
            attempt = attempt
        );

        let report = StatusReport::from_result(api.status(&notebook_id).await);
        let emitted = lock(&session).apply_report(report);

        for kind in emitted {
            if let PollEventKind::Exhausted { attempts } = kind {
                warn!(
                    event = "core.poller.budget_exhausted",
                    notebook_id = %notebook_id,
                    session = %session_id,
                    attempts = attempts
                );
            }
            if !emit(kind) {
                debug!(
                    event = "core.poller.controller_gone",
                    notebook_id = %notebook_id,
                    session = %session_id
                );
                lock(&session).stop();
                return;
            }
        }

        if !lock(&session).is_active() {
            debug!(
                event = "core.poller.finished",
                notebook_id = %notebook_id,
                session = %session_id,
                attempts = attempt
            );
            return;
        }
    }
}
