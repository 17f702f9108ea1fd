use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use crate::api::NotebookApi;
use crate::controller::PollingCadence;
use crate::notebooks::{
    NotebookError, NotebookStatus, READY_LABEL, REMOVING_LABEL, TrackedNotebook,
};
use crate::poller::{PollEvent, PollEventKind, PollMode, PollSession, SessionId, StatusPoller};
use crate::render::Renderer;

/// Result of a removal request the portal answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalOutcome {
    /// Teardown started; the row now shows the removing placeholder.
    Accepted { message: Option<String> },
    /// The portal refused. Nothing changed and the row stays actionable.
    Rejected { message: Option<String> },
}

/// Owns the notebook rows and their poll sessions.
///
/// Single-owner, single-task: rows are only mutated through `&mut self`, and
/// poll results only reach them through [`apply_event`](Self::apply_event).
pub struct NotebookListController<R: Renderer> {
    api: Arc<dyn NotebookApi>,
    renderer: R,
    cadence: PollingCadence,
    rows: Vec<TrackedNotebook>,
    pollers: HashMap<String, StatusPoller>,
    next_session: u64,
    events_tx: UnboundedSender<PollEvent>,
    events_rx: UnboundedReceiver<PollEvent>,
}

impl<R: Renderer> NotebookListController<R> {
    pub fn new(api: Arc<dyn NotebookApi>, renderer: R, cadence: PollingCadence) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            api,
            renderer,
            cadence,
            rows: Vec::new(),
            pollers: HashMap::new(),
            next_session: 0,
            events_tx,
            events_rx,
        }
    }

    /// Replace the list with `rows`, render them, and start polling every
    /// row that has not settled yet.
    ///
    /// Pending rows poll at the normal cadence; rows the portal already
    /// reports as being removed poll at the removal cadence. Rows that are
    /// gone already are skipped.
    pub fn initialize(&mut self, rows: Vec<TrackedNotebook>) -> Result<(), NotebookError> {
        self.shutdown();
        self.rows.clear();

        for row in rows {
            if matches!(row.status, NotebookStatus::NotFound | NotebookStatus::Removed) {
                debug!(
                    event = "core.list.row_skipped",
                    notebook_id = %row.id,
                    status = %row.status
                );
                continue;
            }
            if self.rows.iter().any(|existing| existing.id == row.id) {
                warn!(event = "core.list.duplicate_row", notebook_id = %row.id);
                continue;
            }
            self.render_row(&row);
            self.rows.push(row);
        }

        info!(event = "core.list.initialized", rows = self.rows.len());

        if self.rows.is_empty() {
            self.renderer.render_empty_placeholder();
            return Ok(());
        }

        let to_watch: Vec<(String, PollMode)> = self
            .rows
            .iter()
            .filter_map(|row| match row.status {
                NotebookStatus::Pending => Some((row.id.clone(), PollMode::Provisioning)),
                NotebookStatus::Removing => Some((row.id.clone(), PollMode::Teardown)),
                _ => None,
            })
            .collect();

        for (notebook_id, mode) in to_watch {
            self.watch(&notebook_id, mode)?;
        }

        Ok(())
    }

    /// Start a poll session for a tracked notebook, superseding any session
    /// it already has.
    pub fn watch(&mut self, notebook_id: &str, mode: PollMode) -> Result<SessionId, NotebookError> {
        if self.find(notebook_id).is_none() {
            return Err(NotebookError::NotTracked {
                id: notebook_id.to_string(),
            });
        }

        let interval = match mode {
            PollMode::Provisioning => self.cadence.interval,
            PollMode::Teardown => self.cadence.removal_interval,
        };
        let session_id = SessionId(self.next_session + 1);
        let session = PollSession::new(
            session_id,
            notebook_id,
            interval,
            self.cadence.max_attempts,
            mode,
        )?;
        self.next_session += 1;

        if let Some(previous) = self.pollers.remove(notebook_id) {
            debug!(
                event = "core.list.session_superseded",
                notebook_id = notebook_id,
                previous = %previous.session_id(),
                current = %session_id
            );
            previous.stop();
        }

        let poller = StatusPoller::start(Arc::clone(&self.api), session, self.events_tx.clone());
        self.pollers.insert(notebook_id.to_string(), poller);
        Ok(session_id)
    }

    /// Ask the portal to remove a notebook.
    ///
    /// On acceptance the row switches to the removing placeholder and a
    /// slower teardown session replaces whatever session it had. On rejection
    /// or transport failure nothing changes, so the user can retry.
    pub async fn request_removal(
        &mut self,
        notebook_id: &str,
    ) -> Result<RemovalOutcome, NotebookError> {
        let row = self.find(notebook_id).ok_or_else(|| NotebookError::NotTracked {
            id: notebook_id.to_string(),
        })?;
        if !row.status.is_removable() {
            return Err(NotebookError::NotRemovable {
                id: notebook_id.to_string(),
                status: row.status,
            });
        }

        info!(event = "core.removal.requested", notebook_id = notebook_id);

        let response = match self.api.remove(notebook_id).await {
            Ok(response) => response,
            Err(source) => {
                warn!(
                    event = "core.removal.request_failed",
                    notebook_id = notebook_id,
                    error = %source
                );
                return Err(NotebookError::RemovalRequestFailed {
                    id: notebook_id.to_string(),
                    source,
                });
            }
        };

        if !response.success {
            warn!(
                event = "core.removal.rejected",
                notebook_id = notebook_id,
                message = response.message.as_deref().unwrap_or("")
            );
            return Ok(RemovalOutcome::Rejected {
                message: response.message,
            });
        }

        let row = self
            .rows
            .iter_mut()
            .find(|row| row.id == notebook_id)
            .ok_or_else(|| NotebookError::NotTracked {
                id: notebook_id.to_string(),
            })?;
        row.advance(NotebookStatus::Removing)?;
        row.status_text = REMOVING_LABEL.to_string();
        let label = row.name.clone();

        self.renderer.render_status_text(notebook_id, REMOVING_LABEL);
        self.renderer.render_removal_pending(notebook_id, &label);
        self.watch(notebook_id, PollMode::Teardown)?;

        info!(event = "core.removal.accepted", notebook_id = notebook_id);

        Ok(RemovalOutcome::Accepted {
            message: response.message,
        })
    }

    /// Drop a row from the list and the view, stopping its session.
    ///
    /// Shows the empty placeholder once the last row is gone. Returns false
    /// if the row was not in the list.
    pub fn on_row_removed(&mut self, notebook_id: &str) -> bool {
        if let Some(poller) = self.pollers.remove(notebook_id) {
            poller.stop();
        }

        let Some(index) = self.rows.iter().position(|row| row.id == notebook_id) else {
            return false;
        };
        self.rows.remove(index);
        self.renderer.remove_row(notebook_id);

        info!(
            event = "core.list.row_removed",
            notebook_id = notebook_id,
            remaining = self.rows.len()
        );

        if self.rows.is_empty() {
            self.renderer.render_empty_placeholder();
        }
        true
    }

    /// Apply one poll event. Returns false if it was discarded.
    ///
    /// Events from a session that is no longer the notebook's current one,
    /// for rows that are gone, or for rows already removed are dropped.
    pub fn apply_event(&mut self, event: PollEvent) -> bool {
        let current = self.pollers.get(&event.notebook_id).map(StatusPoller::session_id);
        if current != Some(event.session_id) {
            debug!(
                event = "core.list.event_discarded",
                notebook_id = %event.notebook_id,
                session = %event.session_id,
                reason = "superseded_session"
            );
            return false;
        }

        let ends_session = event.kind.ends_session();
        let applied = self.apply_to_row(&event.notebook_id, event.kind);
        if ends_session {
            self.pollers.remove(&event.notebook_id);
        }
        applied
    }

    fn apply_to_row(&mut self, notebook_id: &str, kind: PollEventKind) -> bool {
        let Some(row) = self.rows.iter_mut().find(|row| row.id == notebook_id) else {
            debug!(
                event = "core.list.event_discarded",
                notebook_id = notebook_id,
                reason = "row_gone"
            );
            return false;
        };
        if row.status == NotebookStatus::Removed {
            debug!(
                event = "core.list.event_discarded",
                notebook_id = notebook_id,
                reason = "row_removed"
            );
            return false;
        }

        match kind {
            PollEventKind::Progress { label } => {
                row.status_text = label;
                self.renderer.render_status_text(notebook_id, &row.status_text);
                true
            }
            PollEventKind::Ready { url } => {
                if let Err(e) = row.advance(NotebookStatus::Ready) {
                    warn!(event = "core.list.transition_rejected", error = %e);
                    return false;
                }
                row.url = url.or_else(|| row.access_url.clone());
                row.status_text = READY_LABEL.to_string();

                self.renderer.render_status_text(notebook_id, READY_LABEL);
                match &row.url {
                    Some(url) => self.renderer.render_as_ready_link(notebook_id, url, &row.name),
                    None => warn!(
                        event = "core.list.ready_without_url",
                        notebook_id = notebook_id
                    ),
                }
                info!(event = "core.list.notebook_ready", notebook_id = notebook_id);
                true
            }
            PollEventKind::NotFound => {
                let next = if row.status == NotebookStatus::Removing {
                    NotebookStatus::Removed
                } else {
                    NotebookStatus::NotFound
                };
                if let Err(e) = row.advance(next) {
                    warn!(event = "core.list.transition_rejected", error = %e);
                    return false;
                }
                info!(
                    event = "core.list.notebook_gone",
                    notebook_id = notebook_id,
                    status = %next
                );
                self.on_row_removed(notebook_id);
                true
            }
            PollEventKind::Exhausted { attempts } => {
                warn!(
                    event = "core.list.polling_gave_up",
                    notebook_id = notebook_id,
                    attempts = attempts,
                    status = %row.status
                );
                self.renderer.render_poll_exhausted(notebook_id, attempts);
                true
            }
        }
    }

    /// Wait for the next poll event and apply it.
    ///
    /// Returns `None` when no session is left to produce events, otherwise
    /// whether the event was applied.
    pub async fn next_event(&mut self) -> Option<bool> {
        if self.pollers.is_empty() {
            return None;
        }
        let event = self.events_rx.recv().await?;
        Some(self.apply_event(event))
    }

    /// Apply events until every session has finished.
    pub async fn run_until_settled(&mut self) {
        while self.next_event().await.is_some() {}
    }

    /// Stop every session. Rows are kept.
    pub fn shutdown(&mut self) {
        for (_, poller) in self.pollers.drain() {
            poller.stop();
        }
    }

    fn render_row(&mut self, row: &TrackedNotebook) {
        self.renderer.render_status_text(&row.id, &row.status_text);
        match row.status {
            NotebookStatus::Ready => {
                if let Some(url) = &row.url {
                    self.renderer.render_as_ready_link(&row.id, url, &row.name);
                }
            }
            NotebookStatus::Removing => self.renderer.render_removal_pending(&row.id, &row.name),
            _ => {}
        }
    }

    fn find(&self, notebook_id: &str) -> Option<&TrackedNotebook> {
        self.rows.iter().find(|row| row.id == notebook_id)
    }

    pub fn get(&self, notebook_id: &str) -> Option<&TrackedNotebook> {
        self.find(notebook_id)
    }

    pub fn rows(&self) -> &[TrackedNotebook] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn poller(&self, notebook_id: &str) -> Option<&StatusPoller> {
        self.pollers.get(notebook_id)
    }

    pub fn active_session_count(&self) -> usize {
        self.pollers.values().filter(|p| p.is_active()).count()
    }

    pub fn cadence(&self) -> PollingCadence {
        self.cadence
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}
