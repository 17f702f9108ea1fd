//! Output surface of the tracker.
//!
//! The controller never touches a view directly; whatever shows the notebook
//! list (terminal, web page, test recorder) implements [`Renderer`].

pub trait Renderer {
    /// Replace the visible status text of a row.
    fn render_status_text(&mut self, row_id: &str, text: &str);

    /// Turn the row's label into a link to the running notebook.
    fn render_as_ready_link(&mut self, row_id: &str, url: &str, label: &str);

    /// Drop a row from the view.
    fn remove_row(&mut self, row_id: &str);

    /// Show the "no notebooks" placeholder in place of the list.
    fn render_empty_placeholder(&mut self);

    /// Show the row's label as plain text and disable its remove action.
    fn render_removal_pending(&mut self, _row_id: &str, _label: &str) {}

    /// Polling for a row gave up without reaching a terminal status.
    fn render_poll_exhausted(&mut self, _row_id: &str, _attempts: u32) {}
}
