use nbwatch_core::NotebookSummary;

pub struct TableFormatter {
    id_width: usize,
    name_width: usize,
    status_width: usize,
    image_width: usize,
    created_width: usize,
    remaining_width: usize,
}

impl TableFormatter {
    pub fn new(notebooks: &[NotebookSummary]) -> Self {
        let id_width = notebooks
            .iter()
            .map(|n| n.id.chars().count())
            .max()
            .unwrap_or(16)
            .clamp(2, 40);
        let status_width = notebooks
            .iter()
            .map(|n| n.status.chars().count())
            .max()
            .unwrap_or(6)
            .clamp(6, 24);

        Self {
            id_width,
            name_width: 20,
            status_width,
            image_width: 20,
            created_width: 16,
            remaining_width: 9,
        }
    }

    pub fn print_table(&self, notebooks: &[NotebookSummary]) {
        println!("{}", self.border('┌', '┬', '┐'));
        println!(
            "{}",
            self.row(["Id", "Name", "Status", "Image", "Created", "Remaining"])
        );
        println!("{}", self.border('├', '┼', '┤'));
        for notebook in notebooks {
            println!("{}", self.notebook_row(notebook));
        }
        println!("{}", self.border('└', '┴', '┘'));
    }

    fn notebook_row(&self, notebook: &NotebookSummary) -> String {
        let created = notebook
            .creation_date
            .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        let remaining = notebook
            .hours_remaining
            .map(|h| format!("{}h", h))
            .unwrap_or_default();

        self.row([
            notebook.id.as_str(),
            notebook.name.as_deref().unwrap_or(&notebook.id),
            notebook.status.as_str(),
            notebook.image.as_deref().unwrap_or(""),
            created.as_str(),
            remaining.as_str(),
        ])
    }

    fn widths(&self) -> [usize; 6] {
        [
            self.id_width,
            self.name_width,
            self.status_width,
            self.image_width,
            self.created_width,
            self.remaining_width,
        ]
    }

    fn row(&self, cells: [&str; 6]) -> String {
        let body: Vec<String> = cells
            .iter()
            .zip(self.widths())
            .map(|(cell, width)| truncate(cell, width))
            .collect();
        format!("│ {} │", body.join(" │ "))
    }

    fn border(&self, left: char, mid: char, right: char) -> String {
        let segments: Vec<String> = self.widths().iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{}{}{}", left, segments.join(&mid.to_string()), right)
    }
}

/// Truncate a string to a maximum display width, adding "..." if truncated.
///
/// Uses character count (not byte count) to safely handle UTF-8 strings
/// including emoji and multi-byte characters.
pub fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        format!("{:<width$}", s, width = max_len)
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{:<width$}", format!("{}...", truncated), width = max_len)
    }
}
