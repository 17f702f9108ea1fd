pub mod errors;
pub mod types;

// Re-export commonly used types
pub use errors::NotebookError;
pub use types::{NOT_FOUND_LABEL, NotebookStatus, READY_LABEL, REMOVING_LABEL, TrackedNotebook};
