//! Orchestrator error types.

use thiserror::Error;

/// Requests the orchestrator refuses before touching the bridge.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrchestratorError {
    /// Summarize was requested with no folder chosen. Shown to the user as
    /// a warning; state is left untouched.
    #[error("Please choose a folder first")]
    NoFolderSelected,

    /// Summarize named a folder other than the current selection.
    #[error("{folder} is not the selected folder")]
    NotSelected { folder: String },
}
