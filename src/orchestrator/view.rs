//! Render model for the single screen.

use serde::Serialize;
use tokio::sync::watch;

use super::state::UiState;

/// Event name views are published under to the UI surface.
pub const VIEW_EVENT: &str = "cerebro://view";

pub const TITLE: &str = "Cerebro";
pub const CHOOSE_LABEL: &str = "Choose Folder";
pub const SUMMARIZE_LABEL: &str = "Summarize Now";
pub const PROCESSING_LABEL: &str = "Processing...";

/// What a renderer needs to draw the screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct View {
    pub title: &'static str,
    pub choose_label: &'static str,
    /// Raw selected path, echoed back by the UI when it asks to summarize.
    pub selected_folder: Option<String>,
    /// `Selected: <path>` once a folder is chosen.
    pub selected_line: Option<String>,
    pub summarize_label: &'static str,
    pub summarize_enabled: bool,
    /// Summary text or `Error: <message>`.
    pub summary_text: Option<String>,
}

impl View {
    pub fn from_state(state: &UiState) -> Self {
        Self {
            title: TITLE,
            choose_label: CHOOSE_LABEL,
            selected_folder: state.selected_folder.clone(),
            selected_line: state
                .selected_folder
                .as_ref()
                .map(|folder| format!("Selected: {folder}")),
            summarize_label: if state.loading {
                PROCESSING_LABEL
            } else {
                SUMMARIZE_LABEL
            },
            summarize_enabled: state.selected_folder.is_some() && !state.loading,
            summary_text: state.result_text(),
        }
    }
}

/// Hand a [`View`] of every state change to `emit`, starting with the
/// current one. Returns once the orchestrator is dropped.
pub async fn forward_views<F>(mut states: watch::Receiver<UiState>, mut emit: F)
where
    F: FnMut(View),
{
    let view = View::from_state(&states.borrow_and_update());
    emit(view);

    while states.changed().await.is_ok() {
        let view = View::from_state(&states.borrow_and_update());
        emit(view);
    }
    tracing::debug!("orchestrator gone, view forwarding stopped");
}
