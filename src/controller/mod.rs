//! Controller: the privileged side of the bridge.
//!
//! Owns the window session, runs the native folder dialog, and makes the
//! outbound call to the embedding service. Every failure of the summarize
//! flow is normalized into `SummarizeResult::Failure` here, so bridge calls
//! into the controller always resolve.

pub mod embedding;
pub mod errors;
pub mod picker;
pub mod session;

use async_trait::async_trait;

use crate::bridge::{Bridge, BridgeError, FolderSelection, SummarizeResult};

pub use embedding::{EmbedResponse, EmbeddingClient};
pub use errors::ServiceError;
pub use picker::FolderPicker;
pub use session::{CloseAction, ReopenAction, Session, UiSource, MAIN_WINDOW_LABEL};

/// Summary text for a folder: a stand-in until real summarization exists.
pub fn compose_summary(folder_path: &str, dimensions: usize) -> String {
    format!("Mock summary for folder: {folder_path}\nEmbedding dimensions: {dimensions}")
}

/// The single privileged controller for one application run.
pub struct Controller {
    session: Session,
    picker: Box<dyn FolderPicker>,
    embeddings: EmbeddingClient,
}

impl Controller {
    pub fn new(session: Session, picker: Box<dyn FolderPicker>, embeddings: EmbeddingClient) -> Self {
        Self {
            session,
            picker,
            embeddings,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Show the directory picker. Returns the chosen absolute path, or
    /// `None` on cancel.
    pub async fn choose_folder(&self) -> FolderSelection {
        let picked = self.picker.pick_folder().await;
        match &picked {
            Some(path) => tracing::info!(folder = %path.display(), "folder selected"),
            None => tracing::debug!("folder dialog cancelled"),
        }
        picked.map(|path| path.to_string_lossy().into_owned())
    }

    /// Ask the embedding service about `folder_path` and build the result.
    ///
    /// Never fails: service errors become `SummarizeResult::Failure`.
    pub async fn summarize_now(&self, folder_path: &str) -> SummarizeResult {
        match self.embeddings.embed(folder_path).await {
            Ok(response) => {
                let dimensions = response.embedding.len();
                tracing::info!(folder = %folder_path, dimensions, "summarize succeeded");
                SummarizeResult::Success {
                    summary: compose_summary(folder_path, dimensions),
                    embedding: response.embedding,
                }
            }
            Err(e) => {
                tracing::warn!(
                    folder = %folder_path,
                    endpoint = %self.embeddings.endpoint(),
                    status = ?e.status(),
                    error = %e,
                    "summarize failed"
                );
                SummarizeResult::failure(e)
            }
        }
    }
}

#[async_trait]
impl Bridge for Controller {
    async fn choose_folder(&self) -> Result<FolderSelection, BridgeError> {
        Ok(Controller::choose_folder(self).await)
    }

    async fn summarize_now(&self, folder_path: &str) -> Result<SummarizeResult, BridgeError> {
        Ok(Controller::summarize_now(self, folder_path).await)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
