//! UI Orchestrator: the client-side state machine.
//!
//! Drives `Idle → FolderSelected → Requesting → Completed` from bridge
//! replies and publishes every state change on a `watch` channel for the
//! renderer. The orchestrator only talks to the controller through a
//! [`Bridge`]; it never sees the dialog or the network directly.
//!
//! Policies:
//! - Summarize without a folder is refused locally and never reaches the
//!   bridge.
//! - A second summarize while one is in flight is ignored.
//! - A result that settles after the folder changed is dropped.
//! - A caller naming a folder can only summarize the current selection.

pub mod errors;
pub mod state;
pub mod view;

use tokio::sync::watch;

use crate::bridge::{Bridge, BridgeError, FolderSelection, SummarizeResult};

pub use errors::OrchestratorError;
pub use state::{Phase, UiState};
pub use view::{forward_views, View, VIEW_EVENT};

/// How a summarize request ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SummarizeOutcome {
    /// The request settled and its result is now showing.
    Completed(SummarizeResult),
    /// Another request was already in flight; nothing was sent.
    AlreadyRequesting,
    /// The folder changed while the request was in flight; result dropped.
    Stale,
}

/// Decision taken atomically at the start of a summarize.
enum Gate {
    NoFolder,
    NotSelected,
    Busy,
    Start { folder: String, epoch: u64 },
}

/// Client-side workflow driver.
pub struct Orchestrator<B> {
    bridge: B,
    state: watch::Sender<UiState>,
}

impl<B: Bridge> Orchestrator<B> {
    pub fn new(bridge: B) -> Self {
        let (state, _) = watch::channel(UiState::default());
        Self { bridge, state }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> UiState {
        self.state.borrow().clone()
    }

    pub fn phase(&self) -> Phase {
        self.state.borrow().phase()
    }

    pub fn view(&self) -> View {
        View::from_state(&self.state.borrow())
    }

    /// Follow state changes.
    pub fn subscribe(&self) -> watch::Receiver<UiState> {
        self.state.subscribe()
    }

    /// Ask the controller for a folder.
    ///
    /// A chosen folder replaces the selection and clears any showing
    /// result. A cancel changes nothing.
    pub async fn choose_folder(&self) -> Result<FolderSelection, BridgeError> {
        let picked = self.bridge.choose_folder().await.inspect_err(|e| {
            tracing::warn!(error = %e, "choose_folder failed at the bridge");
        })?;

        if let Some(folder) = &picked {
            self.state.send_modify(|s| {
                s.selected_folder = Some(folder.clone());
                s.result = None;
                s.epoch += 1;
            });
        }

        Ok(picked)
    }

    /// Summarize the selected folder.
    ///
    /// `loading` is true from the moment the request is issued until it
    /// settles. Bridge transport errors settle the request as a failure
    /// result, same as service errors.
    pub async fn summarize(&self) -> Result<SummarizeOutcome, OrchestratorError> {
        self.run_summarize(None).await
    }

    /// Summarize `folder_path`, which must be the current selection.
    ///
    /// Used where the request comes from the UI surface with the path it
    /// is showing. Any other path is refused before reaching the bridge.
    pub async fn summarize_folder(
        &self,
        folder_path: &str,
    ) -> Result<SummarizeOutcome, OrchestratorError> {
        self.run_summarize(Some(folder_path)).await
    }

    async fn run_summarize(
        &self,
        expected: Option<&str>,
    ) -> Result<SummarizeOutcome, OrchestratorError> {
        let mut gate = Gate::NoFolder;
        self.state.send_if_modified(|s| {
            gate = match (&s.selected_folder, s.loading) {
                (None, _) => Gate::NoFolder,
                (Some(folder), _) if expected.is_some_and(|e| e != folder.as_str()) => {
                    Gate::NotSelected
                }
                (Some(_), true) => Gate::Busy,
                (Some(folder), false) => Gate::Start {
                    folder: folder.clone(),
                    epoch: s.epoch,
                },
            };
            let start = matches!(gate, Gate::Start { .. });
            if start {
                s.loading = true;
            }
            start
        });

        let (folder, epoch) = match gate {
            Gate::NoFolder => {
                tracing::warn!("summarize requested with no folder selected");
                return Err(OrchestratorError::NoFolderSelected);
            }
            Gate::NotSelected => {
                let folder = expected.unwrap_or_default().to_string();
                tracing::warn!(folder = %folder, "summarize requested for a folder that is not selected");
                return Err(OrchestratorError::NotSelected { folder });
            }
            Gate::Busy => {
                tracing::debug!("summarize already in flight, ignoring");
                return Ok(SummarizeOutcome::AlreadyRequesting);
            }
            Gate::Start { folder, epoch } => (folder, epoch),
        };

        let result = match self.bridge.summarize_now(&folder).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(folder = %folder, error = %e, "summarize failed at the bridge");
                SummarizeResult::failure(e)
            }
        };

        let mut outcome = SummarizeOutcome::Stale;
        self.state.send_modify(|s| {
            s.loading = false;
            if s.epoch == epoch {
                s.result = Some(result.clone());
                outcome = SummarizeOutcome::Completed(result);
            }
        });

        if outcome == SummarizeOutcome::Stale {
            tracing::info!(folder = %folder, "dropped result for a folder no longer selected");
        }
        Ok(outcome)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
