//! Tauri IPC commands exposed to the webview.
//!
//! These are the only two commands registered with the invoke handler, and
//! the capability file grants nothing else. Callable from the frontend as
//! `invoke("choose_folder")` and `invoke("summarize_now", { folderPath })`.
//!
//! Both commands read the raw IPC body and decode it whole, so an argument
//! object with extra or mistyped keys is refused before anything runs. The
//! webview only ever receives [`View`]s: as the command reply and as
//! `cerebro://view` events.

use std::sync::Arc;

use tauri::ipc::{InvokeBody, Request};

use crate::bridge::{BridgeError, BridgeRequest, Capability, ChannelBridge};
use crate::orchestrator::{Orchestrator, View};

/// The orchestrator the desktop app runs, talking to the controller over
/// the in-process bridge.
pub type ShellOrchestrator = Orchestrator<ChannelBridge>;

fn decode(capability: Capability, request: &Request<'_>) -> Result<BridgeRequest, String> {
    let args = match request.body() {
        InvokeBody::Json(value) => value.clone(),
        _ => {
            let err = BridgeError::InvalidPayload {
                reason: format!("{} expects a JSON argument object", capability.name()),
            };
            tracing::warn!(error = %err, "rejected IPC payload");
            return Err(err.to_string());
        }
    };

    BridgeRequest::from_invoke(capability, args).map_err(|e| {
        tracing::warn!(capability = capability.name(), error = %e, "rejected IPC payload");
        e.to_string()
    })
}

/// Open the native directory picker on the main window.
#[tauri::command]
pub async fn choose_folder(
    request: Request<'_>,
    orchestrator: tauri::State<'_, Arc<ShellOrchestrator>>,
) -> Result<View, String> {
    decode(Capability::ChooseFolder, &request)?;
    orchestrator.choose_folder().await.map_err(|e| e.to_string())?;
    Ok(orchestrator.view())
}

/// Summarize the selected folder via the embedding service.
///
/// Service failures are not errors here: they land in the view as
/// `Error: <message>`. The command only fails when the payload is rejected
/// or the orchestrator refuses the request (no folder, wrong folder).
#[tauri::command]
pub async fn summarize_now(
    request: Request<'_>,
    orchestrator: tauri::State<'_, Arc<ShellOrchestrator>>,
) -> Result<View, String> {
    let folder_path = match decode(Capability::SummarizeNow, &request)? {
        BridgeRequest::SummarizeNow(args) => args.folder_path,
        other => return Err(format!("unexpected {} request", other.capability().name())),
    };

    let outcome = orchestrator
        .summarize_folder(&folder_path)
        .await
        .map_err(|e| e.to_string())?;
    tracing::debug!(?outcome, "summarize_now settled");

    Ok(orchestrator.view())
}
