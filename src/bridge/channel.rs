//! In-process bridge transport.
//!
//! The UI side holds a [`ChannelBridge`]; the controller side runs [`serve`].
//! Requests and replies cross as serialized JSON strings, so only values
//! ever pass between the two sides. Every payload is decoded strictly by
//! [`dispatch`] before the controller sees it.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use super::errors::BridgeError;
use super::types::{BridgeRequest, BridgeResponse, FolderSelection, SummarizeArgs, SummarizeResult};
use super::Bridge;

/// Default depth of the request queue between the two sides.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 16;

/// One request in flight: the JSON payload and where to send the reply.
#[derive(Debug)]
pub struct BridgeCall {
    payload: String,
    reply: oneshot::Sender<Result<String, BridgeError>>,
}

// ─── Controller Side ─────────────────────────────────────────────────────────

/// Decode a raw payload, run the named capability, and encode the reply.
///
/// Payloads outside the declared request shape are rejected here and never
/// reach `bridge`.
pub async fn dispatch<B: Bridge + ?Sized>(bridge: &B, payload: &str) -> Result<String, BridgeError> {
    let request: BridgeRequest = serde_json::from_str(payload).map_err(|e| {
        tracing::warn!(error = %e, "rejected bridge payload");
        BridgeError::from(e)
    })?;

    let response = execute(bridge, request).await?;

    serde_json::to_string(&response).map_err(|e| BridgeError::Transport {
        reason: format!("failed to encode reply: {e}"),
    })
}

/// Run an already-decoded request against `bridge`.
pub async fn execute<B: Bridge + ?Sized>(
    bridge: &B,
    request: BridgeRequest,
) -> Result<BridgeResponse, BridgeError> {
    tracing::debug!(capability = request.capability().name(), "bridge request");

    Ok(match request {
        BridgeRequest::ChooseFolder => BridgeResponse::Folder(bridge.choose_folder().await?),
        BridgeRequest::SummarizeNow(SummarizeArgs { folder_path }) => {
            BridgeResponse::Summary(bridge.summarize_now(&folder_path).await?)
        }
    })
}

/// Answer bridge calls until every [`ChannelBridge`] clone is dropped.
///
/// Each call runs on its own task so a slow summarize does not hold up a
/// folder dialog.
pub async fn serve<B>(bridge: Arc<B>, mut calls: mpsc::Receiver<BridgeCall>)
where
    B: Bridge + ?Sized + 'static,
{
    while let Some(call) = calls.recv().await {
        let bridge = Arc::clone(&bridge);
        tokio::spawn(async move {
            let reply = dispatch(bridge.as_ref(), &call.payload).await;
            if call.reply.send(reply).is_err() {
                tracing::debug!("bridge caller dropped before reply");
            }
        });
    }
    tracing::debug!("bridge channel closed");
}

// ─── UI Side ─────────────────────────────────────────────────────────────────

/// UI-side handle to the controller.
#[derive(Debug, Clone)]
pub struct ChannelBridge {
    calls: mpsc::Sender<BridgeCall>,
}

impl ChannelBridge {
    pub fn new(calls: mpsc::Sender<BridgeCall>) -> Self {
        Self { calls }
    }

    /// Spawn [`serve`] for `bridge` and return a connected client.
    pub fn connect<B>(bridge: Arc<B>) -> (Self, JoinHandle<()>)
    where
        B: Bridge + ?Sized + 'static,
    {
        let (tx, rx) = mpsc::channel(DEFAULT_CHANNEL_CAPACITY);
        let handle = tokio::spawn(serve(bridge, rx));
        (Self::new(tx), handle)
    }

    /// Send a raw JSON payload and return the raw JSON reply.
    pub async fn send_raw(&self, payload: String) -> Result<String, BridgeError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.calls
            .send(BridgeCall {
                payload,
                reply: reply_tx,
            })
            .await
            .map_err(|_| BridgeError::Transport {
                reason: "controller is not running".into(),
            })?;

        reply_rx.await.map_err(|_| BridgeError::Transport {
            reason: "controller dropped the request".into(),
        })?
    }

    async fn call(&self, request: &BridgeRequest) -> Result<String, BridgeError> {
        let payload = serde_json::to_string(request).map_err(|e| BridgeError::Transport {
            reason: format!("failed to encode request: {e}"),
        })?;
        self.send_raw(payload).await
    }
}

fn decode_reply<T: serde::de::DeserializeOwned>(raw: &str) -> Result<T, BridgeError> {
    serde_json::from_str(raw).map_err(|e| BridgeError::Transport {
        reason: format!("unexpected reply shape: {e}"),
    })
}

#[async_trait]
impl Bridge for ChannelBridge {
    async fn choose_folder(&self) -> Result<FolderSelection, BridgeError> {
        let raw = self.call(&BridgeRequest::ChooseFolder).await?;
        decode_reply(&raw)
    }

    async fn summarize_now(&self, folder_path: &str) -> Result<SummarizeResult, BridgeError> {
        let request = BridgeRequest::SummarizeNow(SummarizeArgs {
            folder_path: folder_path.to_string(),
        });
        let raw = self.call(&request).await?;
        decode_reply(&raw)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
