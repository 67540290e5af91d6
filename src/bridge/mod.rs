//! Bridge Contract: the only capabilities the UI surface may invoke.
//!
//! Two operations, both asynchronous and both returning plain values:
//! - `choose_folder`: open the directory picker on the owned window
//! - `summarize_now`: ask the embedding service about a folder
//!
//! `summarize_now` always resolves; failures are encoded in the
//! [`SummarizeResult`] rather than returned as an error.

pub mod channel;
pub mod errors;
pub mod types;

use async_trait::async_trait;

pub use channel::{dispatch, execute, serve, ChannelBridge};
pub use errors::BridgeError;
pub use types::{
    BridgeRequest, BridgeResponse, Capability, FolderSelection, SummarizeArgs, SummarizeResult,
};

/// Capability interface implemented by the controller and by bridge clients.
///
/// A `BridgeError` means the request never completed at the boundary.
/// The controller itself never produces one.
#[async_trait]
pub trait Bridge: Send + Sync {
    /// Open the directory picker. `None` when the user cancels.
    async fn choose_folder(&self) -> Result<FolderSelection, BridgeError>;

    /// Summarize a folder previously returned by [`Bridge::choose_folder`].
    async fn summarize_now(&self, folder_path: &str) -> Result<SummarizeResult, BridgeError>;
}

#[async_trait]
impl<B: Bridge + ?Sized> Bridge for std::sync::Arc<B> {
    async fn choose_folder(&self) -> Result<FolderSelection, BridgeError> {
        (**self).choose_folder().await
    }

    async fn summarize_now(&self, folder_path: &str) -> Result<SummarizeResult, BridgeError> {
        (**self).summarize_now(folder_path).await
    }
}
