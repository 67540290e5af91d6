//! Folder picker seam.
//!
//! The controller only needs "ask the user for one directory". The desktop
//! build answers with the native dialog from `tauri-plugin-dialog`; tests
//! plug in scripted pickers.

use std::path::PathBuf;

use async_trait::async_trait;

/// Something that can ask the user for a single directory.
#[async_trait]
pub trait FolderPicker: Send + Sync {
    /// Show the picker. `None` means the user cancelled.
    async fn pick_folder(&self) -> Option<PathBuf>;
}

#[cfg(feature = "desktop")]
pub use desktop::DialogPicker;

#[cfg(feature = "desktop")]
mod desktop {
    use std::path::PathBuf;

    use async_trait::async_trait;
    use tauri::{AppHandle, Manager};
    use tauri_plugin_dialog::DialogExt;
    use tokio::sync::oneshot;

    use super::FolderPicker;

    /// Native directory dialog, parented on the session window when it is
    /// open.
    pub struct DialogPicker {
        app: AppHandle,
        window_label: String,
    }

    impl DialogPicker {
        pub fn new(app: AppHandle, window_label: impl Into<String>) -> Self {
            Self {
                app,
                window_label: window_label.into(),
            }
        }
    }

    #[async_trait]
    impl FolderPicker for DialogPicker {
        async fn pick_folder(&self) -> Option<PathBuf> {
            let (tx, rx) = oneshot::channel();

            let mut dialog = self.app.dialog().file();
            if let Some(window) = self.app.get_webview_window(&self.window_label) {
                dialog = dialog.set_parent(&window);
            }
            dialog.pick_folder(move |picked| {
                let _ = tx.send(picked);
            });

            let picked = match rx.await {
                Ok(picked) => picked?,
                Err(_) => {
                    tracing::warn!("folder dialog closed without a reply, treating as cancel");
                    return None;
                }
            };

            match picked.into_path() {
                Ok(path) => Some(path),
                Err(e) => {
                    tracing::warn!(error = %e, "folder dialog returned a non-path selection");
                    None
                }
            }
        }
    }
}
