//! The one privileged window session and its lifecycle policy.
//!
//! A `Session` is created once by `run()` and handed to whoever needs the
//! window. Nothing keeps a module-level window reference.

use crate::config::{RunMode, WindowConfig};

/// Label of the single owned window.
pub const MAIN_WINDOW_LABEL: &str = "main";

/// What to do once the last window has closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseAction {
    /// Terminate the process.
    Exit,
    /// Stay resident until an explicit quit (macOS convention).
    StayResident,
}

/// What to do when the app is reactivated (e.g. dock icon click).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReopenAction {
    /// No window exists; build a fresh one.
    RecreateWindow,
    /// A window already exists; leave it alone.
    Nothing,
}

/// Where the window loads the UI surface from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiSource {
    /// Dev server URL; devtools are opened alongside.
    DevServer(String),
    /// Bundled entry point inside the app assets.
    Bundled(String),
}

/// The privileged window session.
#[derive(Debug, Clone)]
pub struct Session {
    label: String,
    window: WindowConfig,
    mode: RunMode,
    stays_resident: bool,
}

impl Session {
    /// Build a session for the current platform.
    pub fn new(window: WindowConfig, mode: RunMode) -> Self {
        Self::for_platform(window, mode, std::env::consts::OS)
    }

    /// Build a session for an explicit platform name (`std::env::consts::OS`).
    pub fn for_platform(window: WindowConfig, mode: RunMode, os: &str) -> Self {
        Self {
            label: MAIN_WINDOW_LABEL.to_string(),
            window,
            mode,
            stays_resident: os == "macos",
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn window(&self) -> &WindowConfig {
        &self.window
    }

    pub fn mode(&self) -> RunMode {
        self.mode
    }

    pub fn ui_source(&self) -> UiSource {
        match self.mode {
            RunMode::Development => UiSource::DevServer(self.window.dev_url.clone()),
            RunMode::Production => UiSource::Bundled(self.window.dist_index.clone()),
        }
    }

    pub fn on_all_windows_closed(&self) -> CloseAction {
        if self.stays_resident {
            CloseAction::StayResident
        } else {
            CloseAction::Exit
        }
    }

    /// Reattach rather than duplicate: only recreate when nothing is open.
    pub fn on_reopen(&self, open_windows: usize) -> ReopenAction {
        if open_windows == 0 {
            ReopenAction::RecreateWindow
        } else {
            ReopenAction::Nothing
        }
    }

    /// Return the session window, building it if it is gone.
    #[cfg(feature = "desktop")]
    pub fn attach<R: tauri::Runtime, M: tauri::Manager<R>>(
        &self,
        manager: &M,
    ) -> Result<tauri::WebviewWindow<R>, Box<dyn std::error::Error>> {
        if let Some(window) = manager.get_webview_window(&self.label) {
            tracing::debug!(label = %self.label, "reattached existing window");
            return Ok(window);
        }

        let url = match self.ui_source() {
            UiSource::DevServer(url) => {
                let parsed: tauri::Url = url.parse()?;
                tauri::WebviewUrl::External(parsed)
            }
            UiSource::Bundled(index) => tauri::WebviewUrl::App(index.into()),
        };

        let window = tauri::WebviewWindowBuilder::new(manager, &self.label, url)
            .title(&self.window.title)
            .inner_size(self.window.width, self.window.height)
            .build()?;

        if self.mode == RunMode::Development {
            window.open_devtools();
        }

        tracing::info!(label = %self.label, mode = ?self.mode, "created main window");
        Ok(window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macos_stays_resident() {
        let session = Session::for_platform(WindowConfig::default(), RunMode::Development, "macos");
        assert_eq!(session.on_all_windows_closed(), CloseAction::StayResident);
    }

    #[test]
    fn test_other_platforms_exit() {
        for os in ["linux", "windows"] {
            let session = Session::for_platform(WindowConfig::default(), RunMode::Production, os);
            assert_eq!(session.on_all_windows_closed(), CloseAction::Exit);
        }
    }

    #[test]
    fn test_reopen_only_recreates_when_empty() {
        let session = Session::new(WindowConfig::default(), RunMode::Development);
        assert_eq!(session.on_reopen(0), ReopenAction::RecreateWindow);
        assert_eq!(session.on_reopen(1), ReopenAction::Nothing);
    }

    #[test]
    fn test_ui_source_follows_mode() {
        let dev = Session::new(WindowConfig::default(), RunMode::Development);
        assert_eq!(
            dev.ui_source(),
            UiSource::DevServer("http://localhost:5173".into())
        );

        let prod = Session::new(WindowConfig::default(), RunMode::Production);
        assert_eq!(prod.ui_source(), UiSource::Bundled("index.html".into()));
        assert_eq!(prod.label(), MAIN_WINDOW_LABEL);
    }
}
