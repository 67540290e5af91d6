pub mod bridge;
#[cfg(feature = "desktop")]
pub mod commands;
pub mod config;
pub mod controller;
pub mod orchestrator;

/// Return the platform-standard data directory for Cerebro.
///
/// - macOS: `~/Library/Application Support/com.cerebro.app/`
/// - Windows: `{FOLDERID_RoamingAppData}\com.cerebro.app\`
/// - Linux: `$XDG_DATA_HOME/com.cerebro.app/` (fallback `~/.local/share/...`)
///
/// Falls back to `~/.cerebro/` only if none of the above can be resolved.
pub fn data_dir() -> std::path::PathBuf {
    if let Some(dir) = dirs::data_dir() {
        return dir.join("com.cerebro.app");
    }
    dirs::home_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join(".cerebro")
}

/// Initialize the tracing subscriber, writing to `cerebro.log` in the data dir.
///
/// Rotates the previous logs first (keeps the last 3). If the log file
/// cannot be opened, logs go to stderr instead.
pub fn init_tracing() {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = data_dir();
    let _ = std::fs::create_dir_all(&log_dir);
    let log_path = log_dir.join("cerebro.log");

    rotate_log_file(&log_path, 3);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("cerebro=info,warn"));

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path);

    match log_file {
        Ok(file) => fmt::fmt()
            .with_env_filter(filter)
            .with_writer(FlushingWriter::new(file))
            .with_ansi(false)
            .with_target(true)
            .init(),
        Err(e) => {
            fmt::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
            tracing::warn!(path = %log_path.display(), error = %e, "cannot open log file, logging to stderr");
        }
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        data_dir = %log_dir.display(),
        log_file = %log_path.display(),
        pid = std::process::id(),
        "=== Cerebro starting ==="
    );
}

/// Rotate log files: `cerebro.log` → `cerebro.log.1` → … → `.{keep}`.
///
/// Oldest file beyond `keep` is deleted. Missing files in the chain are skipped.
fn rotate_log_file(base_path: &std::path::Path, keep: u32) {
    let oldest = format!("{}.{keep}", base_path.display());
    let _ = std::fs::remove_file(&oldest);

    for i in (1..keep).rev() {
        let from = format!("{}.{i}", base_path.display());
        let to = format!("{}.{}", base_path.display(), i + 1);
        let _ = std::fs::rename(&from, &to);
    }

    if base_path.exists() {
        let to = format!("{}.1", base_path.display());
        let _ = std::fs::rename(base_path, &to);
    }
}

/// A writer that wraps `std::fs::File` and flushes after every write, so a
/// crash never loses buffered log lines.
#[derive(Clone)]
struct FlushingWriter {
    file: std::sync::Arc<std::sync::Mutex<std::fs::File>>,
}

impl FlushingWriter {
    fn new(file: std::fs::File) -> Self {
        Self {
            file: std::sync::Arc::new(std::sync::Mutex::new(file)),
        }
    }
}

impl std::io::Write for FlushingWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let mut f = self
            .file
            .lock()
            .map_err(|e| std::io::Error::other(format!("lock poisoned: {e}")))?;
        let n = std::io::Write::write(&mut *f, buf)?;
        std::io::Write::flush(&mut *f)?;
        Ok(n)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        let mut f = self
            .file
            .lock()
            .map_err(|e| std::io::Error::other(format!("lock poisoned: {e}")))?;
        std::io::Write::flush(&mut *f)
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for FlushingWriter {
    type Writer = FlushingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run the Tauri application.
///
/// Owns the lifecycle of the single [`controller::Session`]: the window is
/// built in setup, recreated on reactivation when none is open, and the
/// process exits or stays resident when the last window closes according
/// to the session's platform policy.
///
/// The controller answers bridge calls on its own task. The orchestrator
/// talks to it through a [`bridge::ChannelBridge`] and every state change
/// is pushed to the webview as a [`orchestrator::View`].
#[cfg(feature = "desktop")]
pub fn run() {
    use std::sync::Arc;

    use controller::{CloseAction, Controller, EmbeddingClient, Session};
    use tauri::{Emitter, Manager};

    init_tracing();

    let cwd = std::env::current_dir().unwrap_or_default();
    let shell_config = config::resolve_config(&cwd);
    let session = Session::new(shell_config.window.clone(), shell_config.run_mode());

    let setup_session = session.clone();
    let app = tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .setup(move |app| {
            let embeddings = EmbeddingClient::from_config(&shell_config.service)?;
            setup_session.attach(app.handle())?;

            let picker = controller::picker::DialogPicker::new(
                app.handle().clone(),
                setup_session.label(),
            );
            let controller = Controller::new(setup_session.clone(), Box::new(picker), embeddings);

            let (calls, incoming) =
                tokio::sync::mpsc::channel(bridge::channel::DEFAULT_CHANNEL_CAPACITY);
            tauri::async_runtime::spawn(bridge::serve(Arc::new(controller), incoming));

            let shell: Arc<commands::ShellOrchestrator> = Arc::new(
                orchestrator::Orchestrator::new(bridge::ChannelBridge::new(calls)),
            );
            let handle = app.handle().clone();
            tauri::async_runtime::spawn(orchestrator::forward_views(
                shell.subscribe(),
                move |view| {
                    if let Err(e) = handle.emit(orchestrator::VIEW_EVENT, view) {
                        tracing::warn!(error = %e, "failed to publish view");
                    }
                },
            ));
            app.manage(shell);

            tracing::info!(
                endpoint = %shell_config.service.endpoint,
                mode = ?setup_session.mode(),
                "controller ready"
            );
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::choose_folder,
            commands::summarize_now,
        ])
        .build(tauri::generate_context!())
        .expect("error while building tauri application");

    app.run(move |_app_handle, event| match event {
        // `code: None` means the last window closed rather than an explicit exit.
        tauri::RunEvent::ExitRequested { code: None, api, .. } => {
            if session.on_all_windows_closed() == CloseAction::StayResident {
                tracing::info!("all windows closed, staying resident");
                api.prevent_exit();
            }
        }
        #[cfg(target_os = "macos")]
        tauri::RunEvent::Reopen { .. } => {
            let open = _app_handle.webview_windows().len();
            if session.on_reopen(open) == controller::ReopenAction::RecreateWindow {
                if let Err(e) = session.attach(_app_handle) {
                    tracing::error!(error = %e, "failed to recreate main window");
                }
            }
        }
        _ => {}
    });
}
