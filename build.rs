fn main() {
    // Only the two bridge commands are registered as app permissions; the
    // capability file grants exactly these to the main window.
    #[cfg(feature = "desktop")]
    tauri_build::try_build(
        tauri_build::Attributes::new().app_manifest(
            tauri_build::AppManifest::new().commands(&["choose_folder", "summarize_now"]),
        ),
    )
    .expect("failed to run tauri build script");
}
