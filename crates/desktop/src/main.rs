//! Desktop slide viewer for PowerPoint presentations using Tauri.

#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]

mod commands;

use commands::AppState;
use slides_convert::{ConverterConfig, Pipeline};
use slides_core::{SessionStore, Viewer};
use std::sync::Mutex;
use tauri::Manager;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let result = tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .invoke_handler(tauri::generate_handler![
            commands::convert_pptx_to_pdf,
            commands::convert_pdf_to_images,
            commands::select_pptx_file,
            commands::select_output_directory,
            commands::open_presentation,
            commands::restore_session,
            commands::viewer_state,
            commands::go_to_slide,
            commands::close_presentation,
        ])
        .setup(|app| {
            let work_dir = app.path().app_cache_dir()?.join("converted");
            let session_path = app.path().app_data_dir()?.join("session.json");
            log::info!("Converting into {}", work_dir.display());

            let mut config = ConverterConfig::new().with_work_dir(work_dir);
            if let Ok(program) = std::env::var("SLIDES_SOFFICE") {
                config = config.with_office_program(program);
            }
            if let Ok(program) = std::env::var("SLIDES_MAGICK") {
                config = config.with_raster_program(program);
            }

            app.manage(AppState {
                pipeline: Pipeline::new(config),
                session: SessionStore::new(session_path),
                viewer: Mutex::new(Viewer::new()),
            });

            #[cfg(debug_assertions)]
            if let Some(window) = app.get_webview_window("main") {
                window.open_devtools();
            }
            Ok(())
        })
        .run(tauri::generate_context!());

    if let Err(e) = result {
        log::error!("Error while running the slide viewer: {}", e);
        std::process::exit(1);
    }
}
