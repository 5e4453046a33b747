//! Tauri commands for converting and viewing presentations.

use serde::{Deserialize, Serialize};
use slides_convert::{ConversionRequest, Pipeline};
use slides_core::{ImagesOutcome, PipelineOutcome, SessionStore, Viewer, ViewerSnapshot};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};
use tauri::{AppHandle, State};
use tauri_plugin_dialog::DialogExt;

/// Host-side state shared by all commands.
pub struct AppState {
    pub pipeline: Pipeline,
    pub session: SessionStore,
    pub viewer: Mutex<Viewer>,
}

impl AppState {
    fn viewer(&self) -> Result<MutexGuard<'_, Viewer>, String> {
        lock_viewer(&self.viewer)
    }
}

/// Result of the file picker.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSelection {
    pub canceled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
}

/// Result of the directory picker.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectorySelection {
    pub canceled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory_path: Option<String>,
}

fn lock_viewer(viewer: &Mutex<Viewer>) -> Result<MutexGuard<'_, Viewer>, String> {
    viewer
        .lock()
        .map_err(|_| "Viewer state is unavailable".to_string())
}

/// Mark `source` as converting and forget the saved session.
fn start_conversion(session: &SessionStore, viewer: &Mutex<Viewer>, source: &str) -> Result<(), String> {
    lock_viewer(viewer)?.begin(source).map_err(|e| e.to_string())?;
    if let Err(e) = session.clear() {
        log::warn!("Failed to clear saved session: {}", e);
    }
    Ok(())
}

/// Apply a finished conversion, saving the slides when there are any.
fn finish_conversion(
    session: &SessionStore,
    viewer: &Mutex<Viewer>,
    outcome: &PipelineOutcome,
) -> Result<ViewerSnapshot, String> {
    let mut viewer = lock_viewer(viewer)?;
    if let Some(slides) = viewer.finish(outcome).map_err(|e| e.to_string())? {
        if let Err(e) = session.save(slides) {
            log::warn!("Failed to save session: {}", e);
        }
    }
    Ok(viewer.snapshot())
}

fn optional_dir(dir: Option<String>) -> Option<PathBuf> {
    dir.filter(|d| !d.trim().is_empty()).map(PathBuf::from)
}

fn request_for(pptx_path: String, output_dir: Option<String>) -> ConversionRequest {
    let request = ConversionRequest::new(pptx_path);
    match optional_dir(output_dir) {
        Some(dir) => request.with_output_dir(dir),
        None => request,
    }
}

/// Run the pipeline off the event loop.
async fn run_pipeline(pipeline: Pipeline, request: ConversionRequest) -> Result<PipelineOutcome, String> {
    tauri::async_runtime::spawn_blocking(move || pipeline.run(&request))
        .await
        .map_err(|e| format!("Conversion task failed: {}", e))
}

/// Convert a PPTX file to PDF, then render its slides.
#[tauri::command]
pub async fn convert_pptx_to_pdf(
    state: State<'_, AppState>,
    pptx_path: String,
    output_dir: Option<String>,
) -> Result<PipelineOutcome, String> {
    let request = request_for(pptx_path, output_dir);
    run_pipeline(state.pipeline.clone(), request).await
}

/// Render the pages of an existing PDF.
#[tauri::command]
pub async fn convert_pdf_to_images(
    state: State<'_, AppState>,
    pdf_path: String,
    output_dir: Option<String>,
    density: Option<u32>,
    quality: Option<u32>,
) -> Result<ImagesOutcome, String> {
    let pipeline = state.pipeline.clone();
    let output_dir = optional_dir(output_dir);
    tauri::async_runtime::spawn_blocking(move || {
        pipeline.pdf_to_images(
            &PathBuf::from(pdf_path),
            output_dir.as_deref(),
            density,
            quality,
        )
    })
    .await
    .map_err(|e| format!("Conversion task failed: {}", e))
}

/// Ask the user for a presentation.
#[tauri::command]
pub async fn select_pptx_file(app: AppHandle) -> Result<FileSelection, String> {
    let picked = app
        .dialog()
        .file()
        .add_filter("PowerPoint Presentations", &["pptx"])
        .blocking_pick_file();

    Ok(match picked {
        Some(path) => FileSelection {
            canceled: false,
            file_path: Some(path.into_path().map_err(|e| e.to_string())?.display().to_string()),
        },
        None => FileSelection {
            canceled: true,
            file_path: None,
        },
    })
}

/// Ask the user for an output directory.
#[tauri::command]
pub async fn select_output_directory(app: AppHandle) -> Result<DirectorySelection, String> {
    let picked = app.dialog().file().blocking_pick_folder();

    Ok(match picked {
        Some(path) => DirectorySelection {
            canceled: false,
            directory_path: Some(
                path.into_path()
                    .map_err(|e| e.to_string())?
                    .display()
                    .to_string(),
            ),
        },
        None => DirectorySelection {
            canceled: true,
            directory_path: None,
        },
    })
}

/// Convert a presentation and show it, replacing whatever was shown before.
///
/// Refused while another conversion is running.
#[tauri::command]
pub async fn open_presentation(
    state: State<'_, AppState>,
    pptx_path: String,
    output_dir: Option<String>,
) -> Result<ViewerSnapshot, String> {
    start_conversion(&state.session, &state.viewer, &pptx_path)?;

    let request = request_for(pptx_path, output_dir);
    let outcome = match run_pipeline(state.pipeline.clone(), request).await {
        Ok(outcome) => outcome,
        Err(error) => PipelineOutcome::Failed { error },
    };

    finish_conversion(&state.session, &state.viewer, &outcome)
}

/// Show the slides saved by the previous session, if any.
#[tauri::command]
pub fn restore_session(state: State<'_, AppState>) -> Result<ViewerSnapshot, String> {
    let mut viewer = state.viewer()?;
    if let Some(slides) = state.session.load() {
        log::info!("Restoring {} saved slides", slides.len());
        viewer.restore(slides);
    }
    Ok(viewer.snapshot())
}

/// Current viewer state.
#[tauri::command]
pub fn viewer_state(state: State<'_, AppState>) -> Result<ViewerSnapshot, String> {
    Ok(state.viewer()?.snapshot())
}

/// Jump to a slide (1-based).
#[tauri::command]
pub fn go_to_slide(state: State<'_, AppState>, number: u32) -> Result<ViewerSnapshot, String> {
    let mut viewer = state.viewer()?;
    viewer.go_to(number);
    Ok(viewer.snapshot())
}

/// Return to the file picker.
#[tauri::command]
pub fn close_presentation(state: State<'_, AppState>) -> Result<ViewerSnapshot, String> {
    let mut viewer = state.viewer()?;
    if viewer.is_loading() {
        return Err(slides_core::Error::Busy.to_string());
    }
    viewer.reset();
    Ok(viewer.snapshot())
}
