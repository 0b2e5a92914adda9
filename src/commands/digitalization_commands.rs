use std::path::PathBuf;
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::{debug, error};
use tauri::{command, State};

use crate::error::AppError;
use crate::models::digitalization::{
    CropRect, CropSelection, DigitalizationView, DisplaySize, LoadedImage,
};
use crate::services::{crop_service, grade_parser};
use crate::state::{AppState, StoredImage};

/// Reads and decodes an image file, keeps the pixels on the panel, and
/// returns a data URL for the webview preview. A previously committed
/// crop or earlier results stay in place until the next OCR run.
#[command]
pub fn load_image(path: String, state: State<'_, AppState>) -> Result<LoadedImage, AppError> {
    let path = PathBuf::from(path);
    let mime = crop_service::supported_image_mime(&path).ok_or_else(|| {
        AppError::General(format!("unsupported image type: {}", path.display()))
    })?;

    let bytes = std::fs::read(&path)?;
    let pixels = image::load_from_memory(&bytes)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "image".to_string());

    let loaded = LoadedImage {
        name: name.clone(),
        natural_width: pixels.width(),
        natural_height: pixels.height(),
        data_url: format!("data:{};base64,{}", mime, STANDARD.encode(&bytes)),
    };

    let mut panel = state.digitalization();
    panel.image = Some(StoredImage { name, pixels });
    panel.push_trace("Image loaded successfully");
    Ok(loaded)
}

#[command]
pub fn zoom_in(state: State<'_, AppState>) -> Result<f64, AppError> {
    Ok(state.digitalization().zoom_in())
}

#[command]
pub fn zoom_out(state: State<'_, AppState>) -> Result<f64, AppError> {
    Ok(state.digitalization().zoom_out())
}

/// Commits the crop rectangle together with the display size it was
/// drawn at. Zoom is deliberately absent here: it scales the rendered
/// image, not the coordinate space the crop tool reports.
#[command]
pub fn set_crop(
    rect: CropRect,
    display: DisplaySize,
    state: State<'_, AppState>,
) -> Result<DigitalizationView, AppError> {
    let mut panel = state.digitalization();
    panel.crop = Some(CropSelection { rect, display });
    Ok(panel.view())
}

#[command]
pub fn get_digitalization(state: State<'_, AppState>) -> Result<DigitalizationView, AppError> {
    Ok(state.digitalization().view())
}

#[command]
pub async fn digitalize(state: State<'_, AppState>) -> Result<DigitalizationView, AppError> {
    run_digitalization(state.inner()).await
}

/// One full digitalization cycle: rasterize the committed crop, hand the
/// buffer to the OCR worker, parse the text into grade records.
///
/// Every failure except re-entrancy is recovered at the panel level: the
/// cause lands in the debug trace and the previous results stay visible,
/// so the caller always gets a snapshot back rather than an error.
pub async fn run_digitalization(state: &AppState) -> Result<DigitalizationView, AppError> {
    let jpeg = {
        let mut panel = state.digitalization();
        if panel.processing {
            return Err(AppError::Busy);
        }

        let rasterized = match (&panel.image, panel.crop) {
            (None, _) => {
                debug!("Digitalization skipped: no image loaded");
                panel.push_trace("No image loaded");
                return Ok(panel.view());
            }
            (Some(_), None) => {
                debug!("Digitalization skipped: no crop region selected");
                panel.push_trace(AppError::NoCropSelected.to_string());
                return Ok(panel.view());
            }
            (Some(stored), Some(selection)) => {
                crop_service::rasterize_crop(&stored.pixels, &selection)
            }
        };
        match rasterized {
            Ok(jpeg) => {
                panel.processing = true;
                panel.push_trace("Starting OCR run...");
                jpeg
            }
            Err(err) => {
                error!("Crop rasterization failed: {err}");
                panel.push_trace(format!("Error: {err}"));
                return Ok(panel.view());
            }
        }
    };

    // The panel lock is released while the worker runs; only the
    // `processing` flag keeps a second cycle out.
    let ocr = Arc::clone(&state.ocr);
    let result = tokio::task::spawn_blocking(move || ocr.recognize(jpeg)).await;

    let mut panel = state.digitalization();
    panel.processing = false;
    match result {
        Ok(Ok(text)) => {
            panel.push_trace("OCR finished");
            // The raw text is not kept; the records are the result.
            panel.records = grade_parser::parse_grade_table(&text);
            panel.push_trace("OCR and post-processing finished");
        }
        Ok(Err(err)) => {
            error!("OCR run failed: {err}");
            panel.push_trace(format!("Error: {err}"));
        }
        Err(err) => {
            error!("OCR task did not complete: {err}");
            panel.push_trace(format!("Error: {err}"));
        }
    }
    Ok(panel.view())
}
