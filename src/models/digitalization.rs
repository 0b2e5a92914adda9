use serde::{Deserialize, Serialize};

use crate::models::grade::GradeRecord;

/// A rectangle in displayed-image coordinates (CSS pixels), as drawn by
/// the crop tool in the webview.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// The size the image was displayed at when the crop was drawn. The
/// natural/displayed ratio is what maps crop coordinates onto pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplaySize {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropSelection {
    pub rect: CropRect,
    pub display: DisplaySize,
}

/// Metadata of the currently loaded image, without pixel data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageMeta {
    pub name: String,
    pub natural_width: u32,
    pub natural_height: u32,
}

/// Returned once by `load_image`: metadata plus a data URL the webview
/// can put straight into an `<img>` element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadedImage {
    pub name: String,
    pub natural_width: u32,
    pub natural_height: u32,
    pub data_url: String,
}

/// Everything the digitalization panel renders. The image pixel data
/// stays on the Rust side; only metadata travels here. Raw OCR text is
/// not part of the panel state: it is parsed into records and dropped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigitalizationView {
    pub image: Option<ImageMeta>,
    pub zoom: f64,
    pub crop: Option<CropSelection>,
    pub records: Vec<GradeRecord>,
    pub trace: Vec<String>,
    pub processing: bool,
}
