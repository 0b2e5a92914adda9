use std::io::Cursor;
use std::path::Path;

use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};

use crate::error::AppError;
use crate::models::digitalization::CropSelection;

const IMAGE_MIME_TYPES: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("webp", "image/webp"),
];

/// Per-axis bound on the rasterized output. A crop drawn on a real
/// display stays far below this; anything past it is a bogus rectangle.
const MAX_CROP_DIM: u32 = 8192;

/// MIME type for a supported image file, or `None` when the extension is
/// not one the decoder handles.
pub fn supported_image_mime(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    IMAGE_MIME_TYPES
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, mime)| *mime)
}

/// Rasterizes the selected region of `img` into a standalone JPEG buffer.
///
/// The crop rectangle lives in displayed-image coordinates; the ratio
/// between the natural size and the recorded display size maps it onto
/// source pixels. The output buffer is sized to the displayed rectangle
/// (whole pixels, at most `MAX_CROP_DIM` per axis), so an image shown
/// scaled down yields a correspondingly smaller buffer. The source region
/// is clamped to the image bounds, which keeps a selection made before
/// the image changed from reading outside it.
pub fn rasterize_crop(img: &DynamicImage, selection: &CropSelection) -> Result<Vec<u8>, AppError> {
    let display = selection.display;
    if display.width <= 0.0 || display.height <= 0.0 {
        return Err(AppError::Rasterize(
            "image was displayed at zero size".to_string(),
        ));
    }

    let out_width = selection.rect.width.trunc() as u32;
    let out_height = selection.rect.height.trunc() as u32;
    if out_width == 0 || out_height == 0 {
        return Err(AppError::Rasterize("crop region is empty".to_string()));
    }
    if out_width > MAX_CROP_DIM || out_height > MAX_CROP_DIM {
        return Err(AppError::Rasterize("crop region is too large".to_string()));
    }

    let scale_x = f64::from(img.width()) / display.width;
    let scale_y = f64::from(img.height()) / display.height;

    let src_x = (selection.rect.x * scale_x).max(0.0);
    let src_y = (selection.rect.y * scale_y).max(0.0);
    let src_w = (selection.rect.width * scale_x).min(f64::from(img.width()) - src_x);
    let src_h = (selection.rect.height * scale_y).min(f64::from(img.height()) - src_y);
    if src_w < 1.0 || src_h < 1.0 {
        return Err(AppError::Rasterize(
            "crop region lies outside the image".to_string(),
        ));
    }

    let region = img.crop_imm(src_x as u32, src_y as u32, src_w as u32, src_h as u32);
    let scaled = region.resize_exact(out_width, out_height, FilterType::Triangle);

    // JPEG has no alpha channel; flatten before encoding.
    let rgb = DynamicImage::ImageRgb8(scaled.to_rgb8());
    let mut buffer = Vec::new();
    rgb.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Jpeg)
        .map_err(|err| AppError::Rasterize(format!("could not encode the crop: {err}")))?;
    Ok(buffer)
}
