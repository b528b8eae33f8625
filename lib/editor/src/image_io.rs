use crate::{EditorError, EditorResult};
use image::ImageReader;
use image_effect::Frame;
use std::path::Path;

pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

pub fn is_supported(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| supported.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

/// Decodes an image file into an RGB frame, whatever its stored layout.
pub fn load_image(path: impl AsRef<Path>) -> EditorResult<Frame> {
    let path = path.as_ref();
    let decode_error = |reason: String| EditorError::DecodeError {
        path: path.to_path_buf(),
        reason,
    };

    let image = ImageReader::open(path)
        .map_err(|e| decode_error(e.to_string()))?
        .with_guessed_format()
        .map_err(|e| decode_error(e.to_string()))?
        .decode()
        .map_err(|e| decode_error(e.to_string()))?;

    log::info!(
        "load {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );

    Ok(image.to_rgb8())
}

/// Encodes `frame` with the format implied by the file extension.
pub fn save_image(path: impl AsRef<Path>, frame: &Frame) -> EditorResult<()> {
    let path = path.as_ref();

    frame.save(path).map_err(|e| EditorError::WriteError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    log::info!("save {}", path.display());
    Ok(())
}
