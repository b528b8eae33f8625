use editor::{EditorError, image_io::SUPPORTED_EXTENSIONS};
use native_dialog::{DialogBuilder, MessageLevel};
use std::path::{Path, PathBuf};

/// Reports a failed command in a modal error prompt.
pub fn show_error(err: &EditorError) {
    log::warn!("{}: {err}", err.title());

    let result = DialogBuilder::message()
        .set_level(MessageLevel::Error)
        .set_title(err.title())
        .set_text(err.to_string())
        .alert()
        .show();

    if let Err(e) = result {
        log::warn!("show error prompt failed: {e}");
    }
}

pub fn pick_image_file(location: Option<&Path>) -> Option<PathBuf> {
    let mut file_dialog = DialogBuilder::file()
        .set_title("Open image")
        .add_filter("Image", &SUPPORTED_EXTENSIONS[..]);

    if let Some(location) = location {
        file_dialog = file_dialog.set_location(location);
    }

    picked(file_dialog.open_single_file().show())
}

pub fn pick_save_file(location: Option<&Path>, filename: &str) -> Option<PathBuf> {
    let mut file_dialog = DialogBuilder::file()
        .set_title("Save image")
        .set_filename(filename)
        .add_filter("Image", &SUPPORTED_EXTENSIONS[..]);

    if let Some(location) = location {
        file_dialog = file_dialog.set_location(location);
    }

    picked(file_dialog.save_single_file().show())
}

fn picked(result: Result<Option<PathBuf>, native_dialog::Error>) -> Option<PathBuf> {
    match result {
        Ok(path) => path,
        Err(e) => {
            log::warn!("choose file failed: {e}");
            None
        }
    }
}
