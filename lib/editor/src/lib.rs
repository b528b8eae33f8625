//! Editing state for one image at a time.
//!
//! [`Controller`] owns the current frame, the channel mask and the active
//! [`EditSession`]. Every user command maps to one controller method; failures
//! come back as [`EditorError`] and leave the controller in a usable state.

pub mod controller;
pub mod image_io;
pub mod input;
pub mod session;

pub use controller::{Controller, EditorConfig, SourceOpener};
pub use image_effect::{Channel, ChannelSelection, DisplaySurface, Frame};
pub use session::{BrightnessForm, CropForm, EditRequest, EditSession, LineForm};

use camera::CameraError;
use image_effect::ImageEffectError;
use std::path::PathBuf;

pub type EditorResult<T> = Result<T, EditorError>;

#[derive(thiserror::Error, Debug)]
pub enum EditorError {
    #[error("No image loaded")]
    NoImageLoaded,

    #[error("{0}")]
    InvalidRegion(ImageEffectError),

    #[error("Invalid value for {field}: `{value}`")]
    InvalidNumericInput { field: &'static str, value: String },

    #[error("Can not open `{}`: {reason}", .path.display())]
    DecodeError { path: PathBuf, reason: String },

    #[error("Can not save `{}`: {reason}", .path.display())]
    WriteError { path: PathBuf, reason: String },

    #[error("{0}")]
    DeviceUnavailable(CameraError),

    #[error("{0} is in progress")]
    SessionInProgress(EditSession),

    #[error("Expected {expected} session, but current session is {actual}")]
    UnexpectedSession {
        expected: EditSession,
        actual: EditSession,
    },
}

impl EditorError {
    /// Title of the prompt that reports this error.
    pub fn title(&self) -> &'static str {
        match self {
            EditorError::NoImageLoaded => "Choose an image first",
            EditorError::InvalidRegion(_) => "Invalid coordinates",
            EditorError::InvalidNumericInput { .. } => "Invalid value",
            EditorError::DecodeError { .. } => "Can not open file",
            EditorError::WriteError { .. } => "Can not save file",
            EditorError::DeviceUnavailable(_) => "Camera not found",
            EditorError::SessionInProgress(_) | EditorError::UnexpectedSession { .. } => {
                "Finish the current operation first"
            }
        }
    }
}

impl From<ImageEffectError> for EditorError {
    fn from(e: ImageEffectError) -> Self {
        match e {
            ImageEffectError::InvalidParameter { name, value } => {
                EditorError::InvalidNumericInput { field: name, value }
            }
            e => EditorError::InvalidRegion(e),
        }
    }
}

impl From<CameraError> for EditorError {
    fn from(e: CameraError) -> Self {
        EditorError::DeviceUnavailable(e)
    }
}
