pub mod capture_loop;
pub mod source;

#[cfg(feature = "native")]
pub mod camera_client;

#[cfg(feature = "native")]
pub mod camera_info;

pub use capture_loop::{CaptureLoop, DEFAULT_CAPTURE_INTERVAL};
pub use image::{Rgb, RgbImage};
pub use source::{CameraConfig, FrameSource, open_device};

#[cfg(feature = "native")]
pub use camera_client::CameraClient;

#[cfg(feature = "native")]
pub use camera_info::{CameraInfo, query_available_cameras};

pub type CameraResult<T> = Result<T, CameraError>;

#[derive(thiserror::Error, Debug)]
pub enum CameraError {
    #[error("Failed to initialize camera: {0}")]
    InitializationError(String),

    #[error("Failed to start camera: {0}")]
    StartError(String),

    #[error("Failed to stop camera: {0}")]
    StopError(String),

    #[error("Camera {index} is unavailable: {reason}")]
    DeviceUnavailable { index: u32, reason: String },

    #[error("No frame available")]
    NoFrameAvailable,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Image error: {0}")]
    ImageLibraryError(#[from] image::ImageError),

    #[cfg(feature = "native")]
    #[error("Camera error: {0}")]
    NokhwaError(#[from] nokhwa::NokhwaError),
}

pub fn init() {
    #[cfg(all(feature = "native", target_os = "macos"))]
    nokhwa::nokhwa_initialize(|granted| {
        log::info!("User said {} for nokhwa", granted);
    });
}
