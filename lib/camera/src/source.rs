use crate::{CameraError, CameraResult};
use derivative::Derivative;
use derive_setters::Setters;
use image::RgbImage;

/// An open capture device.
///
/// Frames come back in `R, G, B` order whatever the device delivers natively.
pub trait FrameSource {
    fn read_frame(&mut self) -> CameraResult<RgbImage>;

    /// Closes the device. Called once per capture session.
    fn release(&mut self) -> CameraResult<()>;

    fn name(&self) -> String {
        "camera".to_string()
    }
}

#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct CameraConfig {
    #[derivative(Default(value = "None"))]
    #[setters[strip_option]]
    pub fps: Option<u32>,

    #[derivative(Default(value = "None"))]
    #[setters[strip_option]]
    pub width: Option<u32>,

    #[derivative(Default(value = "None"))]
    #[setters[strip_option]]
    pub height: Option<u32>,
}

#[cfg(feature = "native")]
pub fn open_device(index: u32, config: CameraConfig) -> CameraResult<Box<dyn FrameSource>> {
    use crate::CameraClient;
    use nokhwa::utils::CameraIndex;

    crate::init();

    let unavailable = |e: CameraError| CameraError::DeviceUnavailable {
        index,
        reason: e.to_string(),
    };

    let opened = CameraClient::new(CameraIndex::Index(index), config).and_then(|mut client| {
        client.start()?;
        Ok(client)
    });

    let client = match opened {
        Ok(client) => client,
        Err(e) => {
            for info in crate::query_available_cameras() {
                log::info!("available camera {}: {} ({})", info.index, info.name, info.description);
            }
            return Err(unavailable(e));
        }
    };

    log::info!("camera {index} opened");
    Ok(Box::new(client))
}

#[cfg(not(feature = "native"))]
pub fn open_device(index: u32, _config: CameraConfig) -> CameraResult<Box<dyn FrameSource>> {
    Err(CameraError::DeviceUnavailable {
        index,
        reason: "built without native camera support".to_string(),
    })
}
