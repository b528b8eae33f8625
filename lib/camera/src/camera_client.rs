use crate::{CameraConfig, CameraError, CameraResult, FrameSource};
use image::RgbImage;
use nokhwa::{
    CallbackCamera,
    pixel_format::RgbFormat,
    utils::{CameraIndex, RequestedFormat, RequestedFormatType, Resolution},
};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// A nokhwa device delivering RGB frames.
///
/// The stream is pull based: the callback is a no-op and [`CameraClient::last_frame`]
/// decodes whatever buffer the device thread produced most recently.
pub struct CameraClient {
    camera: Option<CallbackCamera>,
    index: CameraIndex,
    streaming: Arc<AtomicBool>,
}

impl CameraClient {
    pub fn new(index: CameraIndex, config: CameraConfig) -> CameraResult<Self> {
        let format = RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestFrameRate);

        let mut camera = CallbackCamera::new(index.clone(), format, |_| {})
            .map_err(|e| CameraError::InitializationError(e.to_string()))?;

        apply_config(&mut camera, &config);

        Ok(Self {
            camera: Some(camera),
            index,
            streaming: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn start(&mut self) -> CameraResult<()> {
        self.device()?
            .open_stream()
            .map_err(|e| CameraError::StartError(e.to_string()))?;

        self.streaming.store(true, Ordering::Relaxed);
        Ok(())
    }

    pub fn stop(&mut self) -> CameraResult<()> {
        self.camera
            .as_mut()
            .ok_or_else(|| CameraError::StopError("camera is closed".to_string()))?
            .stop_stream()
            .map_err(|e| CameraError::StopError(e.to_string()))?;

        self.streaming.store(false, Ordering::Relaxed);
        Ok(())
    }

    pub fn last_frame(&self) -> CameraResult<RgbImage> {
        let camera = self
            .camera
            .as_ref()
            .ok_or_else(|| CameraError::InitializationError(format!("camera {} is closed", self.index)))?;

        Ok(camera.last_frame()?.decode_image::<RgbFormat>()?)
    }

    pub fn is_running(&self) -> bool {
        self.streaming.load(Ordering::Relaxed)
    }

    fn device(&mut self) -> CameraResult<&mut CallbackCamera> {
        let index = &self.index;
        self.camera
            .as_mut()
            .ok_or_else(|| CameraError::InitializationError(format!("camera {index} is closed")))
    }
}

fn apply_config(camera: &mut CallbackCamera, config: &CameraConfig) {
    if let Some(fps) = config.fps
        && let Err(e) = camera.set_frame_rate(fps)
    {
        log::warn!("camera set frame rate ({fps}) failed: {e}");
    }

    if let (Some(w), Some(h)) = (config.width, config.height)
        && let Err(e) = camera.set_resolution(Resolution::new(w, h))
    {
        log::warn!("camera set resolution ({w} x {h}) failed: {e}");
    }
}

impl FrameSource for CameraClient {
    fn read_frame(&mut self) -> CameraResult<RgbImage> {
        let frame = self.last_frame()?;
        if frame.is_empty() {
            return Err(CameraError::NoFrameAvailable);
        }

        Ok(frame)
    }

    fn release(&mut self) -> CameraResult<()> {
        if self.is_running() {
            self.stop()?;
        }

        self.camera = None;
        log::info!("camera {} released", self.index);
        Ok(())
    }

    fn name(&self) -> String {
        format!("camera {}", self.index)
    }
}

impl Drop for CameraClient {
    fn drop(&mut self) {
        if self.is_running() {
            _ = self.stop();
        }
    }
}
