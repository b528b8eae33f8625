use crate::{
    BrightnessForm, CropForm, EditRequest, EditSession, EditorError, EditorResult, LineForm,
    image_io,
};
use camera::{CameraConfig, CameraResult, CaptureLoop, DEFAULT_CAPTURE_INTERVAL, FrameSource};
use derivative::Derivative;
use derive_setters::Setters;
use image_effect::{Channel, ChannelSelection, DisplaySurface, Effect, Frame, render};
use std::{
    path::Path,
    sync::{Arc, atomic::AtomicBool},
    time::Duration,
};

/// Opens the capture device with the given index.
pub type SourceOpener = Box<dyn FnMut(u32) -> CameraResult<Box<dyn FrameSource>>>;

#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct EditorConfig {
    #[derivative(Default(value = "0"))]
    pub device_index: u32,

    #[derivative(Default(value = "DEFAULT_CAPTURE_INTERVAL"))]
    pub capture_interval: Duration,

    #[derivative(Default(value = "10"))]
    pub brightness: i32,

    #[derivative(Default(value = "3"))]
    pub thickness: i32,

    pub camera: CameraConfig,
}

pub struct Controller {
    config: EditorConfig,
    opener: SourceOpener,
    frame: Option<Frame>,
    channels: ChannelSelection,
    session: EditSession,
    capture: Option<CaptureLoop>,
}

impl Controller {
    /// A controller that opens real cameras.
    pub fn new(config: EditorConfig) -> Self {
        let camera_config = config.camera.clone();
        let opener = Box::new(move |index| camera::open_device(index, camera_config.clone()));
        Self::with_opener(config, opener)
    }

    pub fn with_opener(config: EditorConfig, opener: SourceOpener) -> Self {
        Self {
            config,
            opener,
            frame: None,
            channels: ChannelSelection::default(),
            session: EditSession::Idle,
            capture: None,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }

    pub fn session(&self) -> EditSession {
        self.session
    }

    /// The main command set is only usable while no session is open.
    pub fn controls_enabled(&self) -> bool {
        self.session == EditSession::Idle
    }

    pub fn is_capturing(&self) -> bool {
        self.capture.as_ref().is_some_and(|c| c.is_capturing())
    }

    /// Flag of the running capture; it turns `false` once the capture ends.
    pub fn capture_token(&self) -> Option<Arc<AtomicBool>> {
        self.capture.as_ref().map(|c| c.cancel_token())
    }

    pub fn channels(&self) -> ChannelSelection {
        self.channels
    }

    pub fn set_channels(&mut self, channels: ChannelSelection) {
        self.channels = channels;
    }

    pub fn set_channel(&mut self, channel: Channel, visible: bool) {
        self.channels.set(channel, visible);
    }

    pub fn render(&self) -> Option<DisplaySurface> {
        self.frame.as_ref().map(|frame| render(frame, &self.channels))
    }

    /// Replaces the current frame with an already decoded image.
    pub fn open_frame(&mut self, frame: Frame) -> EditorResult<()> {
        self.ensure_idle()?;
        self.frame = Some(frame);
        Ok(())
    }

    pub fn load_image(&mut self, path: impl AsRef<Path>) -> EditorResult<()> {
        self.ensure_idle()?;
        let frame = image_io::load_image(path)?;
        self.open_frame(frame)
    }

    pub fn save_image(&self, path: impl AsRef<Path>) -> EditorResult<()> {
        self.ensure_idle()?;
        let frame = self.frame.as_ref().ok_or(EditorError::NoImageLoaded)?;
        image_io::save_image(path, frame)
    }

    pub fn start_capture(&mut self) -> EditorResult<()> {
        self.ensure_idle()?;

        let index = self.config.device_index;
        let source = (self.opener)(index).map_err(EditorError::DeviceUnavailable)?;

        self.frame = None;
        self.capture = Some(CaptureLoop::start(source, self.config.capture_interval));
        self.session = EditSession::Capturing;
        Ok(())
    }

    /// Runs one capture tick. Returns `true` when a new frame was published.
    pub fn capture_tick(&mut self) -> bool {
        let Some(capture) = self.capture.as_mut() else {
            return false;
        };

        match capture.tick() {
            Some(frame) => {
                self.frame = Some(frame);
                true
            }
            None => false,
        }
    }

    /// Cancels a live capture: the camera is released and the preview cleared.
    /// Returns `false` when nothing was capturing.
    pub fn stop_capture(&mut self) -> bool {
        let Some(mut capture) = self.capture.take() else {
            return false;
        };

        capture.stop();
        self.frame = None;
        self.session = EditSession::Idle;
        true
    }

    /// Freezes the live preview as the current image.
    /// Returns `false` when nothing was capturing.
    pub fn snapshot(&mut self) -> bool {
        let Some(mut capture) = self.capture.take() else {
            return false;
        };

        if let Some(frame) = capture.snapshot_and_stop() {
            self.frame = Some(frame);
        }

        self.session = EditSession::Idle;
        true
    }

    pub fn begin_crop(&mut self) -> EditorResult<CropForm> {
        let frame = self.begin(EditSession::Cropping)?;
        Ok(CropForm::for_frame(frame))
    }

    pub fn begin_brighten(&mut self) -> EditorResult<BrightnessForm> {
        self.begin(EditSession::Brightening)?;
        Ok(BrightnessForm::new(self.config.brightness))
    }

    pub fn begin_line(&mut self) -> EditorResult<LineForm> {
        let thickness = self.config.thickness;
        let frame = self.begin(EditSession::LineDrawing)?;
        Ok(LineForm::for_frame(frame, thickness))
    }

    /// Completes the open edit session.
    ///
    /// Malformed form input is reported with the session still open. Once the
    /// input parses, the session ends whether or not the edit succeeds, and
    /// the frame is only replaced on success.
    pub fn apply(&mut self, request: &EditRequest) -> EditorResult<()> {
        let expected = request.session();
        if self.session != expected {
            return Err(EditorError::UnexpectedSession {
                expected,
                actual: self.session,
            });
        }

        let effect = request.parse()?;
        self.session = EditSession::Idle;

        let frame = self.frame.as_ref().ok_or(EditorError::NoImageLoaded)?;
        let output = effect.apply(frame)?;

        log::info!(
            "{} applied: {}x{} -> {}x{}",
            effect.name(),
            frame.width(),
            frame.height(),
            output.width(),
            output.height()
        );

        self.frame = Some(output);
        Ok(())
    }

    /// Leaves the current session without touching the frame, except for a
    /// live capture, which is stopped as by [`Controller::stop_capture`].
    pub fn cancel(&mut self) {
        match self.session {
            EditSession::Idle => (),
            EditSession::Capturing => {
                self.stop_capture();
            }
            _ => self.session = EditSession::Idle,
        }
    }

    /// Releases the camera if a capture is still running.
    pub fn shutdown(&mut self) {
        if self.stop_capture() {
            log::info!("capture stopped on shutdown");
        }
    }

    fn ensure_idle(&self) -> EditorResult<()> {
        match self.session {
            EditSession::Idle => Ok(()),
            session => Err(EditorError::SessionInProgress(session)),
        }
    }

    fn begin(&mut self, session: EditSession) -> EditorResult<&Frame> {
        self.ensure_idle()?;

        match self.frame {
            Some(ref frame) => {
                self.session = session;
                Ok(frame)
            }
            None => Err(EditorError::NoImageLoaded),
        }
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camera::CameraError;
    use image::Rgb;

    fn no_camera(index: u32) -> CameraResult<Box<dyn FrameSource>> {
        Err(CameraError::DeviceUnavailable {
            index,
            reason: "no camera in tests".to_string(),
        })
    }

    fn idle_controller() -> Controller {
        Controller::with_opener(EditorConfig::default(), Box::new(no_camera))
    }

    #[test]
    fn test_editing_requires_image() {
        let mut controller = idle_controller();

        assert!(matches!(controller.begin_crop(), Err(EditorError::NoImageLoaded)));
        assert!(matches!(controller.begin_brighten(), Err(EditorError::NoImageLoaded)));
        assert!(matches!(controller.begin_line(), Err(EditorError::NoImageLoaded)));
        assert!(matches!(
            controller.save_image("unused.png"),
            Err(EditorError::NoImageLoaded)
        ));
        assert_eq!(controller.session(), EditSession::Idle);
        assert!(controller.controls_enabled());
    }

    #[test]
    fn test_unavailable_camera_stays_idle() {
        let mut controller = idle_controller();
        controller.open_frame(Frame::new(4, 4)).unwrap();

        assert!(matches!(
            controller.start_capture(),
            Err(EditorError::DeviceUnavailable(_))
        ));
        assert_eq!(controller.session(), EditSession::Idle);
        assert!(controller.frame().is_some());
        assert!(!controller.is_capturing());
    }

    #[test]
    fn test_only_one_session_at_a_time() {
        let mut controller = idle_controller();
        controller.open_frame(Frame::new(4, 4)).unwrap();
        controller.begin_crop().unwrap();

        assert!(!controller.controls_enabled());
        assert!(matches!(
            controller.begin_line(),
            Err(EditorError::SessionInProgress(EditSession::Cropping))
        ));
        assert!(matches!(
            controller.open_frame(Frame::new(1, 1)),
            Err(EditorError::SessionInProgress(_))
        ));
        assert!(matches!(
            controller.apply(&EditRequest::Brighten(BrightnessForm::new(5))),
            Err(EditorError::UnexpectedSession { .. })
        ));
        assert_eq!(controller.session(), EditSession::Cropping);
    }

    #[test]
    fn test_channel_toggle_ignores_session() {
        let mut controller = idle_controller();
        controller
            .open_frame(Frame::from_pixel(2, 2, Rgb([10, 20, 30])))
            .unwrap();
        controller.begin_brighten().unwrap();

        controller.set_channel(Channel::Red, false);
        assert_eq!(controller.session(), EditSession::Brightening);

        let surface = controller.render().unwrap();
        assert_eq!(surface.pixel(0, 0), Some([0, 20, 30]));
        assert_eq!(controller.frame().unwrap().get_pixel(0, 0), &Rgb([10, 20, 30]));
    }

    #[test]
    fn test_begin_forms_use_config_defaults() {
        let mut controller = Controller::with_opener(
            EditorConfig::default().with_brightness(25).with_thickness(7),
            Box::new(no_camera),
        );
        controller.open_frame(Frame::new(30, 20)).unwrap();

        assert_eq!(controller.begin_brighten().unwrap(), BrightnessForm::new(25));
        controller.cancel();
        assert_eq!(
            controller.begin_line().unwrap(),
            LineForm::new(0, 0, 30, 20, 7)
        );
    }
}
