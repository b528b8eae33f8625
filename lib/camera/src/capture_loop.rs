//! Live preview polling.
//!
//! The loop does not own a timer. Whoever schedules it calls [`CaptureLoop::tick`]
//! once per period and checks [`CaptureLoop::is_capturing`] (or the flag from
//! [`CaptureLoop::cancel_token`]) before scheduling the next tick.

use crate::{CameraConfig, CameraResult, FrameSource, open_device};
use image::RgbImage;
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

pub const DEFAULT_CAPTURE_INTERVAL: Duration = Duration::from_millis(100);

pub struct CaptureLoop {
    source: Option<Box<dyn FrameSource>>,
    is_capturing: Arc<AtomicBool>,
    interval: Duration,
    total_ticks: u64,
    skipped_ticks: u64,
}

impl CaptureLoop {
    pub fn start(source: Box<dyn FrameSource>, interval: Duration) -> Self {
        log::info!(
            "start capturing from {} every {}ms",
            source.name(),
            interval.as_millis()
        );

        Self {
            source: Some(source),
            is_capturing: Arc::new(AtomicBool::new(true)),
            interval,
            total_ticks: 0,
            skipped_ticks: 0,
        }
    }

    pub fn open(index: u32, config: CameraConfig, interval: Duration) -> CameraResult<Self> {
        let source = open_device(index, config)?;
        Ok(Self::start(source, interval))
    }

    /// Pulls one frame. A failed or empty read yields `None` and the loop
    /// keeps running.
    pub fn tick(&mut self) -> Option<RgbImage> {
        if !self.is_capturing() {
            return None;
        }

        let source = self.source.as_mut()?;
        self.total_ticks += 1;

        match source.read_frame() {
            Ok(frame) if frame.width() > 0 && frame.height() > 0 => Some(frame),
            Ok(_) => {
                self.skipped_ticks += 1;
                log::debug!("skip empty frame at tick {}", self.total_ticks);
                None
            }
            Err(e) => {
                self.skipped_ticks += 1;
                log::debug!("skip frame at tick {}: {e}", self.total_ticks);
                None
            }
        }
    }

    /// Stops the loop and releases the source. Returns `false` when the loop
    /// was already stopped.
    pub fn stop(&mut self) -> bool {
        self.is_capturing.store(false, Ordering::Relaxed);

        let Some(mut source) = self.source.take() else {
            return false;
        };

        if let Err(e) = source.release() {
            log::warn!("release {} failed: {e}", source.name());
        }

        log::info!(
            "stop capturing from {}: {} ticks, {} skipped",
            source.name(),
            self.total_ticks,
            self.skipped_ticks
        );

        true
    }

    /// One immediate tick followed by [`CaptureLoop::stop`].
    pub fn snapshot_and_stop(&mut self) -> Option<RgbImage> {
        let frame = self.tick();
        self.stop();
        frame
    }

    pub fn is_capturing(&self) -> bool {
        self.is_capturing.load(Ordering::Relaxed)
    }

    /// Shared flag that turns `false` once the loop has stopped.
    pub fn cancel_token(&self) -> Arc<AtomicBool> {
        self.is_capturing.clone()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn total_ticks(&self) -> u64 {
        self.total_ticks
    }

    pub fn skipped_ticks(&self) -> u64 {
        self.skipped_ticks
    }
}

impl Drop for CaptureLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CameraError;
    use image::Rgb;
    use std::{cell::Cell, collections::VecDeque, rc::Rc};

    struct ScriptedSource {
        frames: VecDeque<Option<RgbImage>>,
        releases: Rc<Cell<u32>>,
    }

    impl ScriptedSource {
        fn new(frames: Vec<Option<RgbImage>>) -> (Box<dyn FrameSource>, Rc<Cell<u32>>) {
            let releases = Rc::new(Cell::new(0));
            let source = Self {
                frames: frames.into(),
                releases: releases.clone(),
            };
            (Box::new(source), releases)
        }
    }

    impl FrameSource for ScriptedSource {
        fn read_frame(&mut self) -> CameraResult<RgbImage> {
            self.frames
                .pop_front()
                .flatten()
                .ok_or(CameraError::NoFrameAvailable)
        }

        fn release(&mut self) -> CameraResult<()> {
            self.releases.set(self.releases.get() + 1);
            Ok(())
        }
    }

    fn solid(value: u8) -> RgbImage {
        RgbImage::from_pixel(4, 3, Rgb([value, value, value]))
    }

    #[test]
    fn test_failed_read_is_skipped() {
        let (source, _) = ScriptedSource::new(vec![Some(solid(1)), None, Some(solid(3))]);
        let mut capture = CaptureLoop::start(source, DEFAULT_CAPTURE_INTERVAL);

        assert_eq!(capture.tick(), Some(solid(1)));
        assert_eq!(capture.tick(), None);
        assert!(capture.is_capturing());
        assert_eq!(capture.tick(), Some(solid(3)));
        assert_eq!((capture.total_ticks(), capture.skipped_ticks()), (3, 1));
    }

    #[test]
    fn test_empty_frame_is_skipped() {
        let (source, _) = ScriptedSource::new(vec![Some(RgbImage::new(0, 0))]);
        let mut capture = CaptureLoop::start(source, DEFAULT_CAPTURE_INTERVAL);

        assert_eq!(capture.tick(), None);
        assert!(capture.is_capturing());
    }

    #[test]
    fn test_stop_releases_once() {
        let (source, releases) = ScriptedSource::new(vec![Some(solid(1))]);
        let mut capture = CaptureLoop::start(source, DEFAULT_CAPTURE_INTERVAL);
        let flag = capture.cancel_token();

        assert!(capture.stop());
        assert!(!capture.stop());
        assert_eq!(releases.get(), 1);
        assert!(!flag.load(Ordering::Relaxed));

        assert_eq!(capture.tick(), None);
        drop(capture);
        assert_eq!(releases.get(), 1);
    }

    #[test]
    fn test_drop_releases_running_source() {
        let (source, releases) = ScriptedSource::new(vec![]);
        drop(CaptureLoop::start(source, DEFAULT_CAPTURE_INTERVAL));
        assert_eq!(releases.get(), 1);
    }

    #[test]
    fn test_snapshot_and_stop() {
        let (source, releases) = ScriptedSource::new(vec![Some(solid(9)), Some(solid(10))]);
        let mut capture = CaptureLoop::start(source, Duration::from_millis(40));

        assert_eq!(capture.interval(), Duration::from_millis(40));
        assert_eq!(capture.snapshot_and_stop(), Some(solid(9)));
        assert!(!capture.is_capturing());
        assert_eq!(releases.get(), 1);
        assert_eq!(capture.snapshot_and_stop(), None);
        assert_eq!(releases.get(), 1);
    }
}
