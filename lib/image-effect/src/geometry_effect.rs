use crate::{Effect, Frame, ImageEffectError, ImageEffectResult};
use image::imageops;

/// Half-open crop region `[x1, x2) x [y1, y2)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CropConfig {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl CropConfig {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// The region covering the whole frame.
    pub fn full(frame: &Frame) -> Self {
        Self::new(0, 0, frame.width() as i32, frame.height() as i32)
    }

    fn validate(&self, width: u32, height: u32) -> ImageEffectResult<()> {
        let Self { x1, y1, x2, y2 } = *self;
        let (w, h) = (width as i64, height as i64);

        if x1 < 0 || y1 < 0 || x2 <= x1 || y2 <= y1 || x2 as i64 > w || y2 as i64 > h {
            return Err(ImageEffectError::InvalidRegion {
                x1,
                y1,
                x2,
                y2,
                width,
                height,
            });
        }

        Ok(())
    }
}

impl Effect for CropConfig {
    fn apply(&self, frame: &Frame) -> ImageEffectResult<Frame> {
        self.validate(frame.width(), frame.height())?;

        let (x, y) = (self.x1 as u32, self.y1 as u32);
        let (w, h) = ((self.x2 - self.x1) as u32, (self.y2 - self.y1) as u32);
        Ok(imageops::crop_imm(frame, x, y, w, h).to_image())
    }
}

pub fn crop(frame: &Frame, x1: i32, y1: i32, x2: i32, y2: i32) -> ImageEffectResult<Frame> {
    CropConfig::new(x1, y1, x2, y2).apply(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn indexed(width: u32, height: u32) -> Frame {
        Frame::from_fn(width, height, |x, y| Rgb([x as u8, y as u8, 0]))
    }

    #[test]
    fn test_full_extent_crop_is_noop() {
        let frame = Frame::new(100, 50);
        let output = crop(&frame, 0, 0, 100, 50).unwrap();
        assert_eq!(output.dimensions(), (100, 50));
        assert_eq!(output, frame);
    }

    #[test]
    fn test_crop_size_and_origin() {
        let frame = indexed(20, 10);

        for (x1, y1, x2, y2) in [(0, 0, 1, 1), (3, 2, 20, 10), (5, 5, 9, 6), (19, 9, 20, 10)] {
            let output = crop(&frame, x1, y1, x2, y2).unwrap();
            assert_eq!(output.dimensions(), ((x2 - x1) as u32, (y2 - y1) as u32));
            assert_eq!(output.get_pixel(0, 0), &Rgb([x1 as u8, y1 as u8, 0]));
        }
    }

    #[test]
    fn test_inverted_region_rejected() {
        let frame = Frame::new(100, 50);
        assert!(matches!(
            crop(&frame, 10, 10, 5, 20),
            Err(ImageEffectError::InvalidRegion { x1: 10, x2: 5, .. })
        ));
    }

    #[test]
    fn test_out_of_range_regions_rejected() {
        let frame = indexed(20, 10);
        let before = frame.clone();

        for (x1, y1, x2, y2) in [
            (-1, 0, 5, 5),
            (0, -1, 5, 5),
            (4, 0, 4, 5),
            (0, 4, 5, 4),
            (0, 0, 21, 5),
            (0, 0, 5, 11),
            (0, 0, i32::MAX, 5),
        ] {
            assert!(crop(&frame, x1, y1, x2, y2).is_err(), "{x1} {y1} {x2} {y2}");
        }

        assert_eq!(frame, before);
    }

    #[test]
    fn test_full_region_helper() {
        let frame = Frame::new(7, 3);
        assert_eq!(CropConfig::full(&frame), CropConfig::new(0, 0, 7, 3));
    }
}
