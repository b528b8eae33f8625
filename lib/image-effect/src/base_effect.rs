use crate::{Effect, Frame, ImageEffectResult};
use derivative::Derivative;
use derive_setters::Setters;

/// Brightness adjustment configuration
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct BrightnessConfig {
    #[derivative(Default(value = "10"))]
    pub delta: i32,
}

impl BrightnessConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Effect for BrightnessConfig {
    fn apply(&self, frame: &Frame) -> ImageEffectResult<Frame> {
        Ok(brighten(frame, self.delta))
    }
}

/// Adds `delta` to every sample, clamped to `[0, 255]`.
pub fn brighten(frame: &Frame, delta: i32) -> Frame {
    let mut output = frame.clone();
    if delta == 0 {
        return output;
    }

    for sample in output.iter_mut() {
        *sample = (*sample as i32).saturating_add(delta).clamp(0, 255) as u8;
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_brighten_clamps_each_sample() {
        let frame = Frame::from_fn(4, 4, |x, y| Rgb([(x * 80) as u8, (y * 80) as u8, 200]));

        for delta in [-300, -100, -1, 1, 55, 100, 300] {
            let output = brighten(&frame, delta);
            for (src, dst) in frame.iter().zip(output.iter()) {
                assert_eq!(*dst as i32, (*src as i32 + delta).clamp(0, 255));
            }
        }
    }

    #[test]
    fn test_brighten_zero_is_identity() {
        let frame = Frame::from_fn(3, 2, |x, y| Rgb([x as u8, y as u8, 7]));
        assert_eq!(brighten(&frame, 0), frame);
    }

    #[test]
    fn test_brighten_black_saturates_to_white() {
        let frame = Frame::new(8, 8);
        let output = brighten(&frame, 300);
        assert!(output.iter().all(|v| *v == 255));
    }

    #[test]
    fn test_brighten_extreme_delta_does_not_overflow() {
        let frame = Frame::from_pixel(2, 2, Rgb([100, 100, 100]));
        assert!(brighten(&frame, i32::MAX).iter().all(|v| *v == 255));
        assert!(brighten(&frame, i32::MIN).iter().all(|v| *v == 0));
    }

    #[test]
    fn test_default_delta() {
        let frame = Frame::new(1, 1);
        let output = BrightnessConfig::new().apply(&frame).unwrap();
        assert_eq!(output.get_pixel(0, 0), &Rgb([10, 10, 10]));
    }
}
