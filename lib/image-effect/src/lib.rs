//! Frame transforms for the editor.
//!
//! Every transform takes a borrowed [`Frame`] and returns a fresh one, so a
//! frame that has been published is never mutated in place.

pub mod base_effect;
pub mod channel_effect;
pub mod drawing_effect;
pub mod geometry_effect;
pub mod surface;

pub use base_effect::{BrightnessConfig, brighten};
pub use channel_effect::{Channel, ChannelSelection, select_channels};
pub use drawing_effect::{LINE_COLOR, LineConfig, MAX_THICKNESS, draw_line};
pub use geometry_effect::{CropConfig, crop};
pub use image::{Rgb, RgbImage};
pub use surface::{DisplaySurface, render};

/// One RGB snapshot: row-major, interleaved `R, G, B`, stride = `width * 3`.
pub type Frame = RgbImage;

pub type ImageEffectResult<T> = Result<T, ImageEffectError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageEffectError {
    #[error("Invalid region: ({x1}, {y1}) - ({x2}, {y2}) on a {width}x{height} frame")]
    InvalidRegion {
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        width: u32,
        height: u32,
    },

    #[error("Invalid {name}: {value}")]
    InvalidParameter { name: &'static str, value: String },
}

pub trait Effect {
    fn apply(&self, frame: &Frame) -> ImageEffectResult<Frame>;
}

#[derive(Debug, Clone)]
pub enum ImageEffect {
    Crop(CropConfig),
    Brightness(BrightnessConfig),
    Line(LineConfig),
}

impl ImageEffect {
    pub fn name(&self) -> &'static str {
        match self {
            ImageEffect::Crop(_) => "Crop",
            ImageEffect::Brightness(_) => "Brightness",
            ImageEffect::Line(_) => "Line",
        }
    }
}

impl Effect for ImageEffect {
    fn apply(&self, frame: &Frame) -> ImageEffectResult<Frame> {
        match self {
            ImageEffect::Crop(config) => config.apply(frame),
            ImageEffect::Brightness(config) => config.apply(frame),
            ImageEffect::Line(config) => config.apply(frame),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_matches_direct_call() {
        let frame = Frame::from_pixel(4, 3, Rgb([10, 20, 30]));
        let effect = ImageEffect::Brightness(BrightnessConfig::new().with_delta(5));

        assert_eq!(effect.apply(&frame).unwrap(), brighten(&frame, 5));
        assert_eq!(effect.name(), "Brightness");
    }

    #[test]
    fn test_dispatch_propagates_error() {
        let frame = Frame::new(4, 3);
        let effect = ImageEffect::Crop(CropConfig::new(3, 0, 1, 2));

        assert!(matches!(
            effect.apply(&frame),
            Err(ImageEffectError::InvalidRegion { .. })
        ));

        let effect = ImageEffect::Line(LineConfig::new().with_thickness(MAX_THICKNESS + 1));
        assert!(matches!(
            effect.apply(&frame),
            Err(ImageEffectError::InvalidParameter { name: "thickness", .. })
        ));
    }
}
