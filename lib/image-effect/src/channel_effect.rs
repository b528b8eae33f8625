//! Channel masking
//!
//! A view-time mask: suppressed channels are zeroed in the returned copy.

use crate::Frame;
use derivative::Derivative;
use derive_setters::Setters;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];
}

/// Per-channel visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
pub struct ChannelSelection {
    #[derivative(Default(value = "true"))]
    pub red: bool,

    #[derivative(Default(value = "true"))]
    pub green: bool,

    #[derivative(Default(value = "true"))]
    pub blue: bool,
}

impl ChannelSelection {
    pub fn new(red: bool, green: bool, blue: bool) -> Self {
        Self { red, green, blue }
    }

    pub fn is_visible(&self, channel: Channel) -> bool {
        match channel {
            Channel::Red => self.red,
            Channel::Green => self.green,
            Channel::Blue => self.blue,
        }
    }

    pub fn set(&mut self, channel: Channel, visible: bool) {
        match channel {
            Channel::Red => self.red = visible,
            Channel::Green => self.green = visible,
            Channel::Blue => self.blue = visible,
        }
    }
}

pub fn select_channels(frame: &Frame, red: bool, green: bool, blue: bool) -> Frame {
    let mut output = frame.clone();
    if red && green && blue {
        return output;
    }

    let mask = [red, green, blue];
    for pixel in output.pixels_mut() {
        for (sample, visible) in pixel.0.iter_mut().zip(mask) {
            if !visible {
                *sample = 0;
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn gradient(width: u32, height: u32) -> Frame {
        Frame::from_fn(width, height, |x, y| {
            Rgb([(x * 40) as u8, (y * 60) as u8, ((x + y) * 20) as u8])
        })
    }

    #[test]
    fn test_suppressed_channels_are_zeroed() {
        let frame = gradient(5, 4);
        let output = select_channels(&frame, true, false, true);

        for (src, dst) in frame.pixels().zip(output.pixels()) {
            assert_eq!(dst[0], src[0]);
            assert_eq!(dst[1], 0);
            assert_eq!(dst[2], src[2]);
        }
    }

    #[test]
    fn test_input_is_untouched() {
        let frame = gradient(3, 3);
        let before = frame.clone();
        _ = select_channels(&frame, false, false, false);
        assert_eq!(frame, before);
    }

    #[test]
    fn test_select_channels_idempotent() {
        let frame = gradient(6, 5);

        for mask in 0..8u8 {
            let (r, g, b) = (mask & 1 != 0, mask & 2 != 0, mask & 4 != 0);
            let once = select_channels(&frame, r, g, b);
            let twice = select_channels(&once, r, g, b);
            assert_eq!(once, twice, "mask {r} {g} {b}");
        }
    }

    #[test]
    fn test_selection_defaults_and_set() {
        let mut selection = ChannelSelection::default();
        assert!(Channel::ALL.iter().all(|c| selection.is_visible(*c)));

        selection.set(Channel::Blue, false);
        assert!(!selection.is_visible(Channel::Blue));
        assert!(selection.is_visible(Channel::Red));
        assert_eq!(selection, ChannelSelection::new(true, true, false));
    }
}
