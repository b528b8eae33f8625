use crate::{Channel, ChannelSelection, Frame, select_channels};

/// Contiguous RGB888 pixels, row-major, ready to hand to a painter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplaySurface {
    pub width: u32,
    pub height: u32,
    pub stride: usize,
    pub pixels: Vec<u8>,
}

impl DisplaySurface {
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let offset = y as usize * self.stride + x as usize * 3;
        Some([
            self.pixels[offset],
            self.pixels[offset + 1],
            self.pixels[offset + 2],
        ])
    }
}

pub fn render(frame: &Frame, selection: &ChannelSelection) -> DisplaySurface {
    let [red, green, blue] = Channel::ALL.map(|c| selection.is_visible(c));
    let masked = select_channels(frame, red, green, blue);
    let (width, height) = masked.dimensions();

    DisplaySurface {
        width,
        height,
        stride: width as usize * 3,
        pixels: masked.into_raw(),
    }
}
