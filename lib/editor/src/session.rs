use crate::{EditorResult, input::parse_number};
use image_effect::{BrightnessConfig, CropConfig, Frame, ImageEffect, LineConfig};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditSession {
    #[default]
    Idle,
    Capturing,
    Cropping,
    Brightening,
    LineDrawing,
}

impl fmt::Display for EditSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EditSession::Idle => "idle",
            EditSession::Capturing => "capture",
            EditSession::Cropping => "crop",
            EditSession::Brightening => "brightness",
            EditSession::LineDrawing => "line drawing",
        };
        f.write_str(name)
    }
}

/// Raw text of the crop fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CropForm {
    pub x1: String,
    pub y1: String,
    pub x2: String,
    pub y2: String,
}

impl CropForm {
    pub fn new(x1: impl ToString, y1: impl ToString, x2: impl ToString, y2: impl ToString) -> Self {
        Self {
            x1: x1.to_string(),
            y1: y1.to_string(),
            x2: x2.to_string(),
            y2: y2.to_string(),
        }
    }

    /// Pre-filled with the full frame.
    pub fn for_frame(frame: &Frame) -> Self {
        Self::new(0, 0, frame.width(), frame.height())
    }

    pub fn parse(&self) -> EditorResult<CropConfig> {
        Ok(CropConfig::new(
            parse_number("x1", &self.x1)?,
            parse_number("y1", &self.y1)?,
            parse_number("x2", &self.x2)?,
            parse_number("y2", &self.y2)?,
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BrightnessForm {
    pub delta: String,
}

impl BrightnessForm {
    pub fn new(delta: impl ToString) -> Self {
        Self {
            delta: delta.to_string(),
        }
    }

    pub fn parse(&self) -> EditorResult<BrightnessConfig> {
        Ok(BrightnessConfig::new().with_delta(parse_number("brightness", &self.delta)?))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineForm {
    pub x1: String,
    pub y1: String,
    pub x2: String,
    pub y2: String,
    pub thickness: String,
}

impl LineForm {
    pub fn new(
        x1: impl ToString,
        y1: impl ToString,
        x2: impl ToString,
        y2: impl ToString,
        thickness: impl ToString,
    ) -> Self {
        Self {
            x1: x1.to_string(),
            y1: y1.to_string(),
            x2: x2.to_string(),
            y2: y2.to_string(),
            thickness: thickness.to_string(),
        }
    }

    /// Pre-filled with the frame diagonal.
    pub fn for_frame(frame: &Frame, thickness: i32) -> Self {
        Self::new(0, 0, frame.width(), frame.height(), thickness)
    }

    pub fn parse(&self) -> EditorResult<LineConfig> {
        let start = (parse_number("x1", &self.x1)?, parse_number("y1", &self.y1)?);
        let end = (parse_number("x2", &self.x2)?, parse_number("y2", &self.y2)?);
        let thickness = parse_number("thickness", &self.thickness)?;

        Ok(LineConfig::new()
            .with_start(start)
            .with_end(end)
            .with_thickness(thickness))
    }
}

/// Input submitted when the user applies an edit session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditRequest {
    Crop(CropForm),
    Brighten(BrightnessForm),
    Line(LineForm),
}

impl EditRequest {
    /// The session this request completes.
    pub fn session(&self) -> EditSession {
        match self {
            EditRequest::Crop(_) => EditSession::Cropping,
            EditRequest::Brighten(_) => EditSession::Brightening,
            EditRequest::Line(_) => EditSession::LineDrawing,
        }
    }

    pub fn parse(&self) -> EditorResult<ImageEffect> {
        Ok(match self {
            EditRequest::Crop(form) => ImageEffect::Crop(form.parse()?),
            EditRequest::Brighten(form) => ImageEffect::Brightness(form.parse()?),
            EditRequest::Line(form) => ImageEffect::Line(form.parse()?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EditorError;

    #[test]
    fn test_forms_prefill_from_frame() {
        let frame = Frame::new(640, 480);

        assert_eq!(CropForm::for_frame(&frame), CropForm::new(0, 0, 640, 480));
        assert_eq!(
            LineForm::for_frame(&frame, 3),
            LineForm::new(0, 0, 640, 480, 3)
        );
    }

    #[test]
    fn test_crop_form_parse() {
        let config = CropForm::new(" 1", "2 ", "30", "40").parse().unwrap();
        assert_eq!(config, CropConfig::new(1, 2, 30, 40));
    }

    #[test]
    fn test_line_form_reports_bad_field() {
        let form = LineForm::new(0, 0, 10, 10, "thick");

        match form.parse() {
            Err(EditorError::InvalidNumericInput { field, .. }) => assert_eq!(field, "thickness"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_request_session_and_parse() {
        let request = EditRequest::Brighten(BrightnessForm::new(-20));
        assert_eq!(request.session(), EditSession::Brightening);

        match request.parse().unwrap() {
            ImageEffect::Brightness(config) => assert_eq!(config.delta, -20),
            other => panic!("unexpected {other:?}"),
        }

        let request = EditRequest::Brighten(BrightnessForm::new("1e3"));
        assert!(matches!(
            request.parse(),
            Err(EditorError::InvalidNumericInput { field: "brightness", .. })
        ));
    }

    #[test]
    fn test_session_display() {
        assert_eq!(EditSession::LineDrawing.to_string(), "line drawing");
        assert_eq!(EditSession::default(), EditSession::Idle);
    }
}
