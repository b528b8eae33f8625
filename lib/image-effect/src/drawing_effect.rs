//! Solid line overlay
//!
//! Thickness 1 is a plain Bresenham segment. A thicker pen fills the band
//! `-(t - 1) / 2 ..= t / 2` pixels either side of the segment as one polygon and
//! adds a round cap at each end, so thickness `t` covers exactly `t` pixels
//! across the line. Both the band and the caps are clipped to the frame before
//! filling. Thickness `<= 0` is drawn as thickness 1.

use crate::{Effect, Frame, ImageEffectError, ImageEffectResult};
use derivative::Derivative;
use derive_setters::Setters;
use image::Rgb;
use imageproc::{
    drawing::{draw_line_segment_mut, draw_polygon_mut},
    point::Point,
};

pub const LINE_COLOR: Rgb<u8> = Rgb([0, 255, 0]);

/// Widest pen accepted.
pub const MAX_THICKNESS: i32 = 32767;

type PointF = (f64, f64);

#[derive(Debug, Clone, Copy, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct LineConfig {
    pub start: (i32, i32),
    pub end: (i32, i32),

    #[derivative(Default(value = "3"))]
    pub thickness: i32,

    #[derivative(Default(value = "LINE_COLOR"))]
    pub color: Rgb<u8>,
}

impl LineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offsets of the first and last covered pixel, measured along the normal.
    fn band(&self) -> (f64, f64) {
        let thickness = self.thickness.max(1);
        (-((thickness - 1) / 2) as f64, (thickness / 2) as f64)
    }
}

impl Effect for LineConfig {
    fn apply(&self, frame: &Frame) -> ImageEffectResult<Frame> {
        if self.thickness > MAX_THICKNESS {
            return Err(ImageEffectError::InvalidParameter {
                name: "thickness",
                value: self.thickness.to_string(),
            });
        }

        let mut output = frame.clone();
        if output.width() == 0 || output.height() == 0 {
            return Ok(output);
        }

        let start = (self.start.0 as f64, self.start.1 as f64);
        let end = (self.end.0 as f64, self.end.1 as f64);

        if self.thickness <= 1 {
            draw_thin(&mut output, start, end, self.color);
        } else {
            draw_thick(&mut output, start, end, self.band(), self.color);
        }

        Ok(output)
    }
}

pub fn draw_line(
    frame: &Frame,
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
    thickness: i32,
) -> ImageEffectResult<Frame> {
    LineConfig::new()
        .with_start((x1, y1))
        .with_end((x2, y2))
        .with_thickness(thickness)
        .apply(frame)
}

fn max_corner(frame: &Frame) -> PointF {
    (frame.width() as f64 - 1.0, frame.height() as f64 - 1.0)
}

fn draw_thin(frame: &mut Frame, start: PointF, end: PointF, color: Rgb<u8>) {
    let Some((start, end)) = clip_segment(start, end, (0.0, 0.0), max_corner(frame)) else {
        log::debug!("line {start:?} -> {end:?} lies outside the frame");
        return;
    };

    draw_line_segment_mut(
        frame,
        (start.0.round() as f32, start.1.round() as f32),
        (end.0.round() as f32, end.1.round() as f32),
        color,
    );
}

fn draw_thick(frame: &mut Frame, start: PointF, end: PointF, band: (f64, f64), color: Rgb<u8>) {
    let (lo, hi) = band;
    let (dx, dy) = (end.0 - start.0, end.1 - start.1);
    let length = dx.hypot(dy);

    if length > 0.0 {
        let normal = (-dy / length, dx / length);
        let offset = |p: PointF, k: f64| (p.0 + normal.0 * k, p.1 + normal.1 * k);

        let quad = [
            offset(start, lo),
            offset(end, lo),
            offset(end, hi),
            offset(start, hi),
        ];
        fill_polygon(frame, &clip_polygon(&quad, max_corner(frame)), color);
    }

    // the cap radius never exceeds the band on either side
    let cap = -lo;
    fill_disc(frame, start, cap, color);
    fill_disc(frame, end, cap, color);
}

// Liang-Barsky clipping against the inclusive box `min..=max`.
fn clip_segment(start: PointF, end: PointF, min: PointF, max: PointF) -> Option<(PointF, PointF)> {
    let (dx, dy) = (end.0 - start.0, end.1 - start.1);
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);

    for (p, q) in [
        (-dx, start.0 - min.0),
        (dx, max.0 - start.0),
        (-dy, start.1 - min.1),
        (dy, max.1 - start.1),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }

        let t = q / p;
        if p < 0.0 {
            if t > t1 {
                return None;
            }
            t0 = t0.max(t);
        } else {
            if t < t0 {
                return None;
            }
            t1 = t1.min(t);
        }
    }

    Some((
        (start.0 + t0 * dx, start.1 + t0 * dy),
        (start.0 + t1 * dx, start.1 + t1 * dy),
    ))
}

// Sutherland-Hodgman clipping of a convex polygon against `0..=max`.
fn clip_polygon(polygon: &[PointF], max: PointF) -> Vec<PointF> {
    let mut output = polygon.to_vec();

    for (axis, bound, keep_below) in [
        (0, 0.0, false),
        (0, max.0, true),
        (1, 0.0, false),
        (1, max.1, true),
    ] {
        let input = std::mem::take(&mut output);
        let coord = |p: PointF| if axis == 0 { p.0 } else { p.1 };
        let inside = |p: PointF| {
            if keep_below {
                coord(p) <= bound
            } else {
                coord(p) >= bound
            }
        };
        let crossing = |a: PointF, b: PointF| {
            let t = (bound - coord(a)) / (coord(b) - coord(a));
            (a.0 + t * (b.0 - a.0), a.1 + t * (b.1 - a.1))
        };

        for (i, &current) in input.iter().enumerate() {
            let previous = input[(i + input.len() - 1) % input.len()];

            match (inside(previous), inside(current)) {
                (true, true) => output.push(current),
                (true, false) => output.push(crossing(previous, current)),
                (false, true) => {
                    output.push(crossing(previous, current));
                    output.push(current);
                }
                (false, false) => (),
            }
        }

        if output.is_empty() {
            break;
        }
    }

    output
}

/// Fills a polygon whose vertices already lie inside the frame.
fn fill_polygon(frame: &mut Frame, polygon: &[PointF], color: Rgb<u8>) {
    let mut points: Vec<Point<i32>> = Vec::with_capacity(polygon.len());
    for p in polygon {
        let point = Point::new(p.0.round() as i32, p.1.round() as i32);
        if points.last() != Some(&point) {
            points.push(point);
        }
    }

    while points.len() > 1 && points.first() == points.last() {
        points.pop();
    }

    match points.as_slice() {
        [] => (),
        [p] => frame.put_pixel(p.x as u32, p.y as u32, color),
        [a, b] => draw_line_segment_mut(
            frame,
            (a.x as f32, a.y as f32),
            (b.x as f32, b.y as f32),
            color,
        ),
        _ => draw_polygon_mut(frame, &points, color),
    }
}

/// Fills the disc of `radius` around `center`, row by row, inside the frame only.
fn fill_disc(frame: &mut Frame, center: PointF, radius: f64, color: Rgb<u8>) {
    let (cx, cy) = (center.0.round(), center.1.round());
    let max = max_corner(frame);

    let top = (cy - radius).max(0.0);
    let bottom = (cy + radius).min(max.1);
    if top > bottom {
        return;
    }

    for y in top as u32..=bottom as u32 {
        let dy = y as f64 - cy;
        let half = (radius * radius - dy * dy).max(0.0).sqrt().floor();
        let left = (cx - half).max(0.0);
        let right = (cx + half).min(max.0);

        if left > right {
            continue;
        }

        for x in left as u32..=right as u32 {
            frame.put_pixel(x, y, color);
        }
    }
}
