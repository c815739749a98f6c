//! The draw-primitive surface the engines render through.

use crate::color::Argb;

/// How a closed shape is painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    /// Fill the interior.
    Fill(Argb),
    /// Outline with the given stroke width.
    Stroke { color: Argb, width: f32 },
}

impl Paint {
    pub fn color(self) -> Argb {
        match self {
            Paint::Fill(color) | Paint::Stroke { color, .. } => color,
        }
    }
}

/// Measured extent of a piece of text, in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextBounds {
    pub width: f32,
    pub height: f32,
}

/// A 2D drawing surface.
///
/// Coordinates are in pixels with the origin at the top-left corner and y
/// growing downwards. All drawing goes through the current transform, which
/// `save`/`restore` push and pop.
pub trait DrawSurface {
    /// Canvas width in pixels.
    fn width(&self) -> u32;
    /// Canvas height in pixels.
    fn height(&self) -> u32;

    /// Fill the whole canvas with `color`, ignoring the transform.
    fn clear(&mut self, color: Argb);
    /// Fill the closed polygon through `points`.
    fn fill_polygon(&mut self, points: &[(f32, f32)], color: Argb);
    fn draw_circle(&mut self, cx: f32, cy: f32, radius: f32, paint: Paint);
    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), color: Argb);
    /// Draw `text` with its top-left corner at `(x, y)`.
    fn draw_text(&mut self, text: &str, x: f32, y: f32, color: Argb);
    fn measure_text(&self, text: &str) -> TextBounds;

    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, dx: f32, dy: f32);
    /// Rotate by `degrees` (clockwise on screen) about `(px, py)`.
    fn rotate(&mut self, degrees: f32, px: f32, py: f32);
}
