//! A draw surface that records every call, for asserting on engine output.

use dreamground_core::{Argb, DrawSurface, Paint, TextBounds};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear(Argb),
    Polygon { points: Vec<(f32, f32)>, color: Argb },
    Circle { cx: f32, cy: f32, radius: f32, paint: Paint },
    Line { from: (f32, f32), to: (f32, f32), color: Argb },
    Text { text: String, x: f32, y: f32, color: Argb },
    Save,
    Restore,
    Translate(f32, f32),
    Rotate(f32, f32, f32),
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            calls: Vec::new(),
        }
    }

    pub fn polygons(&self) -> Vec<(&[(f32, f32)], Argb)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Polygon { points, color } => Some((points.as_slice(), *color)),
                _ => None,
            })
            .collect()
    }

    pub fn circles(&self) -> Vec<(f32, f32, f32, Paint)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Circle {
                    cx,
                    cy,
                    radius,
                    paint,
                } => Some((*cx, *cy, *radius, *paint)),
                _ => None,
            })
            .collect()
    }
}

impl DrawSurface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self, color: Argb) {
        self.calls.push(DrawCall::Clear(color));
    }

    fn fill_polygon(&mut self, points: &[(f32, f32)], color: Argb) {
        self.calls.push(DrawCall::Polygon {
            points: points.to_vec(),
            color,
        });
    }

    fn draw_circle(&mut self, cx: f32, cy: f32, radius: f32, paint: Paint) {
        self.calls.push(DrawCall::Circle {
            cx,
            cy,
            radius,
            paint,
        });
    }

    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), color: Argb) {
        self.calls.push(DrawCall::Line { from, to, color });
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, color: Argb) {
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            x,
            y,
            color,
        });
    }

    fn measure_text(&self, text: &str) -> TextBounds {
        TextBounds {
            width: text.chars().count() as f32,
            height: 1.0,
        }
    }

    fn save(&mut self) {
        self.calls.push(DrawCall::Save);
    }

    fn restore(&mut self) {
        self.calls.push(DrawCall::Restore);
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.calls.push(DrawCall::Translate(dx, dy));
    }

    fn rotate(&mut self, degrees: f32, px: f32, py: f32) {
        self.calls.push(DrawCall::Rotate(degrees, px, py));
    }
}
