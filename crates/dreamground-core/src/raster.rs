//! Off-screen ARGB raster implementing [`DrawSurface`].

use crate::canvas::{DrawSurface, Paint, TextBounds};
use crate::color::Argb;
use crate::transform::Affine;

/// Width of one glyph in pixels. Text is composited as terminal cells, and
/// one cell covers one pixel column and two pixel rows.
pub const GLYPH_WIDTH: f32 = 1.0;
/// Height of one glyph in pixels.
pub const GLYPH_HEIGHT: f32 = 2.0;

/// A piece of text recorded by [`DrawSurface::draw_text`].
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub text: String,
    /// Top-left corner, after the transform was applied.
    pub x: f32,
    pub y: f32,
    pub color: Argb,
}

/// An off-screen pixel buffer.
#[derive(Debug, Clone)]
pub struct PixelCanvas {
    width: u32,
    height: u32,
    pixels: Vec<Argb>,
    labels: Vec<TextLabel>,
    transform: Affine,
    saved: Vec<Affine>,
}

impl PixelCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Argb::TRANSPARENT; width as usize * height as usize],
            labels: Vec::new(),
            transform: Affine::IDENTITY,
            saved: Vec::new(),
        }
    }

    /// Resize in place, reusing the allocation. Resets the transform stack
    /// and drops recorded text; pixel contents are unspecified until the next
    /// [`DrawSurface::clear`].
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels
            .resize(width as usize * height as usize, Argb::TRANSPARENT);
        self.labels.clear();
        self.transform = Affine::IDENTITY;
        self.saved.clear();
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Argb> {
        if x < self.width && y < self.height {
            Some(self.pixels[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    pub fn pixels(&self) -> &[Argb] {
        &self.pixels
    }

    pub fn labels(&self) -> &[TextLabel] {
        &self.labels
    }

    fn blend(&mut self, x: i64, y: i64, color: Argb) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let idx = y as usize * self.width as usize + x as usize;
        self.pixels[idx] = color.over(self.pixels[idx]);
    }

    /// Fill the pixels of row `y` whose centers lie in `[x0, x1]`.
    fn fill_span(&mut self, y: i64, x0: f32, x1: f32, color: Argb) {
        if y < 0 || y >= self.height as i64 {
            return;
        }
        let start = (x0 - 0.5).ceil().max(0.0) as i64;
        let end = (x1 - 0.5).floor().min(self.width as f32 - 1.0) as i64;
        for x in start..=end {
            self.blend(x, y, color);
        }
    }

    /// Pixel rows whose centers fall in `[min_y, max_y]`, clipped to the canvas.
    fn rows(&self, min_y: f32, max_y: f32) -> std::ops::RangeInclusive<i64> {
        let first = (min_y - 0.5).ceil().max(0.0) as i64;
        let last = (max_y - 0.5).floor().min(self.height as f32 - 1.0) as i64;
        first..=last
    }
}

impl DrawSurface for PixelCanvas {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self, color: Argb) {
        self.pixels.fill(color);
        self.labels.clear();
    }

    fn fill_polygon(&mut self, points: &[(f32, f32)], color: Argb) {
        if points.len() < 3 {
            return;
        }
        let pts: Vec<(f32, f32)> = points
            .iter()
            .map(|&(x, y)| self.transform.apply(x, y))
            .collect();
        if pts.iter().any(|(x, y)| !x.is_finite() || !y.is_finite()) {
            return;
        }

        let (min_y, max_y) = pts
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), &(_, y)| (lo.min(y), hi.max(y)));

        // Even-odd scanline fill sampled at pixel centers.
        let mut crossings = Vec::with_capacity(pts.len());
        for row in self.rows(min_y, max_y) {
            let sy = row as f32 + 0.5;
            crossings.clear();
            for i in 0..pts.len() {
                let (x0, y0) = pts[i];
                let (x1, y1) = pts[(i + 1) % pts.len()];
                if (y0 <= sy && sy < y1) || (y1 <= sy && sy < y0) {
                    crossings.push(x0 + (sy - y0) / (y1 - y0) * (x1 - x0));
                }
            }
            crossings.sort_by(f32::total_cmp);
            for pair in crossings.chunks_exact(2) {
                self.fill_span(row, pair[0], pair[1], color);
            }
        }
    }

    fn draw_circle(&mut self, cx: f32, cy: f32, radius: f32, paint: Paint) {
        let (cx, cy) = self.transform.apply(cx, cy);
        let radius = radius * self.transform.scale();
        if !cx.is_finite() || !cy.is_finite() || !radius.is_finite() || radius <= 0.0 {
            return;
        }

        match paint {
            Paint::Fill(color) => {
                for row in self.rows(cy - radius, cy + radius) {
                    let dy = row as f32 + 0.5 - cy;
                    let half = (radius * radius - dy * dy).max(0.0).sqrt();
                    self.fill_span(row, cx - half, cx + half, color);
                }
            }
            Paint::Stroke { color, width } => {
                let half_width = width.max(1.0) / 2.0;
                let outer = radius + half_width;
                let inner = (radius - half_width).max(0.0);
                let first_col = (cx - outer).floor().max(0.0) as i64;
                let last_col = (cx + outer).ceil().min(self.width as f32) as i64;
                for row in self.rows(cy - outer, cy + outer) {
                    let dy = row as f32 + 0.5 - cy;
                    for col in first_col..last_col {
                        let dx = col as f32 + 0.5 - cx;
                        let d = (dx * dx + dy * dy).sqrt();
                        if d >= inner && d <= outer {
                            self.blend(col, row, color);
                        }
                    }
                }
            }
        }
    }

    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), color: Argb) {
        let (x0, y0) = self.transform.apply(from.0, from.1);
        let (x1, y1) = self.transform.apply(to.0, to.1);
        if ![x0, y0, x1, y1].iter().all(|v| v.is_finite()) {
            return;
        }
        let steps = (x1 - x0).abs().max((y1 - y0).abs()).ceil().max(1.0);
        // Keep pathological lengths from stalling the frame.
        let steps = steps.min(4.0 * (self.width + self.height) as f32 + 1.0) as i64;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let x = x0 + (x1 - x0) * t;
            let y = y0 + (y1 - y0) * t;
            self.blend(x.floor() as i64, y.floor() as i64, color);
        }
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, color: Argb) {
        let (x, y) = self.transform.apply(x, y);
        if !x.is_finite() || !y.is_finite() || text.is_empty() {
            return;
        }
        self.labels.push(TextLabel {
            text: text.to_string(),
            x,
            y,
            color,
        });
    }

    fn measure_text(&self, text: &str) -> TextBounds {
        TextBounds {
            width: text.chars().count() as f32 * GLYPH_WIDTH,
            height: GLYPH_HEIGHT,
        }
    }

    fn save(&mut self) {
        self.saved.push(self.transform);
    }

    fn restore(&mut self) {
        if let Some(t) = self.saved.pop() {
            self.transform = t;
        }
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.transform = self.transform.then(Affine::translation(dx, dy));
    }

    fn rotate(&mut self, degrees: f32, px: f32, py: f32) {
        self.transform = self
            .transform
            .then(Affine::rotation_about(degrees, px, py));
    }
}
