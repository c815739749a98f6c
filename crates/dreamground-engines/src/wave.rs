//! Wave view: a grid of randomly displaced vertices drawn as quads shaded by
//! the angle between each face normal and the viewer.

use std::f32::consts::PI;

use dreamground_core::{Argb, DrawSurface, NormalMethod, Vector3, WaveSettings};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Direction towards the viewer.
pub const VIEW_VECTOR: Vector3 = Vector3::Z;

/// Degrees of camera roll per pixel of horizontal pointer drag.
const ROLL_PER_PIXEL: f32 = 0.5;

/// Face normal of the quad `c00, c10, c11, c01`.
///
/// Degenerate faces yield [`VIEW_VECTOR`] so no NaN reaches the renderer.
pub fn face_normal(
    method: NormalMethod,
    c00: Vector3,
    c10: Vector3,
    c01: Vector3,
    c11: Vector3,
) -> Vector3 {
    match method {
        NormalMethod::SingleTriangle => (c10 - c00)
            .cross(c01 - c00)
            .unit_vector()
            .unwrap_or(VIEW_VECTOR),
        NormalMethod::Averaged => {
            // Corners in winding order; each corner contributes the normal
            // of the triangle formed with its two neighbours.
            let ring = [c00, c10, c11, c01];
            let sum = (0..ring.len())
                .filter_map(|i| {
                    let here = ring[i];
                    let next = ring[(i + 1) % ring.len()];
                    let prev = ring[(i + ring.len() - 1) % ring.len()];
                    (next - here).cross(prev - here).unit_vector()
                })
                .fold(Vector3::ZERO, |acc, n| acc + n);
            sum.unit_vector().unwrap_or(VIEW_VECTOR)
        }
    }
}

/// Procedural mesh engine behind the wave view.
#[derive(Debug)]
pub struct WaveEngine {
    settings: WaveSettings,
    /// Crest of vertex `(col, row)` at `col * rows + row`.
    crests: Vec<Vector3>,
    cell_width: f32,
    cell_height: f32,
    last_size: (u32, u32),
    roll_degrees: f32,
    /// Pointer x and roll when the current drag began.
    drag_anchor: Option<(f32, f32)>,
    /// Reused outline buffer.
    quad: Vec<(f32, f32)>,
}

impl WaveEngine {
    pub fn new(settings: WaveSettings) -> Self {
        let settings = settings.sanitized();
        let mut rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let transverse = settings.transverse_amplitude;
        let longitudinal = settings.longitudinal_amplitude;
        let crests = (0..settings.columns * settings.rows)
            .map(|_| {
                Vector3::new(
                    rng.random_range(-0.5..=0.5) * transverse,
                    rng.random_range(-0.5..=0.5) * transverse,
                    rng.random_range(-0.5..=0.5) * longitudinal,
                )
            })
            .collect();
        log::debug!(
            "wave engine: {}x{} grid, {:?} normals",
            settings.columns,
            settings.rows,
            settings.normal_method
        );

        Self {
            crests,
            cell_width: 0.0,
            cell_height: 0.0,
            last_size: (0, 0),
            roll_degrees: 0.0,
            drag_anchor: None,
            quad: Vec::with_capacity(4),
            settings,
        }
    }

    pub fn normal_method(&self) -> NormalMethod {
        self.settings.normal_method
    }

    pub fn set_normal_method(&mut self, method: NormalMethod) {
        self.settings.normal_method = method;
    }

    pub fn roll_degrees(&self) -> f32 {
        self.roll_degrees
    }

    pub fn crest(&self, column: usize, row: usize) -> Vector3 {
        self.crests[column * self.settings.rows + row]
    }

    /// Recompute the cell size when the canvas size changes.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.last_size == (width, height) && self.cell_width > 0.0 {
            return;
        }
        self.last_size = (width, height);

        (self.cell_width, self.cell_height) = match self.settings.cell_size {
            Some(size) if size > 0.0 => (size, size),
            _ => (
                width as f32 / self.settings.columns.saturating_sub(2).max(1) as f32,
                height as f32 / self.settings.rows.saturating_sub(2).max(1) as f32,
            ),
        };
        log::debug!(
            "wave cells {:.1}x{:.1} for {width}x{height}",
            self.cell_width,
            self.cell_height
        );
    }

    /// World-space position of vertex `(column, row)`.
    pub fn coordinate(&self, column: usize, row: usize) -> Vector3 {
        let crest = self.crest(column, row);
        let (w, h) = (self.cell_width, self.cell_height);
        Vector3::new(
            (column as f32 + crest.x) * w - w / 2.0,
            (row as f32 + crest.y) * h - h / 2.0,
            crest.z * (w + h) / 2.0,
        )
    }

    /// Blend from the fore light (`percent = 0`) to the back light
    /// (`percent = 1`).
    pub fn compute_plane_color(&self, percent: f32) -> Argb {
        self.settings
            .fore_light_color
            .lerp(self.settings.back_light_color, percent)
    }

    /// Color of a face with the given normal.
    pub fn plane_color(&self, normal: Vector3) -> Argb {
        let percent = (normal.angle_to(VIEW_VECTOR) / PI).clamp(0.0, 1.0);
        self.compute_plane_color(percent)
    }

    /// Start, continue or end a drag that rolls the camera.
    pub fn pointer_down(&mut self, x: f32) {
        self.drag_anchor = Some((x, self.roll_degrees));
    }

    pub fn pointer_moved(&mut self, x: f32) {
        if let Some((start_x, start_roll)) = self.drag_anchor {
            self.roll_degrees = (start_roll + (x - start_x) * ROLL_PER_PIXEL) % 360.0;
        }
    }

    pub fn pointer_up(&mut self) {
        self.drag_anchor = None;
    }

    /// One frame: draw every interior cell in row-major order.
    pub fn update_canvas(&mut self, canvas: &mut dyn DrawSurface) {
        let (width, height) = (canvas.width(), canvas.height());
        self.resize(width, height);

        canvas.clear(self.settings.background_color);
        canvas.save();
        if self.roll_degrees != 0.0 {
            canvas.rotate(self.roll_degrees, width as f32 / 2.0, height as f32 / 2.0);
        }

        let method = self.settings.normal_method;
        let mut quad = std::mem::take(&mut self.quad);
        for row in 0..self.settings.rows.saturating_sub(1) {
            for column in 0..self.settings.columns.saturating_sub(1) {
                let c00 = self.coordinate(column, row);
                let c10 = self.coordinate(column + 1, row);
                let c01 = self.coordinate(column, row + 1);
                let c11 = self.coordinate(column + 1, row + 1);

                let normal = face_normal(method, c00, c10, c01, c11);
                let color = self.plane_color(normal);

                quad.clear();
                quad.extend([c00, c10, c11, c01].iter().map(|c| (c.x, c.y)));
                canvas.fill_polygon(&quad, color);
            }
        }
        self.quad = quad;

        canvas.restore();
    }
}
