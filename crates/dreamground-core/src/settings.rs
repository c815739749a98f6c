//! Tunable settings for each view, with their defaults.

use serde::{Deserialize, Serialize};

use crate::color::Argb;

/// A value clamped into `[0, 1]` at construction. NaN becomes `0`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(from = "f32", into = "f32")]
pub struct UnitInterval(f32);

impl UnitInterval {
    pub const ZERO: Self = Self(0.0);
    pub const ONE: Self = Self(1.0);

    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            Self(0.0)
        } else {
            Self(value.clamp(0.0, 1.0))
        }
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl From<f32> for UnitInterval {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

impl From<UnitInterval> for f32 {
    fn from(value: UnitInterval) -> Self {
        value.0
    }
}

/// Largest number of vertices along one side of the wave grid.
pub const MAX_GRID_SIDE: usize = 256;
/// Largest number of retired ripples kept for reuse.
pub const MAX_POOL_CAPACITY: usize = 4096;
/// Upper bound for pixel lengths read from settings.
const MAX_LENGTH: f32 = 4096.0;
/// Bound on crest displacement, in cells.
const MAX_AMPLITUDE: f32 = 16.0;

/// `value` clamped into `[min, max]`, or `fallback` when it is NaN or
/// infinite.
fn finite_in(value: f32, min: f32, max: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        fallback
    }
}

/// Which view is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneKind {
    #[default]
    Ripple,
    Wave,
    StarrySky,
}

impl SceneKind {
    pub fn next(self) -> Self {
        match self {
            SceneKind::Ripple => SceneKind::Wave,
            SceneKind::Wave => SceneKind::StarrySky,
            SceneKind::StarrySky => SceneKind::Ripple,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SceneKind::Ripple => "ripple",
            SceneKind::Wave => "wave",
            SceneKind::StarrySky => "starry sky",
        }
    }
}

/// Visual style of the ripple view; selects the interpolation presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RippleStyle {
    /// Expanding outlined rings.
    #[default]
    Ripple,
    /// Filled drops.
    Drop,
}

impl RippleStyle {
    pub fn toggle(self) -> Self {
        match self {
            RippleStyle::Ripple => RippleStyle::Drop,
            RippleStyle::Drop => RippleStyle::Ripple,
        }
    }
}

/// How the wave mesh computes the normal of a quad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalMethod {
    /// Cross product of two edges of a single corner triangle.
    SingleTriangle,
    /// Average of the four corner-triangle normals, re-normalized.
    #[default]
    Averaged,
}

impl NormalMethod {
    pub fn toggle(self) -> Self {
        match self {
            NormalMethod::SingleTriangle => NormalMethod::Averaged,
            NormalMethod::Averaged => NormalMethod::SingleTriangle,
        }
    }
}

/// Render loop settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Pause between frames in milliseconds.
    pub refresh_interval_ms: u64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            refresh_interval_ms: 20,
        }
    }
}

/// Ripple view settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RippleSettings {
    pub background_color: Argb,
    pub ripple_color: Argb,
    /// Radius of a fully grown ripple, in pixels.
    pub ripple_radius: f32,
    /// How far a single ripple's radius may deviate from `ripple_radius`.
    pub radius_fluctuation: UnitInterval,
    /// Stroke width for [`RippleStyle::Ripple`].
    pub stroke_width: f32,
    /// Lifetime of a ripple in milliseconds.
    pub lifetime_ms: u64,
    /// Minimum time between two spawns in milliseconds.
    pub incubate_interval_ms: u64,
    pub style: RippleStyle,
    /// Number of retired particles kept for reuse.
    pub pool_capacity: usize,
    pub seed: Option<u64>,
}

impl Default for RippleSettings {
    fn default() -> Self {
        Self {
            background_color: Argb::WHITE,
            ripple_color: Argb::GREEN,
            ripple_radius: 24.0,
            radius_fluctuation: UnitInterval::new(0.2),
            stroke_width: 1.5,
            lifetime_ms: 3000,
            incubate_interval_ms: 400,
            style: RippleStyle::Ripple,
            pool_capacity: 24,
            seed: None,
        }
    }
}

impl RippleSettings {
    /// Replace non-finite lengths with their defaults and bound the pool.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        self.ripple_radius = finite_in(self.ripple_radius, 0.0, MAX_LENGTH, defaults.ripple_radius);
        self.stroke_width = finite_in(self.stroke_width, 0.0, MAX_LENGTH, defaults.stroke_width);
        self.pool_capacity = self.pool_capacity.min(MAX_POOL_CAPACITY);
        self
    }
}

/// Wave mesh settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveSettings {
    /// Vertex columns (faces + 1).
    pub columns: usize,
    /// Vertex rows (faces + 1).
    pub rows: usize,
    /// Fixed cell size in pixels; derived from the canvas when absent.
    pub cell_size: Option<f32>,
    /// Scale of the in-plane (x, y) crest displacement.
    pub transverse_amplitude: f32,
    /// Scale of the out-of-plane (z) crest displacement.
    pub longitudinal_amplitude: f32,
    pub background_color: Argb,
    /// Color of faces looking straight at the viewer.
    pub fore_light_color: Argb,
    /// Color of faces turned fully away from the viewer.
    pub back_light_color: Argb,
    pub normal_method: NormalMethod,
    pub seed: Option<u64>,
}

impl Default for WaveSettings {
    fn default() -> Self {
        Self {
            columns: 10,
            rows: 8,
            cell_size: None,
            transverse_amplitude: 0.6,
            longitudinal_amplitude: 0.8,
            background_color: Argb::WHITE,
            fore_light_color: Argb::WHITE,
            back_light_color: Argb::RED,
            normal_method: NormalMethod::Averaged,
            seed: None,
        }
    }
}

impl WaveSettings {
    /// Bound the grid size and replace non-finite lengths and amplitudes
    /// with their defaults. A cell size that is not a positive number falls
    /// back to deriving it from the canvas.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        self.columns = self.columns.clamp(2, MAX_GRID_SIDE);
        self.rows = self.rows.clamp(2, MAX_GRID_SIDE);
        self.cell_size = self
            .cell_size
            .filter(|size| size.is_finite() && *size > 0.0)
            .map(|size| size.min(MAX_LENGTH));
        self.transverse_amplitude = finite_in(
            self.transverse_amplitude,
            -MAX_AMPLITUDE,
            MAX_AMPLITUDE,
            defaults.transverse_amplitude,
        );
        self.longitudinal_amplitude = finite_in(
            self.longitudinal_amplitude,
            -MAX_AMPLITUDE,
            MAX_AMPLITUDE,
            defaults.longitudinal_amplitude,
        );
        self
    }
}

/// Starry sky settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarrySettings {
    /// Stars per square pixel.
    pub density: UnitInterval,
    /// Star radius in pixels.
    pub star_size: f32,
    pub star_alpha: UnitInterval,
    /// Time between two re-samplings of the sky in milliseconds.
    pub flash_interval_ms: u64,
    pub background_color: Argb,
    pub seed: Option<u64>,
}

impl Default for StarrySettings {
    fn default() -> Self {
        Self {
            density: UnitInterval::new(0.004),
            star_size: 1.0,
            star_alpha: UnitInterval::ONE,
            flash_interval_ms: 100,
            background_color: Argb::BLACK,
            seed: None,
        }
    }
}

impl StarrySettings {
    /// Replace a non-finite star size with the default.
    pub fn sanitized(mut self) -> Self {
        self.star_size = finite_in(self.star_size, 0.0, MAX_LENGTH, Self::default().star_size);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_interval_clamps() {
        assert_eq!(UnitInterval::new(-0.3).get(), 0.0);
        assert_eq!(UnitInterval::new(1.7).get(), 1.0);
        assert_eq!(UnitInterval::new(0.25).get(), 0.25);
        assert_eq!(UnitInterval::new(f32::NAN).get(), 0.0);
    }

    #[test]
    fn test_scene_cycle() {
        let start = SceneKind::default();
        assert_eq!(start.next().next().next(), start);
        assert_ne!(start.next(), start);
    }

    #[test]
    fn test_toggles() {
        assert_eq!(RippleStyle::Ripple.toggle(), RippleStyle::Drop);
        assert_eq!(RippleStyle::Drop.toggle(), RippleStyle::Ripple);
        assert_eq!(NormalMethod::Averaged.toggle(), NormalMethod::SingleTriangle);
    }

    #[test]
    fn test_ripple_lengths_fall_back_when_not_finite() {
        let defaults = RippleSettings::default();
        let settings = RippleSettings {
            ripple_radius: f32::NAN,
            stroke_width: f32::INFINITY,
            pool_capacity: usize::MAX,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(settings.ripple_radius, defaults.ripple_radius);
        assert_eq!(settings.stroke_width, defaults.stroke_width);
        assert_eq!(settings.pool_capacity, MAX_POOL_CAPACITY);

        let settings = RippleSettings {
            ripple_radius: -5.0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(settings.ripple_radius, 0.0);
    }

    #[test]
    fn test_wave_knobs_are_bounded() {
        let defaults = WaveSettings::default();
        let settings = WaveSettings {
            columns: usize::MAX / 2 + 1,
            rows: 0,
            cell_size: Some(f32::NAN),
            transverse_amplitude: f32::NAN,
            longitudinal_amplitude: f32::NEG_INFINITY,
            ..Default::default()
        }
        .sanitized();
        assert_eq!((settings.columns, settings.rows), (MAX_GRID_SIDE, 2));
        assert_eq!(settings.cell_size, None);
        assert_eq!(settings.transverse_amplitude, defaults.transverse_amplitude);
        assert_eq!(settings.longitudinal_amplitude, defaults.longitudinal_amplitude);

        let settings = WaveSettings {
            cell_size: Some(-3.0),
            transverse_amplitude: 1e30,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(settings.cell_size, None);
        assert_eq!(settings.transverse_amplitude, MAX_AMPLITUDE);
    }

    #[test]
    fn test_star_size_falls_back_when_not_finite() {
        let settings = StarrySettings {
            star_size: f32::INFINITY,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(settings.star_size, StarrySettings::default().star_size);
    }

    #[test]
    fn test_defaults_are_already_sane() {
        assert_eq!(RippleSettings::default().sanitized(), RippleSettings::default());
        assert_eq!(WaveSettings::default().sanitized(), WaveSettings::default());
        assert_eq!(StarrySettings::default().sanitized(), StarrySettings::default());
    }
}
