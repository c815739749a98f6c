//! Core types shared by the dreamground crates: vector math, colors, the
//! draw surface trait with its off-screen raster, and view settings.

mod canvas;
mod color;
mod raster;
mod settings;
mod transform;
mod vector;

pub use canvas::{DrawSurface, Paint, TextBounds};
pub use color::{Argb, ParseColorError, hsl_to_rgb};
pub use raster::{GLYPH_HEIGHT, GLYPH_WIDTH, PixelCanvas, TextLabel};
pub use settings::{
    MAX_GRID_SIDE, MAX_POOL_CAPACITY, NormalMethod, RenderSettings, RippleSettings, RippleStyle, SceneKind, StarrySettings,
    UnitInterval, WaveSettings,
};
pub use transform::Affine;
pub use vector::Vector3;
