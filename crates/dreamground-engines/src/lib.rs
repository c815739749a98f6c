//! Animated view engines for dreamground.
//!
//! Each engine owns a small simulation and draws it through a
//! [`DrawSurface`](dreamground_core::DrawSurface): the ripple view ages pooled
//! particles along easing curves, the wave view shades a displaced grid by
//! its face normals, and the starry sky re-flashes a random star field.
//! [`RenderThread`] drives the active engine at a fixed interval on its own
//! thread.

mod interpolator;
mod pool;
mod render;
mod ripple;
mod starry;
mod state;
mod wave;

#[cfg(test)]
mod test_support;

pub use interpolator::{CurvePreset, QuarticCurve};
pub use pool::{Pool, Recycle, Slot};
pub use render::{REFRESH_INTERVAL, RenderThread, Scene, Surface};
pub use ripple::{RippleEngine, Trace};
pub use starry::{Star, StarrySky};
pub use state::{ActiveScene, SceneInput};
pub use wave::{VIEW_VECTOR, WaveEngine, face_normal};
