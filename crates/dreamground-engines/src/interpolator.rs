//! Polynomial easing curves for the ripple view.

use dreamground_core::RippleStyle;

/// `a·t⁴ + b·t³ + c·t² + d·t`, with `curve(0) = 0` and `curve(1) = a+b+c+d`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuarticCurve {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
}

impl QuarticCurve {
    pub const fn new(a: f32, b: f32, c: f32, d: f32) -> Self {
        Self { a, b, c, d }
    }

    /// Evaluate at `t`, clamping `t` into `[0, 1]` first.
    pub fn eval(self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        t * (self.d + t * (self.c + t * (self.b + t * self.a)))
    }
}

/// Radius and alpha curves used together for one style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePreset {
    pub radius: QuarticCurve,
    pub alpha: QuarticCurve,
}

/// Fast start, slow finish: `1 - (1 - t)^4`.
const EASE_OUT_QUART: QuarticCurve = QuarticCurve::new(-1.0, 4.0, -6.0, 4.0);
/// Slow start, steepening towards the end.
const EASE_IN: QuarticCurve = QuarticCurve::new(1.0, -2.0, 2.0, 0.0);
/// Smoothstep `3t² - 2t³`.
const SMOOTHSTEP: QuarticCurve = QuarticCurve::new(0.0, -2.0, 3.0, 0.0);
/// `1 - (1 - t)^3`.
const EASE_OUT_CUBIC: QuarticCurve = QuarticCurve::new(0.0, 1.0, -3.0, 3.0);

impl CurvePreset {
    pub const RIPPLE: Self = Self {
        radius: EASE_OUT_QUART,
        alpha: EASE_IN,
    };

    pub const DROP: Self = Self {
        radius: SMOOTHSTEP,
        alpha: EASE_OUT_CUBIC,
    };

    pub fn for_style(style: RippleStyle) -> Self {
        match style {
            RippleStyle::Ripple => Self::RIPPLE,
            RippleStyle::Drop => Self::DROP,
        }
    }
}
