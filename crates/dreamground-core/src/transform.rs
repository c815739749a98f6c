//! 2D affine transforms for the canvas transform stack.

/// Row-major 2x3 affine matrix: `x' = a*x + c*y + e`, `y' = b*x + d*y + f`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine {
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub fn translation(dx: f32, dy: f32) -> Self {
        Self {
            e: dx,
            f: dy,
            ..Self::IDENTITY
        }
    }

    /// Clockwise rotation (screen coordinates, y down) by `degrees` about `(px, py)`.
    pub fn rotation_about(degrees: f32, px: f32, py: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let rotate = Self {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            e: 0.0,
            f: 0.0,
        };
        Self::translation(px, py)
            .then(rotate)
            .then(Self::translation(-px, -py))
    }

    /// Compose so that `other` is applied first, then `self`.
    pub fn then(self, other: Self) -> Self {
        Self {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    pub fn apply(self, x: f32, y: f32) -> (f32, f32) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }

    /// Uniform scale factor applied to lengths (radii, stroke widths).
    pub fn scale(self) -> f32 {
        (self.a * self.d - self.b * self.c).abs().sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(p: (f32, f32), q: (f32, f32)) -> bool {
        (p.0 - q.0).abs() < 1e-4 && (p.1 - q.1).abs() < 1e-4
    }

    #[test]
    fn test_translation() {
        let t = Affine::translation(3.0, -2.0);
        assert_eq!(t.apply(1.0, 1.0), (4.0, -1.0));
    }

    #[test]
    fn test_rotation_about_point() {
        let r = Affine::rotation_about(90.0, 10.0, 10.0);
        assert!(close(r.apply(10.0, 10.0), (10.0, 10.0)));
        // y grows downwards, so +90 degrees takes +x to +y.
        assert!(close(r.apply(11.0, 10.0), (10.0, 11.0)));
        assert!((r.scale() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_then_applies_right_operand_first() {
        let m = Affine::translation(5.0, 0.0).then(Affine::rotation_about(180.0, 0.0, 0.0));
        assert!(close(m.apply(1.0, 0.0), (4.0, 0.0)));
    }
}
