use std::ops::Mul;

use bytemuck::{Pod, Zeroable};

use super::{BBox, Point};

/// 2x2 matrix in 16.16 fixed point.
///
/// A point is mapped as `x' = (xx*x + xy*y) / SCALE` and
/// `y' = (yx*x + yy*y) / SCALE`. Products are formed in 64 bits before
/// rescaling, so intermediate values may exceed `i32`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct LinearTransformation {
    pub xx: i32,
    pub xy: i32,
    pub yx: i32,
    pub yy: i32,
}

impl LinearTransformation {
    /// Fixed-point representation of 1.0.
    pub const SCALE: i32 = 0x10000;

    pub const IDENTITY: Self = Self::new(Self::SCALE, 0, 0, Self::SCALE);

    pub const fn new(xx: i32, xy: i32, yx: i32, yy: i32) -> Self {
        Self { xx, xy, yx, yy }
    }

    /// Independent scale along each axis, in fixed point.
    pub const fn scale(sx: i32, sy: i32) -> Self {
        Self::new(sx, 0, 0, sy)
    }

    /// Quarter turn from +x towards +y.
    pub const fn rotate_90() -> Self {
        Self::new(0, -Self::SCALE, Self::SCALE, 0)
    }

    /// Matrix product `self * inner`: the result applies `inner` first.
    pub fn compose(&self, inner: &LinearTransformation) -> LinearTransformation {
        LinearTransformation {
            xx: dot(self.xx, inner.xx, self.xy, inner.yx),
            xy: dot(self.xx, inner.xy, self.xy, inner.yy),
            yx: dot(self.yx, inner.xx, self.yy, inner.yx),
            yy: dot(self.yx, inner.xy, self.yy, inner.yy),
        }
    }

    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            dot(self.xx, p.x, self.xy, p.y),
            dot(self.yx, p.x, self.yy, p.y),
        )
    }

    /// Smallest box covering the transformed corners of `b`.
    pub fn apply_box(&self, b: &BBox) -> BBox {
        let corners = [
            self.apply(Point::new(b.xmin, b.ymin)),
            self.apply(Point::new(b.xmax, b.ymin)),
            self.apply(Point::new(b.xmin, b.ymax)),
            self.apply(Point::new(b.xmax, b.ymax)),
        ];
        let (lo, hi) = corners[1..]
            .iter()
            .fold((corners[0], corners[0]), |(lo, hi), &c| (lo.min(c), hi.max(c)));
        BBox::new(lo.x, lo.y, hi.x, hi.y)
    }

    /// Floating-point equivalent for host drawing services.
    pub fn to_mat2(&self) -> glam::Mat2 {
        let s = Self::SCALE as f32;
        glam::Mat2::from_cols(
            glam::Vec2::new(self.xx as f32 / s, self.yx as f32 / s),
            glam::Vec2::new(self.xy as f32 / s, self.yy as f32 / s),
        )
    }
}

impl Default for LinearTransformation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for LinearTransformation {
    type Output = LinearTransformation;

    fn mul(self, rhs: LinearTransformation) -> LinearTransformation {
        self.compose(&rhs)
    }
}

impl Mul<Point> for LinearTransformation {
    type Output = Point;

    fn mul(self, rhs: Point) -> Point {
        self.apply(rhs)
    }
}

fn dot(a0: i32, b0: i32, a1: i32, b1: i32) -> i32 {
    let sum = a0 as i64 * b0 as i64 + a1 as i64 * b1 as i64;
    (sum / LinearTransformation::SCALE as i64) as i32
}
