use std::ops::{Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, Sub, SubAssign};

use bytemuck::{Pod, Zeroable};

use super::Point;

/// An axis-aligned rectangle.
///
/// `xmin`/`ymin` are inclusive and `xmax`/`ymax` exclusive. A box whose
/// maximum is at or below its minimum on either axis is empty. Empty and
/// inverted boxes are valid values: every operation accepts them, and callers
/// that care must test [`BBox::is_empty`] themselves.
///
/// Adding or subtracting a [`Point`] translates the box. Adding or
/// subtracting another `BBox` adjusts each edge by the matching component of
/// the other box, which is how margins are applied and removed:
///
/// ```
/// use corbel_core::geometry::BBox;
///
/// let content = BBox::new(10, 10, 50, 30);
/// let margin = BBox::new(-4, -2, 4, 2);
/// assert_eq!(content + margin, BBox::new(6, 8, 54, 32));
/// assert_eq!(content + margin - margin, content);
/// ```
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct BBox {
    pub xmin: i32,
    pub ymin: i32,
    pub xmax: i32,
    pub ymax: i32,
}

// Host services receive a box as two corner points.
static_assertions::assert_eq_size!(BBox, [Point; 2]);

impl BBox {
    pub const fn new(xmin: i32, ymin: i32, xmax: i32, ymax: i32) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }

    /// Box with its minimum corner at the origin and the given size.
    pub const fn from_size(size: Point) -> Self {
        Self::new(0, 0, size.x, size.y)
    }

    /// Box spanning `origin` to `origin + size`.
    pub const fn from_origin_size(origin: Point, size: Point) -> Self {
        Self::new(origin.x, origin.y, origin.x + size.x, origin.y + size.y)
    }

    pub const fn xsize(&self) -> i32 {
        self.xmax - self.xmin
    }

    pub const fn ysize(&self) -> i32 {
        self.ymax - self.ymin
    }

    pub const fn size(&self) -> Point {
        Point::new(self.xsize(), self.ysize())
    }

    /// Minimum corner.
    pub const fn origin(&self) -> Point {
        Point::new(self.xmin, self.ymin)
    }

    /// True when the box covers no point.
    pub const fn is_empty(&self) -> bool {
        self.xmax <= self.xmin || self.ymax <= self.ymin
    }

    /// Half-open containment test.
    pub const fn contains(&self, p: Point) -> bool {
        p.x >= self.xmin && p.x < self.xmax && p.y >= self.ymin && p.y < self.ymax
    }

    /// True when the intersection with `other` is non-empty.
    pub fn intersects(&self, other: &BBox) -> bool {
        !(*self & *other).is_empty()
    }

    /// Attach `b` to the left edge: `xmin` moves left by the width of `b`
    /// and the vertical extent grows to at least the height of `b`.
    pub fn extend_left(&mut self, b: &BBox) -> &mut Self {
        self.xmin -= b.xsize();
        self.cover_ysize(b.ysize());
        self
    }

    /// Attach `b` to the right edge.
    pub fn extend_right(&mut self, b: &BBox) -> &mut Self {
        self.xmax += b.xsize();
        self.cover_ysize(b.ysize());
        self
    }

    /// Attach `b` above the top edge (towards smaller y).
    pub fn extend_up(&mut self, b: &BBox) -> &mut Self {
        self.ymin -= b.ysize();
        self.cover_xsize(b.xsize());
        self
    }

    /// Attach `b` below the bottom edge (towards larger y).
    pub fn extend_down(&mut self, b: &BBox) -> &mut Self {
        self.ymax += b.ysize();
        self.cover_xsize(b.xsize());
        self
    }

    fn cover_xsize(&mut self, xsize: i32) {
        if self.xsize() < xsize {
            self.xmax = self.xmin + xsize;
        }
    }

    fn cover_ysize(&mut self, ysize: i32) {
        if self.ysize() < ysize {
            self.ymax = self.ymin + ysize;
        }
    }
}

impl Add<Point> for BBox {
    type Output = BBox;

    fn add(mut self, rhs: Point) -> BBox {
        self += rhs;
        self
    }
}

impl AddAssign<Point> for BBox {
    fn add_assign(&mut self, rhs: Point) {
        self.xmin += rhs.x;
        self.ymin += rhs.y;
        self.xmax += rhs.x;
        self.ymax += rhs.y;
    }
}

impl Sub<Point> for BBox {
    type Output = BBox;

    fn sub(mut self, rhs: Point) -> BBox {
        self -= rhs;
        self
    }
}

impl SubAssign<Point> for BBox {
    fn sub_assign(&mut self, rhs: Point) {
        self.xmin -= rhs.x;
        self.ymin -= rhs.y;
        self.xmax -= rhs.x;
        self.ymax -= rhs.y;
    }
}

impl Add for BBox {
    type Output = BBox;

    fn add(mut self, rhs: BBox) -> BBox {
        self += rhs;
        self
    }
}

impl AddAssign for BBox {
    fn add_assign(&mut self, rhs: BBox) {
        self.xmin += rhs.xmin;
        self.ymin += rhs.ymin;
        self.xmax += rhs.xmax;
        self.ymax += rhs.ymax;
    }
}

impl Sub for BBox {
    type Output = BBox;

    fn sub(mut self, rhs: BBox) -> BBox {
        self -= rhs;
        self
    }
}

impl SubAssign for BBox {
    fn sub_assign(&mut self, rhs: BBox) {
        self.xmin -= rhs.xmin;
        self.ymin -= rhs.ymin;
        self.xmax -= rhs.xmax;
        self.ymax -= rhs.ymax;
    }
}

/// Union. An empty operand contributes nothing, so `BBox::default() | b == b`.
impl BitOrAssign for BBox {
    fn bitor_assign(&mut self, rhs: BBox) {
        if self.is_empty() {
            *self = rhs;
        } else if !rhs.is_empty() {
            self.xmin = self.xmin.min(rhs.xmin);
            self.ymin = self.ymin.min(rhs.ymin);
            self.xmax = self.xmax.max(rhs.xmax);
            self.ymax = self.ymax.max(rhs.ymax);
        }
    }
}

impl BitOr for BBox {
    type Output = BBox;

    fn bitor(mut self, rhs: BBox) -> BBox {
        self |= rhs;
        self
    }
}

/// Intersection. Never fails; disjoint inputs give an empty (possibly
/// inverted) box.
impl BitAndAssign for BBox {
    fn bitand_assign(&mut self, rhs: BBox) {
        self.xmin = self.xmin.max(rhs.xmin);
        self.ymin = self.ymin.max(rhs.ymin);
        self.xmax = self.xmax.min(rhs.xmax);
        self.ymax = self.ymax.min(rhs.ymax);
    }
}

impl BitAnd for BBox {
    type Output = BBox;

    fn bitand(mut self, rhs: BBox) -> BBox {
        self &= rhs;
        self
    }
}
