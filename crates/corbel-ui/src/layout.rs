//! Layout containers: rows, columns and margins.
//!
//! Rows and columns share one placement routine that works in main/cross
//! axis terms; [`Axis`] maps those back to x and y.

use corbel_core::config::{Align, Config, Spread};
use corbel_core::geometry::{BBox, Point};

use crate::component::{Component, Placement};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    fn main(self, p: Point) -> i32 {
        match self {
            Self::Horizontal => p.x,
            Self::Vertical => p.y,
        }
    }

    fn cross(self, p: Point) -> i32 {
        match self {
            Self::Horizontal => p.y,
            Self::Vertical => p.x,
        }
    }

    fn point(self, main: i32, cross: i32) -> Point {
        match self {
            Self::Horizontal => Point::new(main, cross),
            Self::Vertical => Point::new(cross, main),
        }
    }

    /// Fold `b` onto the far end of `acc` along this axis.
    fn extend(self, acc: &mut BBox, b: &BBox) {
        match self {
            Self::Horizontal => acc.extend_right(b),
            Self::Vertical => acc.extend_down(b),
        };
    }
}

/// Minimum box of children laid end to end with `gap` between them.
fn linear_min(axis: Axis, gap: i32, children: &[BBox]) -> BBox {
    let spacer = BBox::from_size(axis.point(gap, 0));
    let mut min = BBox::default();
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            axis.extend(&mut min, &spacer);
        }
        axis.extend(&mut min, child);
    }
    min
}

/// Share `extra` among `slots`, giving the remainder to the first slots.
fn share(extra: i32, slots: usize, index: usize) -> i32 {
    if slots == 0 {
        return 0;
    }
    let slots = slots as i32;
    let index = index as i32;
    extra / slots + i32::from(index < extra % slots)
}

fn linear_place(
    axis: Axis,
    gap: i32,
    spread: Spread,
    align: Align,
    border: BBox,
    children: &[BBox],
) -> Vec<BBox> {
    let n = children.len();
    let used = axis.main(linear_min(axis, gap, children).size());
    let extra = (axis.main(border.size()) - used).max(0);
    let cross_size = axis.cross(border.size());
    let origin = border.origin();

    let mut main = axis.main(origin);
    let mut placed = Vec::with_capacity(n);
    for (i, child) in children.iter().enumerate() {
        let child_size = child.size();
        let mut length = axis.main(child_size);
        if spread == Spread::Even {
            length += share(extra, n, i);
        }

        let natural = axis.cross(child_size);
        let (offset, breadth) = match align {
            Align::Start => (0, natural),
            Align::Centre => ((cross_size - natural) / 2, natural),
            Align::End => (cross_size - natural, natural),
            Align::Fill => (0, cross_size.max(natural)),
        };

        let at = axis.point(main, axis.cross(origin) + offset);
        placed.push(BBox::from_origin_size(at, axis.point(length, breadth)));

        main += length + gap;
        if spread == Spread::Between && n > 1 && i + 1 < n {
            main += share(extra, n - 1, i);
        }
    }
    placed
}

/// Children side by side, left to right.
///
/// The minimum width is the sum of the children's minimum widths plus the
/// gaps; the minimum height is the tallest child's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    gap: i32,
    spread: Spread,
    align: Align,
}

impl Row {
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    pub fn with_config(config: &Config) -> Self {
        Self {
            gap: config.gap,
            spread: config.spread,
            align: config.align,
        }
    }

    pub fn gap(mut self, gap: i32) -> Self {
        self.gap = gap;
        self
    }

    pub fn spread(mut self, spread: Spread) -> Self {
        self.spread = spread;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }
}

impl Default for Row {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for Row {
    fn name(&self) -> &str {
        "row"
    }

    fn resize(&self, children: &[BBox]) -> BBox {
        linear_min(Axis::Horizontal, self.gap, children)
    }

    fn reformat(&self, border: BBox, children: &[BBox]) -> Placement {
        Placement {
            content: border,
            children: linear_place(
                Axis::Horizontal,
                self.gap,
                self.spread,
                self.align,
                border,
                children,
            ),
        }
    }
}

/// Children stacked top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    gap: i32,
    spread: Spread,
    align: Align,
}

impl Column {
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    pub fn with_config(config: &Config) -> Self {
        Self {
            gap: config.gap,
            spread: config.spread,
            align: config.align,
        }
    }

    pub fn gap(mut self, gap: i32) -> Self {
        self.gap = gap;
        self
    }

    pub fn spread(mut self, spread: Spread) -> Self {
        self.spread = spread;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }
}

impl Default for Column {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for Column {
    fn name(&self) -> &str {
        "column"
    }

    fn resize(&self, children: &[BBox]) -> BBox {
        linear_min(Axis::Vertical, self.gap, children)
    }

    fn reformat(&self, border: BBox, children: &[BBox]) -> Placement {
        Placement {
            content: border,
            children: linear_place(
                Axis::Vertical,
                self.gap,
                self.spread,
                self.align,
                border,
                children,
            ),
        }
    }
}

/// A border around a single child.
///
/// The inset is a box of per-edge deltas added to the child's box: `xmin`
/// and `ymin` are usually negative, `xmax` and `ymax` positive. Edges are
/// independent, so an inset can be asymmetric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Margin {
    inset: BBox,
}

impl Margin {
    pub fn new(inset: BBox) -> Self {
        Self { inset }
    }

    /// The same margin on every edge.
    pub fn uniform(width: i32) -> Self {
        Self::new(BBox::new(-width, -width, width, width))
    }

    pub fn with_config(config: &Config) -> Self {
        Self::new(config.margin)
    }

    pub fn inset(&self) -> BBox {
        self.inset
    }
}

impl Component for Margin {
    fn name(&self) -> &str {
        "margin"
    }

    fn resize(&self, children: &[BBox]) -> BBox {
        debug_assert!(children.len() <= 1, "a margin holds one child");
        let inner = children.first().copied().unwrap_or_default();
        BBox::from_size(inner.size()) + self.inset
    }

    fn reformat(&self, border: BBox, children: &[BBox]) -> Placement {
        let inner = border - self.inset;
        Placement {
            content: inner,
            children: children.iter().map(|_| inner).collect(),
        }
    }
}
