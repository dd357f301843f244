//! Integer geometry used by the layout protocol.
//!
//! All types here are plain values: arithmetic is componentwise, nothing
//! allocates, and no operation can fail. Overflow is not guarded.
//!
//! Coordinates grow rightwards in x and downwards in y. The unit depends on
//! where a value is used (pixels, OS units or millipoints for print jobs).

mod bbox;
mod point;
mod transform;

pub use bbox::BBox;
pub use point::Point;
pub use transform::LinearTransformation;
