//! Test utilities for corbel.
//!
//! Mock implementations of the host services corbel calls into, so layout,
//! drawing and event handling can be tested without a window manager.
//!
//! - [`MockSurface`] - records drawing primitives
//! - [`MockSpooler`] - print spooler with injectable failures and mismatches
//! - [`MockFontService`] - fixed-pitch font metrics
//! - [`MockWindowManager`] - plays back scripted raw events
//!
//! # Example
//!
//! ```rust
//! use corbel_core::geometry::{BBox, Point};
//! use corbel_render::{Color, GraphicsContext, ScreenContext};
//! use corbel_test_utils::{DrawCall, MockSurface};
//!
//! let surface = MockSurface::new();
//! let mut ctx = ScreenContext::new(surface.clone(), Point::ZERO, BBox::new(0, 0, 10, 10));
//! {
//!     let mut active = ctx.begin().unwrap();
//!     active.fill(BBox::new(0, 0, 5, 5), Color::WHITE).unwrap();
//! }
//! assert_eq!(surface.count_ends(), 1);
//! assert!(matches!(surface.calls()[0], DrawCall::Begin));
//! ```
//!
//! # Interior Mutability
//!
//! Mocks keep their recordings behind `Arc<parking_lot::Mutex<_>>`. Clones
//! share the recording, so a test can move one clone into the code under
//! test and assert on another.

pub mod mock_render;
pub mod mock_wimp;

pub use mock_render::*;
pub use mock_wimp::*;
