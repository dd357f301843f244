//! Corbel Render
//!
//! The graphics-context abstraction: one drawing interface whether output
//! goes to a window on screen or to a print job.
//!
//! - [`GraphicsContext`] - activate/deactivate lifecycle plus drawing helpers
//! - [`ContextGuard`] - scope guard that keeps a context active
//! - [`ScreenContext`] / [`PrintContext`] - concrete destinations
//! - [`service`] - the host drawing and print interfaces contexts call into
//! - [`font`] - font metrics and the shared default font

pub mod color;
pub mod context;
pub mod error;
pub mod font;
pub mod print;
pub mod service;

pub use color::Color;
pub use context::{ContextGuard, GraphicsContext, ScreenContext};
pub use error::ContextError;
pub use font::{Font, FontHandle, FontService, default_font, register_font_service, shutdown_fonts};
pub use print::PrintContext;
pub use service::{DrawingService, JobHandle, PrintService, TextFlags};
