//! Corbel WIMP
//!
//! The boundary between corbel and the host window manager. Nothing in here
//! talks to a real window manager: the host binding implements
//! [`WindowManager`] and feeds opaque [`RawEvent`] records in, and the UI
//! layer translates those into typed events.

pub mod error;
pub mod event;
pub mod handle;
pub mod service;
pub mod transfer;

pub use error::WimpError;
pub use event::{EventBatch, EventQueue, EventStats, KeyCode, MouseButtons, RawEvent};
pub use handle::{IconHandle, WindowHandle};
pub use service::{DragKind, WindowManager};
pub use transfer::{DataSource, VecSource, read_all};
