//! Corbel - a desktop widget toolkit with automatic layout
//!
//! Components declare structural relationships (rows, columns, margins,
//! gaps) instead of coordinates, and corbel computes concrete boxes at run
//! time, again whenever content changes. This crate gathers the toolkit's
//! layers behind one dependency:
//!
//! - **Geometry**: integer points, boxes and transformations ([`core`])
//! - **Graphics contexts**: one drawing interface for screen and print
//!   ([`render`])
//! - **Window-manager boundary**: raw input records, handles, drags and
//!   data transfer ([`wimp`])
//! - **Components**: the tree, layout negotiation and typed events ([`ui`])
//! - **Event loop**: [`Application`] ties them together on one thread
//!
//! # Quick Start
//!
//! ```ignore
//! use corbel::prelude::*;
//!
//! fn main() -> Result<(), UiError> {
//!     corbel::core::logging::init();
//!     let config = Config::from_env();
//!
//!     let mut app = Application::new(HostWindowManager::connect(), HostSurface::new(), config);
//!     let dialogue = SaveDialogue::build(app.tree_mut(), "Save changes?", app.config())?;
//!     app.open_window(WindowHandle(1), dialogue)?;
//!
//!     loop {
//!         app.poll_once()?;
//!     }
//! }
//! ```
//!
//! # Architecture
//!
//! Everything runs on the thread that polls the window manager. Events are
//! delivered synchronously: to the target first, then to its owner or
//! parent until some component handles it. Layout runs at the end of each
//! turn for every tree that changed, resize bottom-up before reformat
//! top-down.

pub mod application;

pub use corbel_core as core;
pub use corbel_render as render;
pub use corbel_ui as ui;
pub use corbel_wimp as wimp;

pub use application::Application;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::application::Application;

    pub use corbel_core::config::{Align, Config, Spread};
    pub use corbel_core::geometry::{BBox, LinearTransformation, Point};

    pub use corbel_render::{
        Color, ContextError, ContextGuard, DrawingService, GraphicsContext, PrintContext,
        ScreenContext,
    };

    pub use corbel_ui::{
        Button, ClickEvent, ClickHandler, Column, Component, ComponentId, ComponentTree, Delivery,
        DiscardEvent, DiscardHandler, Event, HandlerContext, KeyEvent, KeyHandler, Label, Margin,
        Row, SaveDialogue, SaveEvent, SaveHandler, Spacer, UiError, declares,
    };

    pub use corbel_wimp::{
        DataSource, IconHandle, KeyCode, MouseButtons, RawEvent, WindowHandle, WindowManager,
    };
}
