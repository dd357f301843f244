//! Corbel UI - component tree, layout negotiation and typed events
//!
//! Components declare structure (rows, columns, margins, gaps) rather than
//! coordinates; the tree works out concrete boxes in two passes:
//! - **resize** runs bottom-up and computes each component's minimum box
//! - **reformat** runs top-down and hands each child its border box
//!
//! Events are typed objects. A component receives an event kind only if it
//! declares the matching handler capability; undelivered events are
//! forwarded to the target's owner or parent.
//!
//! ## Quick Start
//!
//! ```rust
//! use corbel_core::config::Config;
//! use corbel_ui::{ComponentTree, SaveDialogue};
//!
//! let mut tree = ComponentTree::new();
//! let dialogue = SaveDialogue::build(&mut tree, "Save changes?", &Config::default()).unwrap();
//!
//! let laid_out = tree.flush_layout();
//! assert_eq!(laid_out, vec![dialogue]);
//! assert!(tree.border_box(dialogue).is_some());
//! ```

pub mod capability;
pub mod component;
pub mod dialogue;
pub mod drag;
pub mod error;
pub mod event;
pub mod host;
pub mod layout;
pub mod metrics;
pub mod tree;
pub mod widgets;

pub use capability::{Capabilities, Declares};
pub use component::{Component, ComponentId, Layout, LayoutState, Placement};
pub use dialogue::{Choice, SaveDialogue};
pub use drag::DragTracker;
pub use error::UiError;
pub use event::{
    ClickEvent, ClickHandler, Delivery, DiscardEvent, DiscardHandler, DragCompletedEvent,
    DragHandler, Event, HandlerContext, KeyEvent, KeyHandler, SaveEvent, SaveHandler,
};
pub use host::{HandleIndex, Translated, translate};
pub use layout::{Axis, Column, Margin, Row};
pub use metrics::LayoutMetrics;
pub use tree::ComponentTree;
pub use widgets::{Button, Label, Spacer};
