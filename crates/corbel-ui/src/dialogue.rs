//! The discard/cancel/save dialogue.
//!
//! ```text
//! SaveDialogue
//! └── Margin
//!     └── Column
//!         ├── Label (message)
//!         └── Row
//!             ├── Button "Discard"
//!             ├── Button "Cancel"
//!             └── Button "Save"
//! ```
//!
//! The dialogue only reports what the user chose. Save and discard are
//! posted as events and routed to the dialogue's owner or parent, which
//! makes the actual decision. Cancel removes the dialogue: it detaches from
//! its parent and destroys its own subtree, so ids of the dialogue and its
//! buttons are stale afterwards.

use corbel_core::config::Config;
use corbel_core::geometry::{BBox, Point};
use corbel_render::{Color, ContextError, GraphicsContext};
use corbel_wimp::KeyCode;

use crate::capability::Capabilities;
use crate::component::{Component, ComponentId, Layout, Placement};
use crate::declares;
use crate::error::UiError;
use crate::event::{
    ClickEvent, ClickHandler, DiscardEvent, Event, HandlerContext, KeyEvent, KeyHandler,
    SaveEvent,
};
use crate::layout::{Column, Margin, Row};
use crate::tree::ComponentTree;
use crate::widgets::{Button, Label};

/// What the user picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Discard,
    Cancel,
    Save,
}

/// Asks whether to save changes before they are lost.
#[derive(Debug)]
pub struct SaveDialogue {
    discard: ComponentId,
    cancel: ComponentId,
    save: ComponentId,
    choice: Option<Choice>,
}

impl SaveDialogue {
    /// Build the dialogue and its contents in `tree`, returning the
    /// dialogue's id. The dialogue starts detached.
    pub fn build(
        tree: &mut ComponentTree,
        message: &str,
        config: &Config,
    ) -> Result<ComponentId, UiError> {
        let buttons = [Button::new("Discard"), Button::new("Cancel"), Button::new("Save")];
        let widest = buttons
            .iter()
            .map(|button| button.resize(&[]).xsize())
            .max()
            .unwrap_or_default();
        let [discard, cancel, save] = buttons.map(|button| tree.insert(button));

        let row = tree.insert(Row::with_config(config));
        for button in [discard, cancel, save] {
            tree.set_min_size(button, Point::new(widest, 0))?;
            tree.add(row, button)?;
        }

        let column = tree.insert(Column::with_config(config));
        let label = tree.insert(Label::new(message));
        tree.add(column, label)?;
        tree.add(column, row)?;

        let margin = tree.insert(Margin::with_config(config));
        tree.add(margin, column)?;

        let dialogue = tree.insert(SaveDialogue {
            discard,
            cancel,
            save,
            choice: None,
        });
        tree.add(dialogue, margin)?;
        tracing::debug!("built save dialogue {:?}", dialogue);
        Ok(dialogue)
    }

    pub fn discard_button(&self) -> ComponentId {
        self.discard
    }

    pub fn cancel_button(&self) -> ComponentId {
        self.cancel
    }

    pub fn save_button(&self) -> ComponentId {
        self.save
    }

    /// The most recent choice, if any.
    pub fn choice(&self) -> Option<Choice> {
        self.choice
    }

    fn choose(&mut self, cx: &mut HandlerContext<'_>, choice: Choice) {
        self.choice = Some(choice);
        let this = cx.this();
        tracing::debug!("{:?} chose {:?}", this, choice);
        let delivery = match choice {
            Choice::Save => cx.post(&SaveEvent::new(this)),
            Choice::Discard => cx.post(&DiscardEvent::new(this)),
            Choice::Cancel => {
                if !cx.detach() {
                    tracing::debug!("cancelled dialogue {:?} had no parent", this);
                }
                if let Err(e) = cx.tree().destroy(this) {
                    tracing::warn!("cancelled dialogue {:?} not destroyed: {}", this, e);
                }
                return;
            }
        };
        if !delivery.is_delivered() {
            tracing::warn!("nobody handled {:?} from dialogue {:?}", choice, this);
        }
    }
}

impl ClickHandler for SaveDialogue {
    fn click(&mut self, cx: &mut HandlerContext<'_>, event: &ClickEvent) {
        let target = event.target();
        let choice = if target == self.save {
            Choice::Save
        } else if target == self.cancel {
            Choice::Cancel
        } else if target == self.discard {
            Choice::Discard
        } else {
            return;
        };
        self.choose(cx, choice);
    }
}

impl KeyHandler for SaveDialogue {
    fn key_pressed(&mut self, cx: &mut HandlerContext<'_>, event: &KeyEvent) {
        match event.key() {
            KeyCode::Return => self.choose(cx, Choice::Save),
            KeyCode::Escape => self.choose(cx, Choice::Cancel),
            _ => {}
        }
    }
}

declares!(SaveDialogue: ClickHandler, KeyHandler);

impl Component for SaveDialogue {
    fn name(&self) -> &str {
        "save dialogue"
    }

    fn resize(&self, children: &[BBox]) -> BBox {
        children
            .iter()
            .fold(BBox::default(), |acc, child| acc | BBox::from_size(child.size()))
    }

    fn reformat(&self, border: BBox, children: &[BBox]) -> Placement {
        Placement {
            content: border,
            children: children.iter().map(|_| border).collect(),
        }
    }

    fn redraw(
        &self,
        ctx: &mut dyn GraphicsContext,
        layout: &Layout,
        _clip: BBox,
    ) -> Result<(), ContextError> {
        ctx.fill(layout.border, Color::WHITE)?;
        ctx.outline(layout.border, Color::BLACK)
    }

    fn declare(caps: &mut Capabilities) {
        caps.declare::<Self, dyn ClickHandler>();
        caps.declare::<Self, dyn KeyHandler>();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buttons_share_the_widest_width() {
        let mut tree = ComponentTree::new();
        let dialogue = SaveDialogue::build(&mut tree, "Save changes?", &Config::default()).unwrap();
        tree.resize(dialogue).unwrap();

        let d = tree.get::<SaveDialogue>(dialogue).unwrap();
        let buttons = [d.discard_button(), d.cancel_button(), d.save_button()];
        let widths: Vec<i32> = buttons
            .iter()
            .map(|b| tree.min_box(*b).unwrap().xsize())
            .collect();
        assert!(widths.iter().all(|w| *w == widths[0]));
        assert_eq!(
            widths[0],
            Button::new("Discard").resize(&[]).xsize(),
            "the longest label sets the width"
        );
    }

    #[test]
    fn test_dialogue_declares_click_and_key() {
        let mut tree = ComponentTree::new();
        let dialogue = SaveDialogue::build(&mut tree, "?", &Config::default()).unwrap();
        assert!(tree.declares::<dyn ClickHandler>(dialogue));
        assert!(tree.declares::<dyn KeyHandler>(dialogue));
    }

    #[test]
    fn test_minimum_includes_margin() {
        let config = Config::default();
        let mut tree = ComponentTree::new();
        let dialogue = SaveDialogue::build(&mut tree, "Save changes?", &config).unwrap();
        let outer = tree.resize(dialogue).unwrap();

        let margin = tree.children(dialogue)[0];
        let column = tree.children(margin)[0];
        let inner = tree.min_box(column).unwrap();
        let inset = config.margin;
        assert_eq!(outer.xsize(), inner.xsize() + inset.xmax - inset.xmin);
        assert_eq!(outer.ysize(), inner.ysize() + inset.ymax - inset.ymin);
    }
}
