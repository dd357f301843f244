use corbel_core::geometry::{BBox, Point};

use crate::handle::{IconHandle, WindowHandle};

use std::collections::VecDeque;

bitflags::bitflags! {
    /// Mouse buttons held during a click.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MouseButtons: u8 {
        const ADJUST = 0b001;
        const MENU   = 0b010;
        const SELECT = 0b100;
    }
}

/// A key as reported by the window manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Return,
    Escape,
    Tab,
    Backspace,
    /// Function key F1-F12.
    Function(u8),
    Char(char),
    /// Any code without a named variant.
    Other(u32),
}

impl KeyCode {
    /// Decode a raw key code.
    pub fn from_raw(code: u32) -> Self {
        match code {
            0x0D => Self::Return,
            0x1B => Self::Escape,
            0x09 => Self::Tab,
            0x08 => Self::Backspace,
            0x181..=0x189 => Self::Function((code - 0x180) as u8),
            0x1CA..=0x1CC => Self::Function((code - 0x1C0) as u8),
            0x20..=0x7E => Self::Char(code as u8 as char),
            other => Self::Other(other),
        }
    }
}

/// An input record from the window manager, before translation.
///
/// Records refer to windows and icons by handle only; resolving them to
/// components is the UI layer's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawEvent {
    /// Part of a window needs repainting. `clip` is in work-area coordinates.
    RedrawRequest { window: WindowHandle, clip: BBox },
    /// The user asked to close a window.
    CloseRequest { window: WindowHandle },
    MouseClick {
        window: WindowHandle,
        icon: IconHandle,
        /// Work-area coordinates.
        position: Point,
        buttons: MouseButtons,
    },
    KeyPressed {
        window: WindowHandle,
        icon: IconHandle,
        key: KeyCode,
    },
    /// The drag box started by the last drag request was released.
    DragBoxCompleted { bbox: BBox },
    /// Nothing happened this poll.
    Null,
}

/// Event queue with batching and redraw coalescing.
///
/// Close requests jump the queue. Redraw requests for the same window are
/// merged into one covering their union, so a burst of exposures costs one
/// repaint.
pub struct EventQueue {
    pending: VecDeque<RawEvent>,
    priority: VecDeque<RawEvent>,
    redraws: Vec<(WindowHandle, BBox)>,
    stats: EventStats,
}

impl EventQueue {
    pub fn new() -> Self {
        Self {
            pending: VecDeque::with_capacity(64),
            priority: VecDeque::with_capacity(8),
            redraws: Vec::new(),
            stats: EventStats::default(),
        }
    }

    pub fn push(&mut self, event: RawEvent) {
        self.stats.events_received += 1;

        match event {
            RawEvent::CloseRequest { .. } => {
                self.priority.push_back(event);
            }
            RawEvent::RedrawRequest { window, clip } => {
                match self.redraws.iter_mut().find(|(w, _)| *w == window) {
                    Some((_, existing)) => *existing |= clip,
                    None => self.redraws.push((window, clip)),
                }
            }
            RawEvent::Null => {}
            _ => {
                self.pending.push_back(event);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty() && self.priority.is_empty() && self.redraws.is_empty()
    }

    /// Take everything queued, priority events first and redraws last.
    pub fn drain(&mut self) -> EventBatch {
        let mut events =
            Vec::with_capacity(self.priority.len() + self.pending.len() + self.redraws.len());

        events.extend(self.priority.drain(..));
        events.extend(self.pending.drain(..));
        events.extend(
            self.redraws
                .drain(..)
                .map(|(window, clip)| RawEvent::RedrawRequest { window, clip }),
        );

        self.stats.events_processed += events.len();
        self.stats.events_coalesced = self.stats.events_received - self.stats.events_processed;

        EventBatch { events }
    }

    pub fn stats(&self) -> &EventStats {
        &self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = EventStats::default();
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

pub struct EventBatch {
    events: Vec<RawEvent>,
}

impl EventBatch {
    pub fn iter(&self) -> impl Iterator<Item = &RawEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[derive(Default, Debug, Clone)]
pub struct EventStats {
    pub events_received: usize,
    pub events_processed: usize,
    /// Events folded into another (merged redraws, dropped nulls).
    pub events_coalesced: usize,
}
