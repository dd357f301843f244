//! Fonts and the process-wide default font.
//!
//! Font metrics come from a host [`FontService`]. The toolkit keeps one lazily
//! created default font per thread of execution; the event loop is single
//! threaded, so in practice that is one per process. The default is built on
//! first use and released by [`shutdown_fonts`], which the application calls
//! when it tears down.

use std::cell::RefCell;
use std::rc::Rc;

use corbel_core::geometry::Point;

use crate::error::ContextError;

/// Font identifier issued by the font service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontHandle(pub u32);

/// Host font manager.
pub trait FontService {
    /// Claim a font by name at the given size in sixteenths of a point.
    fn find_font(&mut self, name: &str, size: Point) -> Result<FontHandle, ContextError>;

    fn lose_font(&mut self, font: FontHandle);

    /// Width of `text` in OS units.
    fn string_width(&self, font: FontHandle, text: &str) -> i32;

    /// Line height in OS units.
    fn line_height(&self, font: FontHandle) -> i32;
}

/// Name requested for the default font.
pub const DEFAULT_FONT_NAME: &str = "Homerton.Medium";
/// Requested size, 12pt in sixteenths.
pub const DEFAULT_FONT_SIZE: Point = Point::new(12 * 16, 12 * 16);

/// Metrics used when no font service is registered.
const FALLBACK_CHAR_WIDTH: i32 = 16;
const FALLBACK_LINE_HEIGHT: i32 = 32;
const FALLBACK_HANDLE: FontHandle = FontHandle(0);

/// A claimed font.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Font {
    handle: FontHandle,
    name: String,
    size: Point,
    fallback: bool,
}

impl Font {
    pub fn handle(&self) -> FontHandle {
        self.handle
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> Point {
        self.size
    }

    /// True for the built-in fixed-pitch metrics used without a service.
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    pub fn string_width(&self, text: &str) -> i32 {
        if self.fallback {
            return text.chars().count() as i32 * FALLBACK_CHAR_WIDTH;
        }
        with_registry(|reg| match &reg.service {
            Some(service) => service.string_width(self.handle, text),
            None => text.chars().count() as i32 * FALLBACK_CHAR_WIDTH,
        })
    }

    pub fn line_height(&self) -> i32 {
        if self.fallback {
            return FALLBACK_LINE_HEIGHT;
        }
        with_registry(|reg| match &reg.service {
            Some(service) => service.line_height(self.handle),
            None => FALLBACK_LINE_HEIGHT,
        })
    }

    /// Size of a single line of `text`.
    pub fn measure(&self, text: &str) -> Point {
        Point::new(self.string_width(text), self.line_height())
    }

    fn fallback() -> Self {
        Self {
            handle: FALLBACK_HANDLE,
            name: "System.Fixed".to_string(),
            size: DEFAULT_FONT_SIZE,
            fallback: true,
        }
    }
}

#[derive(Default)]
struct FontRegistry {
    service: Option<Box<dyn FontService>>,
    default: Option<Rc<Font>>,
}

thread_local! {
    static FONTS: RefCell<FontRegistry> = RefCell::new(FontRegistry::default());
}

fn with_registry<R>(f: impl FnOnce(&mut FontRegistry) -> R) -> R {
    FONTS.with(|fonts| f(&mut fonts.borrow_mut()))
}

/// Install the font service. Any existing default font is released first so
/// the next [`default_font`] call claims it from the new service.
pub fn register_font_service(service: Box<dyn FontService>) {
    shutdown_fonts();
    with_registry(|reg| reg.service = Some(service));
    tracing::debug!("font service registered");
}

/// The shared default font, created on first use.
///
/// Falls back to fixed-pitch metrics when no service is registered or the
/// service cannot supply the font.
pub fn default_font() -> Rc<Font> {
    if let Some(font) = with_registry(|reg| reg.default.clone()) {
        return font;
    }

    let font = with_registry(|reg| match reg.service.as_mut() {
        Some(service) => match service.find_font(DEFAULT_FONT_NAME, DEFAULT_FONT_SIZE) {
            Ok(handle) => Font {
                handle,
                name: DEFAULT_FONT_NAME.to_string(),
                size: DEFAULT_FONT_SIZE,
                fallback: false,
            },
            Err(e) => {
                tracing::warn!("default font unavailable ({}), using fixed-pitch metrics", e);
                Font::fallback()
            }
        },
        None => Font::fallback(),
    });

    let font = Rc::new(font);
    with_registry(|reg| reg.default = Some(font.clone()));
    font
}

/// Release the default font and drop the font service.
///
/// Fonts handed out earlier keep working with fixed-pitch metrics once the
/// service is gone. Safe to call repeatedly.
pub fn shutdown_fonts() {
    with_registry(|reg| {
        if let Some(font) = reg.default.take() {
            if let (false, Some(service)) = (font.fallback, reg.service.as_mut()) {
                service.lose_font(font.handle);
            }
        }
        reg.service = None;
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_metrics_without_service() {
        shutdown_fonts();
        let font = default_font();
        assert!(font.is_fallback());
        assert_eq!(font.string_width("Save"), 4 * FALLBACK_CHAR_WIDTH);
        assert_eq!(font.measure("ab"), Point::new(32, FALLBACK_LINE_HEIGHT));
    }

    #[test]
    fn test_default_font_is_shared_until_shutdown() {
        shutdown_fonts();
        let a = default_font();
        let b = default_font();
        assert!(Rc::ptr_eq(&a, &b));

        shutdown_fonts();
        let c = default_font();
        assert!(!Rc::ptr_eq(&a, &c));
    }
}
