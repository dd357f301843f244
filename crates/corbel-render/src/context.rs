use std::ops::{Deref, DerefMut};

use corbel_core::geometry::{BBox, LinearTransformation, Point};

use crate::color::Color;
use crate::error::ContextError;
use crate::font::Font;
use crate::service::{DrawingService, TextFlags};

/// A drawing destination with an activate/deactivate lifecycle.
///
/// Drawing calls are only valid between [`activate`](Self::activate) and
/// [`deactivate`](Self::deactivate). Code should not pair those calls by
/// hand; [`ContextGuard`] guarantees deactivation on every exit path.
///
/// Implementations compose: a specialised context wraps a base context,
/// activates it first and layers its own device setup on top (see
/// [`PrintContext`](crate::print::PrintContext)).
///
/// Coordinates passed to the drawing helpers are component coordinates.
/// They are mapped through [`transformation`](Self::transformation) and then
/// offset by [`origin`](Self::origin) before reaching the device.
pub trait GraphicsContext {
    /// Start a drawing span. On failure the caller must still call
    /// [`deactivate`](Self::deactivate), which undoes any partial setup.
    fn activate(&mut self) -> Result<(), ContextError>;

    /// End the drawing span. Calling it while inactive is a no-op.
    fn deactivate(&mut self);

    fn is_active(&self) -> bool;

    /// Device position of the component coordinate origin.
    fn origin(&self) -> Point;

    /// Region of component space that drawing may touch.
    fn clip(&self) -> BBox;

    fn transformation(&self) -> LinearTransformation {
        LinearTransformation::IDENTITY
    }

    /// The service that receives device-space primitives.
    fn surface(&mut self) -> &mut dyn DrawingService;

    /// Activate and return a guard that deactivates on drop.
    fn begin(&mut self) -> Result<ContextGuard<'_, Self>, ContextError>
    where
        Self: Sized,
    {
        ContextGuard::new(self)
    }

    /// Map a component-space box to device space.
    fn to_device(&self, bbox: BBox) -> BBox {
        self.transformation().apply_box(&bbox) + self.origin()
    }

    fn fill(&mut self, bbox: BBox, color: Color) -> Result<(), ContextError> {
        if !self.is_active() {
            return Err(ContextError::NotActive);
        }
        let device = self.to_device(bbox);
        self.surface().fill_rect(device, color);
        Ok(())
    }

    fn outline(&mut self, bbox: BBox, color: Color) -> Result<(), ContextError> {
        if !self.is_active() {
            return Err(ContextError::NotActive);
        }
        let device = self.to_device(bbox);
        self.surface().outline_rect(device, color);
        Ok(())
    }

    /// Paint one line of text inside `bbox`, placed according to `flags`.
    fn text(
        &mut self,
        bbox: BBox,
        text: &str,
        font: &Font,
        color: Color,
        flags: TextFlags,
    ) -> Result<(), ContextError> {
        if !self.is_active() {
            return Err(ContextError::NotActive);
        }
        let width = font.string_width(text);
        let height = font.line_height();

        let x = if flags.contains(TextFlags::CENTRE_X) {
            bbox.xmin + (bbox.xsize() - width) / 2
        } else if flags.contains(TextFlags::RIGHT) {
            bbox.xmax - width
        } else {
            bbox.xmin
        };
        let y = if flags.contains(TextFlags::CENTRE_Y) {
            bbox.ymin + (bbox.ysize() - height) / 2
        } else {
            bbox.ymin
        };

        let at = self.transformation().apply(Point::new(x, y)) + self.origin();
        self.surface().paint_text(at, text, font.handle(), color);
        Ok(())
    }
}

/// Keeps a context active for its lifetime.
///
/// Construction activates the context. If activation fails the context is
/// deactivated before the error is returned, so a failed device setup never
/// leaves it half-active. Dropping the guard, including during unwinding or
/// an early `?` return, deactivates it.
pub struct ContextGuard<'a, C: GraphicsContext + ?Sized> {
    context: &'a mut C,
}

impl<'a, C: GraphicsContext + ?Sized> ContextGuard<'a, C> {
    pub fn new(context: &'a mut C) -> Result<Self, ContextError> {
        if let Err(e) = context.activate() {
            tracing::warn!("context activation failed: {}", e);
            context.deactivate();
            return Err(e);
        }
        Ok(Self { context })
    }

    /// Deactivate now rather than at end of scope.
    pub fn finish(self) {
        drop(self);
    }
}

impl<C: GraphicsContext + ?Sized> Deref for ContextGuard<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        self.context
    }
}

impl<C: GraphicsContext + ?Sized> DerefMut for ContextGuard<'_, C> {
    fn deref_mut(&mut self) -> &mut C {
        self.context
    }
}

impl<C: GraphicsContext + ?Sized> Drop for ContextGuard<'_, C> {
    fn drop(&mut self) {
        self.context.deactivate();
    }
}

/// Where a context is in its lifecycle.
///
/// `Activating` covers a span whose setup has started but not completed, so
/// that deactivation knows partial setup needs undoing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
    Idle,
    Activating,
    Active,
}

/// Context that draws into a visible window through a [`DrawingService`].
pub struct ScreenContext<S: DrawingService> {
    surface: S,
    origin: Point,
    clip: BBox,
    phase: Phase,
}

impl<S: DrawingService> ScreenContext<S> {
    pub fn new(surface: S, origin: Point, clip: BBox) -> Self {
        Self {
            surface,
            origin,
            clip,
            phase: Phase::Idle,
        }
    }

    /// Move the component origin, e.g. after the window scrolled.
    pub fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    /// Set the clip for the next span. Takes effect on activation.
    pub fn set_clip(&mut self, clip: BBox) {
        self.clip = clip;
    }

    pub fn surface_ref(&self) -> &S {
        &self.surface
    }
}

impl<S: DrawingService> GraphicsContext for ScreenContext<S> {
    fn activate(&mut self) -> Result<(), ContextError> {
        if self.phase == Phase::Active {
            tracing::warn!("screen context activated twice");
            return Ok(());
        }
        self.phase = Phase::Activating;
        self.surface.begin()?;
        let device_clip = self.to_device(self.clip);
        self.surface.set_clip(device_clip);
        self.phase = Phase::Active;
        Ok(())
    }

    fn deactivate(&mut self) {
        if self.phase == Phase::Idle {
            return;
        }
        self.phase = Phase::Idle;
        self.surface.end();
    }

    fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }

    fn origin(&self) -> Point {
        self.origin
    }

    fn clip(&self) -> BBox {
        self.clip
    }

    fn surface(&mut self) -> &mut dyn DrawingService {
        &mut self.surface
    }
}

impl<S: DrawingService> Drop for ScreenContext<S> {
    fn drop(&mut self) {
        if self.phase != Phase::Idle {
            tracing::warn!("screen context dropped while active");
            self.deactivate();
        }
    }
}
