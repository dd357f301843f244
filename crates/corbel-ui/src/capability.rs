//! Handler capabilities.
//!
//! A component opts into receiving an event kind by implementing that
//! event's handler trait and declaring it. Declaration records a caster
//! keyed by the handler trait's `TypeId`; delivery looks the caster up and
//! performs a checked downcast to the concrete component type before
//! viewing it through the handler trait. Nothing is ever cast blindly, and
//! adding an event kind never touches components that do not care about it.
//!
//! ```rust,ignore
//! impl ClickHandler for Canvas { /* ... */ }
//! declares!(Canvas: ClickHandler);
//!
//! impl Component for Canvas {
//!     fn declare(caps: &mut Capabilities) {
//!         caps.declare::<Self, dyn ClickHandler>();
//!     }
//!     // ...
//! }
//! ```

use std::any::{Any, TypeId};

use corbel_core::alloc::HashMap;

use crate::component::Component;

/// View of a component through handler trait `H`.
///
/// Implemented with the [`declares!`](crate::declares) macro.
pub trait Declares<H: ?Sized + 'static> {
    fn as_handler(&mut self) -> &mut H;
}

type Caster<H> = fn(&mut dyn Any) -> Option<&mut H>;

fn cast_to<C, H>(any: &mut dyn Any) -> Option<&mut H>
where
    C: Declares<H> + 'static,
    H: ?Sized + 'static,
{
    any.downcast_mut::<C>().map(<C as Declares<H>>::as_handler)
}

/// The handler capabilities one component has declared.
#[derive(Default)]
pub struct Capabilities {
    casters: HashMap<TypeId, Box<dyn Any>>,
}

impl Capabilities {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capabilities declared by component type `C`.
    pub fn of<C: Component>() -> Self {
        let mut caps = Self::new();
        C::declare(&mut caps);
        caps
    }

    /// Declare that component type `C` handles through trait `H`.
    pub fn declare<C, H>(&mut self)
    where
        C: Component + Declares<H>,
        H: ?Sized + 'static,
    {
        let caster: Caster<H> = cast_to::<C, H>;
        self.casters.insert(TypeId::of::<H>(), Box::new(caster));
    }

    pub fn has<H: ?Sized + 'static>(&self) -> bool {
        self.casters.contains_key(&TypeId::of::<H>())
    }

    pub fn len(&self) -> usize {
        self.casters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.casters.is_empty()
    }

    /// View `component` through `H`, if declared.
    pub fn query<'a, H: ?Sized + 'static>(
        &self,
        component: &'a mut (dyn Component + 'static),
    ) -> Option<&'a mut H> {
        let caster = self
            .casters
            .get(&TypeId::of::<H>())?
            .downcast_ref::<Caster<H>>()?;
        let any: &mut dyn Any = component;
        caster(any)
    }
}

impl std::fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Capabilities")
            .field("count", &self.casters.len())
            .finish()
    }
}

/// Implement [`Declares`] for each listed handler trait.
///
/// ```rust,ignore
/// declares!(SaveDialogue: ClickHandler, KeyHandler);
/// ```
#[macro_export]
macro_rules! declares {
    ($component:ty : $($handler:path),+ $(,)?) => {
        $(
            impl $crate::capability::Declares<dyn $handler> for $component {
                fn as_handler(&mut self) -> &mut (dyn $handler + 'static) {
                    self
                }
            }
        )+
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use corbel_core::geometry::BBox;

    trait Greet {
        fn greet(&mut self) -> String;
    }

    trait Count {
        fn bump(&mut self) -> u32;
    }

    #[derive(Default)]
    struct Greeter {
        greeted: u32,
    }

    impl Greet for Greeter {
        fn greet(&mut self) -> String {
            self.greeted += 1;
            format!("hello #{}", self.greeted)
        }
    }

    declares!(Greeter: Greet);

    impl Component for Greeter {
        fn resize(&self, _children: &[BBox]) -> BBox {
            BBox::default()
        }

        fn declare(caps: &mut Capabilities) {
            caps.declare::<Self, dyn Greet>();
        }
    }

    struct Plain;

    impl Component for Plain {
        fn resize(&self, _children: &[BBox]) -> BBox {
            BBox::default()
        }
    }

    #[test]
    fn test_declared_capability_is_queryable() {
        let caps = Capabilities::of::<Greeter>();
        assert!(caps.has::<dyn Greet>());
        assert!(!caps.has::<dyn Count>());

        let mut boxed: Box<dyn Component> = Box::new(Greeter::default());
        let greet = caps.query::<dyn Greet>(boxed.as_mut()).unwrap();
        assert_eq!(greet.greet(), "hello #1");
        assert!(caps.query::<dyn Count>(boxed.as_mut()).is_none());
    }

    #[test]
    fn test_undeclared_component_has_no_capabilities() {
        let caps = Capabilities::of::<Plain>();
        assert!(caps.is_empty());
    }

    #[test]
    fn test_caster_checks_concrete_type() {
        // Greeter's capabilities applied to a different component type.
        let caps = Capabilities::of::<Greeter>();
        let mut other: Box<dyn Component> = Box::new(Plain);
        assert!(caps.query::<dyn Greet>(other.as_mut()).is_none());
    }
}
