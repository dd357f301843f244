use corbel_render::ContextError;
use corbel_wimp::WimpError;

use crate::component::ComponentId;

/// Errors reported by component tree and host operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiError {
    /// The id refers to a component that has been destroyed.
    StaleComponent(ComponentId),
    /// The component already has a parent.
    AlreadyAttached(ComponentId),
    /// The component is still attached and cannot be destroyed.
    StillAttached(ComponentId),
    /// Adding the component would make it its own ancestor.
    Cycle(ComponentId),
    /// A layout step that needs the minimum box ran before resize.
    NotSized(ComponentId),
    Context(ContextError),
    Wimp(WimpError),
}

impl std::fmt::Display for UiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StaleComponent(id) => write!(f, "Component {:?} no longer exists", id),
            Self::AlreadyAttached(id) => write!(f, "Component {:?} already has a parent", id),
            Self::StillAttached(id) => {
                write!(f, "Component {:?} is still attached to its parent", id)
            }
            Self::Cycle(id) => write!(f, "Adding component {:?} would create a cycle", id),
            Self::NotSized(id) => write!(f, "Component {:?} has not been resized", id),
            Self::Context(e) => write!(f, "Graphics context error: {}", e),
            Self::Wimp(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for UiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Context(e) => Some(e),
            Self::Wimp(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ContextError> for UiError {
    fn from(e: ContextError) -> Self {
        Self::Context(e)
    }
}

impl From<WimpError> for UiError {
    fn from(e: WimpError) -> Self {
        Self::Wimp(e)
    }
}
