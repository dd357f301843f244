use crate::handle::WindowHandle;

/// Failures reported across the window-manager boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WimpError {
    /// The window manager does not know this window.
    UnknownWindow(WindowHandle),
    /// A drag was requested while another is still in flight.
    DragInProgress,
    /// Stop was requested with no drag in flight.
    NoDrag,
    /// Any other failure reported by the host.
    Service(String),
}

impl std::fmt::Display for WimpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownWindow(w) => write!(f, "Unknown window: {:?}", w),
            Self::DragInProgress => write!(f, "A drag is already in progress"),
            Self::NoDrag => write!(f, "No drag in progress"),
            Self::Service(msg) => write!(f, "Window manager error: {}", msg),
        }
    }
}

impl std::error::Error for WimpError {}
