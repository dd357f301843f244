/// Window identifier issued by the window manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowHandle(pub u32);

/// Icon identifier within a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IconHandle(pub i32);

impl IconHandle {
    /// Events over the window background rather than an icon.
    pub const WORK_AREA: IconHandle = IconHandle(-1);

    pub const fn is_work_area(self) -> bool {
        self.0 < 0
    }
}
