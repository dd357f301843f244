//! Event delivery, routing and re-entrancy.

use corbel_core::geometry::{BBox, Point};
use corbel_test_utils::{MockWindowManager, WimpCall};
use corbel_ui::{
    Capabilities, ClickEvent, ClickHandler, Component, ComponentId, ComponentTree, Delivery,
    DragCompletedEvent, DragHandler, DragTracker, Event, HandlerContext, KeyEvent, LayoutState,
    Placement, Spacer, declares,
};
use corbel_wimp::{DragKind, KeyCode, MouseButtons, WimpError, WindowHandle};

/// Counts clicks. Handles nothing else.
#[derive(Default)]
struct Counter {
    clicks: usize,
}

impl ClickHandler for Counter {
    fn click(&mut self, _cx: &mut HandlerContext<'_>, _event: &ClickEvent) {
        self.clicks += 1;
    }
}

declares!(Counter: ClickHandler);

impl Component for Counter {
    fn resize(&self, _children: &[BBox]) -> BBox {
        BBox::from_size(Point::new(10, 10))
    }

    fn declare(caps: &mut Capabilities) {
        caps.declare::<Self, dyn ClickHandler>();
    }
}

/// Wraps one child. A click grows the child and asks for layout right away,
/// from inside the handler.
struct Grower {
    child: ComponentId,
}

impl ClickHandler for Grower {
    fn click(&mut self, cx: &mut HandlerContext<'_>, _event: &ClickEvent) {
        let child = self.child;
        cx.tree()
            .update::<Spacer, _>(child, |s| *s = Spacer::new(Point::new(50, 50)));
        let laid_out = cx.tree().flush_layout();
        assert!(laid_out.is_empty(), "layout of a busy component must wait");
    }
}

impl DragHandler for Grower {
    fn drag_completed(&mut self, cx: &mut HandlerContext<'_>, event: &DragCompletedEvent) {
        let child = self.child;
        let size = event.bbox().size();
        cx.tree().update::<Spacer, _>(child, |s| *s = Spacer::new(size));
    }
}

declares!(Grower: ClickHandler, DragHandler);

impl Component for Grower {
    fn resize(&self, children: &[BBox]) -> BBox {
        children.first().copied().unwrap_or_default()
    }

    fn reformat(&self, border: BBox, children: &[BBox]) -> Placement {
        Placement {
            content: border,
            children: children.iter().map(|_| border).collect(),
        }
    }

    fn declare(caps: &mut Capabilities) {
        caps.declare::<Self, dyn ClickHandler>();
        caps.declare::<Self, dyn DragHandler>();
    }
}

/// Removes and destroys itself when clicked.
struct SelfDestruct;

impl ClickHandler for SelfDestruct {
    fn click(&mut self, cx: &mut HandlerContext<'_>, _event: &ClickEvent) {
        let this = cx.this();
        cx.detach();
        cx.tree().destroy(this).unwrap();
    }
}

declares!(SelfDestruct: ClickHandler);

impl Component for SelfDestruct {
    fn resize(&self, _children: &[BBox]) -> BBox {
        BBox::default()
    }

    fn declare(caps: &mut Capabilities) {
        caps.declare::<Self, dyn ClickHandler>();
    }
}

fn click(target: ComponentId) -> ClickEvent {
    ClickEvent::new(target, Point::new(1, 1), MouseButtons::SELECT)
}

fn grower(tree: &mut ComponentTree) -> (ComponentId, ComponentId) {
    let child = tree.insert(Spacer::new(Point::new(10, 10)));
    let grower = tree.insert(Grower { child });
    tree.add(grower, child).unwrap();
    tree.flush_layout();
    (grower, child)
}

#[test]
fn test_undelivered_event_changes_nothing() {
    let mut tree = ComponentTree::new();
    let counter = tree.insert(Counter::default());
    tree.flush_layout();
    let before = tree.metrics().clone();

    let delivery = tree.deliver(&KeyEvent::new(counter, KeyCode::Return), counter);

    assert_eq!(delivery, Delivery::NotDelivered);
    assert_eq!(tree.get::<Counter>(counter).unwrap().clicks, 0);
    assert_eq!(tree.layout_state(counter), Some(LayoutState::Placed));
    assert!(!tree.needs_layout());
    assert_eq!(tree.metrics(), &before);
}

#[test]
fn test_click_reaches_declaring_ancestor() {
    let mut tree = ComponentTree::new();
    let counter = tree.insert(Counter::default());
    let leaf = tree.insert(Spacer::default());
    tree.add(counter, leaf).unwrap();

    assert!(tree.post(&click(leaf)).is_delivered());
    assert_eq!(tree.get::<Counter>(counter).unwrap().clicks, 1);
}

#[test]
fn test_layout_inside_handler_is_deferred() {
    let mut tree = ComponentTree::new();
    let (grower, child) = grower(&mut tree);
    tree.take_metrics();

    assert!(tree.post(&click(grower)).is_delivered());

    assert!(tree.needs_layout());
    assert_eq!(tree.layout_state(grower), Some(LayoutState::Unsized));
    assert!(tree.metrics().deferred >= 1);

    assert_eq!(tree.flush_layout(), vec![grower]);
    assert_eq!(tree.layout_state(grower), Some(LayoutState::Placed));
    assert_eq!(tree.border_box(child).unwrap().size(), Point::new(50, 50));
}

#[test]
fn test_busy_component_does_not_receive_nested_events() {
    // Posting to a component from its own handler finds it checked out.
    struct Echo {
        nested: Option<Delivery>,
    }

    impl ClickHandler for Echo {
        fn click(&mut self, cx: &mut HandlerContext<'_>, event: &ClickEvent) {
            if self.nested.is_none() {
                self.nested = Some(cx.post(&click(event.target())));
            }
        }
    }

    declares!(Echo: ClickHandler);

    impl Component for Echo {
        fn resize(&self, _children: &[BBox]) -> BBox {
            BBox::default()
        }

        fn declare(caps: &mut Capabilities) {
            caps.declare::<Self, dyn ClickHandler>();
        }
    }

    let mut tree = ComponentTree::new();
    let echo = tree.insert(Echo { nested: None });
    assert!(tree.post(&click(echo)).is_delivered());
    assert_eq!(
        tree.get::<Echo>(echo).unwrap().nested,
        Some(Delivery::NotDelivered)
    );
}

#[test]
fn test_handler_may_destroy_itself() {
    let mut tree = ComponentTree::new();
    let parent = tree.insert(Counter::default());
    let doomed = tree.insert(SelfDestruct);
    tree.add(parent, doomed).unwrap();

    assert!(tree.post(&click(doomed)).is_delivered());
    assert!(!tree.contains(doomed));
    assert!(tree.children(parent).is_empty());
    assert_eq!(tree.get::<Counter>(parent).unwrap().clicks, 0);
}

const WINDOW: WindowHandle = WindowHandle(1);

#[test]
fn test_drag_is_started_in_screen_coordinates() {
    let mut wm = MockWindowManager::new().with_window(WINDOW, Point::new(100, 200));
    let mut tree = ComponentTree::new();
    let (source, _) = grower(&mut tree);

    let mut drag = DragTracker::new();
    drag.start(&mut wm, source, WINDOW, BBox::new(0, 0, 10, 10), DragKind::RubberBox)
        .unwrap();

    assert_eq!(drag.source(), Some(source));
    assert_eq!(
        wm.calls(),
        vec![WimpCall::StartDrag {
            window: WINDOW,
            bounds: BBox::new(100, 200, 110, 210),
            kind: DragKind::RubberBox,
        }]
    );
}

#[test]
fn test_second_drag_is_refused() {
    let mut wm = MockWindowManager::new().with_window(WINDOW, Point::ZERO);
    let mut tree = ComponentTree::new();
    let (a, _) = grower(&mut tree);
    let (b, _) = grower(&mut tree);

    let mut drag = DragTracker::new();
    drag.start(&mut wm, a, WINDOW, BBox::new(0, 0, 1, 1), DragKind::default())
        .unwrap();
    let err = drag
        .start(&mut wm, b, WINDOW, BBox::new(0, 0, 1, 1), DragKind::default())
        .unwrap_err();
    assert_eq!(err, WimpError::DragInProgress);
    assert_eq!(drag.source(), Some(a));
}

#[test]
fn test_drag_completion_goes_to_source() {
    let mut wm = MockWindowManager::new().with_window(WINDOW, Point::ZERO);
    let mut tree = ComponentTree::new();
    let (source, child) = grower(&mut tree);

    let mut drag = DragTracker::new();
    drag.start(&mut wm, source, WINDOW, BBox::new(0, 0, 10, 10), DragKind::FixedBox)
        .unwrap();

    let event = drag.finish(BBox::new(5, 5, 45, 35)).unwrap();
    assert_eq!(event.bbox(), BBox::new(5, 5, 45, 35));
    assert!(!drag.is_active());
    assert!(tree.post(&event).is_delivered());

    tree.flush_layout();
    assert_eq!(tree.border_box(child).unwrap().size(), Point::new(40, 30));

    assert!(drag.finish(BBox::default()).is_none());
}

#[test]
fn test_abort_stops_the_drag() {
    let mut wm = MockWindowManager::new().with_window(WINDOW, Point::ZERO);
    let mut tree = ComponentTree::new();
    let (source, _) = grower(&mut tree);

    let mut drag = DragTracker::new();
    assert_eq!(drag.abort(&mut wm), Err(WimpError::NoDrag));

    drag.start(&mut wm, source, WINDOW, BBox::new(0, 0, 1, 1), DragKind::Sprite)
        .unwrap();
    drag.abort(&mut wm).unwrap();

    assert!(!drag.is_active());
    assert!(!wm.is_dragging());
    assert_eq!(wm.calls().last(), Some(&WimpCall::StopDrag));
}

#[test]
fn test_drag_in_unknown_window_fails_cleanly() {
    let mut wm = MockWindowManager::new();
    let mut tree = ComponentTree::new();
    let (source, _) = grower(&mut tree);

    let mut drag = DragTracker::new();
    let err = drag
        .start(&mut wm, source, WINDOW, BBox::new(0, 0, 1, 1), DragKind::default())
        .unwrap_err();
    assert_eq!(err, WimpError::UnknownWindow(WINDOW));
    assert!(!drag.is_active());
}
