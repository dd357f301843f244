//! The event loop against scripted window-manager records.

use corbel::prelude::*;
use corbel::ui::{Capabilities, DragCompletedEvent, DragHandler, Placement};
use corbel::wimp::{DragKind, VecSource, WimpError, read_all};
use corbel_test_utils::{MockSurface, MockWindowManager, WimpCall};

const WINDOW: WindowHandle = WindowHandle(1);
const SAVE_ICON: IconHandle = IconHandle(3);

/// Window contents: holds the document bytes and hosts the dialogue.
#[derive(Default)]
struct Editor {
    contents: Vec<u8>,
    saved: Vec<u8>,
    dropped: Option<BBox>,
}

impl SaveHandler for Editor {
    fn save(&mut self, _cx: &mut HandlerContext<'_>, _event: &SaveEvent) {
        self.saved = read_all(&mut VecSource::new(self.contents.clone()));
    }
}

impl DragHandler for Editor {
    fn drag_completed(&mut self, _cx: &mut HandlerContext<'_>, event: &DragCompletedEvent) {
        self.dropped = Some(event.bbox());
    }
}

declares!(Editor: SaveHandler, DragHandler);

impl Component for Editor {
    fn resize(&self, children: &[BBox]) -> BBox {
        children
            .iter()
            .fold(BBox::from_size(Point::new(600, 400)), |acc, c| {
                acc | BBox::from_size(c.size())
            })
    }

    fn reformat(&self, border: BBox, children: &[BBox]) -> Placement {
        Placement {
            content: border,
            children: children
                .iter()
                .map(|min| BBox::from_origin_size(border.origin(), min.size()))
                .collect(),
        }
    }

    fn declare(caps: &mut Capabilities) {
        caps.declare::<Self, dyn SaveHandler>();
        caps.declare::<Self, dyn DragHandler>();
    }
}

struct Harness {
    app: Application<MockWindowManager, MockSurface>,
    wm: MockWindowManager,
    surface: MockSurface,
    editor: ComponentId,
    dialogue: ComponentId,
}

impl Harness {
    fn new() -> Self {
        let wm = MockWindowManager::new()
            .with_window(WINDOW, Point::new(200, 100))
            .echo_redraws();
        let surface = MockSurface::new();
        let mut app = Application::new(wm.clone(), surface.clone(), Config::default());

        let config = app.config().clone();
        let tree = app.tree_mut();
        let editor = tree.insert(Editor {
            contents: b"hello, corbel".to_vec(),
            ..Default::default()
        });
        let dialogue = SaveDialogue::build(tree, "Save changes?", &config).unwrap();
        tree.add(editor, dialogue).unwrap();
        let save = tree.get::<SaveDialogue>(dialogue).unwrap().save_button();

        app.open_window(WINDOW, editor).unwrap();
        app.bind_icon(WINDOW, SAVE_ICON, save);

        Self {
            app,
            wm,
            surface,
            editor,
            dialogue,
        }
    }

    fn editor(&self) -> &Editor {
        self.app.tree().get::<Editor>(self.editor).unwrap()
    }
}

#[test]
fn test_first_turns_lay_out_and_paint() {
    let mut h = Harness::new();

    let turns = h.app.run_until_idle(10).unwrap();
    assert_eq!(turns, 2, "one turn to lay out, one to paint");

    let border = h.app.tree().border_box(h.editor).unwrap();
    assert_eq!(
        h.wm.calls(),
        vec![WimpCall::RequestRedraw {
            window: WINDOW,
            clip: border,
        }]
    );
    assert_eq!(h.surface.count_begins(), 1);
    assert_eq!(h.surface.count_ends(), 1);
    assert!(h.surface.texts().contains(&"Save changes?".to_string()));
}

#[test]
fn test_click_on_save_icon_saves() {
    let mut h = Harness::new();
    h.app.run_until_idle(10).unwrap();

    h.wm.push(RawEvent::MouseClick {
        window: WINDOW,
        icon: SAVE_ICON,
        position: Point::new(10, 10),
        buttons: MouseButtons::SELECT,
    });
    assert!(h.app.poll_once().unwrap());

    assert_eq!(h.editor().saved, b"hello, corbel");
}

#[test]
fn test_escape_removes_dialogue_and_repaints() {
    let mut h = Harness::new();
    h.app.run_until_idle(10).unwrap();
    h.surface.clear_calls();

    h.wm.push(RawEvent::KeyPressed {
        window: WINDOW,
        icon: IconHandle::WORK_AREA,
        key: KeyCode::Escape,
    });
    // The key goes to the editor, the window root, which does not handle
    // keys; the dialogue never sees it.
    h.app.run_until_idle(10).unwrap();
    assert_eq!(h.app.tree().parent(h.dialogue), Some(h.editor));

    let dialogue = h.dialogue;
    h.app.bind_icon(WINDOW, IconHandle(9), dialogue);
    h.wm.push(RawEvent::KeyPressed {
        window: WINDOW,
        icon: IconHandle(9),
        key: KeyCode::Escape,
    });
    h.app.run_until_idle(10).unwrap();

    assert!(!h.app.tree().contains(h.dialogue));
    assert!(h.app.tree().children(h.editor).is_empty());
    // The editor was laid out again and repainted without the dialogue.
    assert!(!h.surface.texts().contains(&"Save changes?".to_string()));
    assert!(h.surface.count_begins() >= 1);
}

#[test]
fn test_close_request_destroys_window_tree() {
    let mut h = Harness::new();
    h.app.run_until_idle(10).unwrap();
    let count = h.app.tree().len();
    assert!(count > 1);

    h.wm.push(RawEvent::CloseRequest { window: WINDOW });
    h.app.poll_once().unwrap();

    assert!(!h.app.tree().contains(h.editor));
    assert!(!h.app.tree().contains(h.dialogue));
    assert!(h.app.index().is_empty());
    assert!(h.app.tree().is_empty());
}

#[test]
fn test_drag_completion_reaches_source() {
    let mut h = Harness::new();
    h.app.run_until_idle(10).unwrap();

    let editor = h.editor;
    h.app
        .start_drag(editor, WINDOW, BBox::new(0, 0, 20, 20), DragKind::FixedBox)
        .unwrap();
    assert!(h.app.drag().is_active());
    assert!(h.wm.calls().contains(&WimpCall::StartDrag {
        window: WINDOW,
        bounds: BBox::new(200, 100, 220, 120),
        kind: DragKind::FixedBox,
    }));

    h.wm.release_drag(BBox::new(300, 300, 320, 320));
    h.app.poll_once().unwrap();

    assert!(!h.app.drag().is_active());
    assert_eq!(h.editor().dropped, Some(BBox::new(300, 300, 320, 320)));
}

#[test]
fn test_closing_window_aborts_its_drag() {
    let mut h = Harness::new();
    h.app.run_until_idle(10).unwrap();

    let editor = h.editor;
    h.app
        .start_drag(editor, WINDOW, BBox::new(0, 0, 5, 5), DragKind::RubberBox)
        .unwrap();
    h.wm.push(RawEvent::CloseRequest { window: WINDOW });
    h.app.poll_once().unwrap();

    assert!(!h.app.drag().is_active());
    assert!(!h.wm.is_dragging());
    assert_eq!(h.wm.calls().last(), Some(&WimpCall::StopDrag));
}

#[test]
fn test_close_after_released_drag_still_closes() {
    let mut h = Harness::new();
    h.app.run_until_idle(10).unwrap();

    let editor = h.editor;
    h.app
        .start_drag(editor, WINDOW, BBox::new(0, 0, 5, 5), DragKind::FixedBox)
        .unwrap();
    // The drag ends and the window is closed before the next poll.
    h.wm.release_drag(BBox::new(40, 40, 45, 45));
    h.wm.push(RawEvent::CloseRequest { window: WINDOW });

    assert!(h.app.poll_once().unwrap());

    assert!(!h.app.drag().is_active());
    assert_eq!(h.app.index().window_root(WINDOW), None);
    assert!(!h.app.tree().contains(h.editor));
    assert!(h.app.tree().is_empty());
}

#[test]
fn test_failed_record_does_not_drop_rest_of_batch() {
    let mut h = Harness::new();
    h.app.run_until_idle(10).unwrap();
    h.surface.clear_calls();

    // A window the window manager has never heard of.
    let stray = h.app.tree_mut().insert(Spacer::new(Point::new(10, 10)));
    h.app.bind_icon(WindowHandle(2), IconHandle::WORK_AREA, stray);

    h.wm.push(RawEvent::RedrawRequest {
        window: WindowHandle(2),
        clip: BBox::new(0, 0, 10, 10),
    });
    h.wm.push(RawEvent::RedrawRequest {
        window: WINDOW,
        clip: BBox::new(0, 0, 10, 10),
    });

    let err = h.app.poll_once().unwrap_err();
    assert_eq!(err, UiError::Wimp(WimpError::UnknownWindow(WindowHandle(2))));
    // The second window was still repainted.
    assert_eq!(h.surface.count_begins(), 1);
    assert_eq!(h.surface.count_ends(), 1);
}

#[test]
fn test_failed_activation_is_reported() {
    let mut h = Harness::new();
    h.surface.set_fail_begin(true);

    let err = h.app.run_until_idle(10).unwrap_err();
    assert!(matches!(err, UiError::Context(ContextError::ActivationFailed(_))));
    // The surface was still told the span ended.
    assert_eq!(h.surface.count_ends(), h.surface.count_begins());
}

#[test]
fn test_open_window_requires_detached_root() {
    let mut h = Harness::new();
    let dialogue = h.dialogue;
    let err = h.app.open_window(WindowHandle(2), dialogue).unwrap_err();
    assert_eq!(err, UiError::AlreadyAttached(dialogue));
}
