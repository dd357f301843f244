//! Graphics context lifecycle tests against mock services.

use corbel_core::geometry::{BBox, Point};
use corbel_render::{
    Color, ContextError, ContextGuard, GraphicsContext, JobHandle, PrintContext, ScreenContext,
    TextFlags, default_font, shutdown_fonts,
};
use corbel_test_utils::{DrawCall, MockSpooler, MockSurface, SpoolCall};

fn screen(surface: &MockSurface) -> ScreenContext<MockSurface> {
    ScreenContext::new(surface.clone(), Point::new(100, 200), BBox::new(0, 0, 500, 500))
}

#[test]
fn test_guard_brackets_drawing() {
    let surface = MockSurface::new();
    let mut ctx = screen(&surface);

    {
        let mut active = ctx.begin().expect("activation");
        assert!(active.is_active());
        active.fill(BBox::new(0, 0, 10, 10), Color::RED).unwrap();
    }

    assert!(!ctx.is_active());
    assert_eq!(
        surface.calls(),
        vec![
            DrawCall::Begin,
            DrawCall::SetClip(BBox::new(100, 200, 600, 700)),
            DrawCall::Fill {
                bbox: BBox::new(100, 200, 110, 210),
                color: Color::RED
            },
            DrawCall::End,
        ]
    );
}

#[test]
fn test_double_deactivate_is_noop() {
    let surface = MockSurface::new();
    let mut ctx = screen(&surface);

    ctx.activate().unwrap();
    ctx.deactivate();
    ctx.deactivate();

    assert_eq!(surface.count_begins(), 1);
    assert_eq!(surface.count_ends(), 1);
}

#[test]
fn test_explicit_deactivate_inside_guard() {
    let surface = MockSurface::new();
    let mut ctx = screen(&surface);

    let mut guard = ctx.begin().unwrap();
    guard.deactivate();
    guard.finish();

    assert_eq!(surface.count_ends(), 1);
}

#[test]
fn test_failed_activation_still_tears_down() {
    let surface = MockSurface::failing();
    let mut ctx = screen(&surface);

    let result = ContextGuard::new(&mut ctx);
    assert!(matches!(result, Err(ContextError::ActivationFailed(_))));
    drop(result);

    assert!(!ctx.is_active());
    assert_eq!(surface.calls(), vec![DrawCall::Begin, DrawCall::End]);
}

#[test]
fn test_early_return_deactivates() {
    fn draw_then_bail(ctx: &mut dyn GraphicsContext) -> Result<(), ContextError> {
        let mut active = ContextGuard::new(ctx)?;
        active.fill(BBox::new(0, 0, 1, 1), Color::BLACK)?;
        Err(ContextError::Service("bail".to_string()))
    }

    let surface = MockSurface::new();
    let mut ctx = screen(&surface);

    assert!(draw_then_bail(&mut ctx).is_err());
    assert!(!ctx.is_active());
    assert_eq!(surface.count_ends(), 1);
}

#[test]
fn test_drawing_requires_active_context() {
    let surface = MockSurface::new();
    let mut ctx = screen(&surface);

    assert_eq!(
        ctx.fill(BBox::new(0, 0, 4, 4), Color::BLUE),
        Err(ContextError::NotActive)
    );
    assert!(surface.calls().is_empty());
}

#[test]
fn test_centred_text() {
    shutdown_fonts();
    let font = default_font();
    let surface = MockSurface::new();
    let mut ctx = ScreenContext::new(surface.clone(), Point::ZERO, BBox::new(0, 0, 200, 100));

    let mut active = ctx.begin().unwrap();
    // Fallback metrics: 16 units per character, 32 high.
    active
        .text(
            BBox::new(0, 0, 100, 40),
            "Save",
            &font,
            Color::BLACK,
            TextFlags::CENTRE,
        )
        .unwrap();
    drop(active);

    let text_at = surface.calls().into_iter().find_map(|call| match call {
        DrawCall::Text { at, .. } => Some(at),
        _ => None,
    });
    assert_eq!(text_at, Some(Point::new(18, 4)));
}

#[test]
fn test_print_selects_and_restores_job() {
    let surface = MockSurface::new();
    let spooler = MockSpooler::with_current(JobHandle(3));
    let mut ctx = PrintContext::new(screen(&surface), spooler.clone(), JobHandle(7));

    {
        let active = ctx.begin().unwrap();
        assert!(active.is_active());
        assert!(active.base().is_active());
        assert_eq!(spooler.current(), Some(JobHandle(7)));
    }

    assert!(!ctx.is_active());
    assert!(!ctx.base().is_active());
    assert_eq!(spooler.current(), Some(JobHandle(3)));
    assert_eq!(
        spooler.calls(),
        vec![
            SpoolCall::Select(Some(JobHandle(7))),
            SpoolCall::Select(Some(JobHandle(3)))
        ]
    );
}

#[test]
fn test_print_scales_to_millipoints() {
    let surface = MockSurface::new();
    let mut ctx = PrintContext::new(screen(&surface), MockSpooler::new(), JobHandle(1))
        .with_origin(Point::new(1000, 2000));

    let mut active = ctx.begin().unwrap();
    active.fill(BBox::new(0, 0, 2, 3), Color::BLACK).unwrap();
    drop(active);

    assert_eq!(surface.fills(), vec![BBox::new(1000, 2000, 1800, 3200)]);
}

#[test]
fn test_print_mismatch_on_restore_completes_teardown() {
    let surface = MockSurface::new();
    let spooler = MockSpooler::new();
    let mut ctx = PrintContext::new(screen(&surface), spooler.clone(), JobHandle(7));

    ctx.activate().unwrap();
    spooler.report_on_next_select(Some(JobHandle(99)));
    ctx.deactivate();

    assert!(!ctx.is_active());
    assert!(!ctx.base().is_active());
    assert_eq!(surface.count_ends(), 1);
    assert_eq!(spooler.current(), None);
    assert_eq!(
        ctx.take_error(),
        Some(ContextError::JobMismatch {
            expected: Some(JobHandle(7)),
            found: Some(JobHandle(99)),
        })
    );
    assert_eq!(ctx.take_error(), None);
}

#[test]
fn test_print_abort_reports_mismatch_on_restore() {
    let surface = MockSurface::new();
    let spooler = MockSpooler::new();
    let mut ctx = PrintContext::new(screen(&surface), spooler.clone(), JobHandle(7));

    ctx.activate().unwrap();
    spooler.report_on_next_select(Some(JobHandle(99)));

    assert_eq!(
        ctx.abort(),
        Err(ContextError::JobMismatch {
            expected: Some(JobHandle(7)),
            found: Some(JobHandle(99)),
        })
    );
    // The job is still abandoned and the base torn down.
    assert!(ctx.is_aborted());
    assert!(!ctx.base().is_active());
    assert_eq!(spooler.calls().last(), Some(&SpoolCall::Abort(JobHandle(7))));
}

#[test]
fn test_print_finish_reports_mismatch() {
    let surface = MockSurface::new();
    let spooler = MockSpooler::new();
    let mut ctx = PrintContext::new(screen(&surface), spooler.clone(), JobHandle(7));

    ctx.activate().unwrap();
    spooler.report_on_next_select(Some(JobHandle(99)));

    let result = ctx.finish();
    assert!(matches!(result, Err(ContextError::JobMismatch { .. })));
    assert_eq!(surface.count_ends(), 1);
}

#[test]
fn test_print_finish_after_clean_span() {
    let surface = MockSurface::new();
    let spooler = MockSpooler::with_current(JobHandle(3));
    let mut ctx = PrintContext::new(screen(&surface), spooler.clone(), JobHandle(7));

    ctx.activate().unwrap();
    assert_eq!(ctx.finish(), Ok(()));
    assert_eq!(spooler.current(), Some(JobHandle(3)));
}

#[test]
fn test_print_selection_failure_deactivates_base() {
    let surface = MockSurface::new();
    let spooler = MockSpooler::with_current(JobHandle(3));
    spooler.set_fail_select(true);
    let mut ctx = PrintContext::new(screen(&surface), spooler.clone(), JobHandle(7));

    let result = ctx.begin().map(|_| ());
    assert!(matches!(result, Err(ContextError::Service(_))));
    assert!(!ctx.base().is_active());
    assert_eq!(surface.count_begins(), 1);
    assert_eq!(surface.count_ends(), 1);
    assert_eq!(spooler.current(), Some(JobHandle(3)));
}

#[test]
fn test_print_abort() {
    let surface = MockSurface::new();
    let spooler = MockSpooler::new();
    let mut ctx = PrintContext::new(screen(&surface), spooler.clone(), JobHandle(5));

    ctx.activate().unwrap();
    ctx.abort().unwrap();

    assert!(ctx.is_aborted());
    assert!(!ctx.is_active());
    assert!(!ctx.base().is_active());
    assert_eq!(spooler.calls().last(), Some(&SpoolCall::Abort(JobHandle(5))));
    assert_eq!(ctx.activate(), Err(ContextError::Aborted));

    // Second abort does not reach the spooler again.
    ctx.abort().unwrap();
    assert_eq!(
        spooler
            .calls()
            .iter()
            .filter(|c| matches!(c, SpoolCall::Abort(_)))
            .count(),
        1
    );
}
