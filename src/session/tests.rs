//! Session-level behavior tests: pointer flows, shortcut routing, and
//! counter numbering.

use super::*;
use crate::draw::Annotation;
use crate::draw::color::{BLUE, RED, WHITE};

fn session() -> CaptureSession {
    let config = Config::default();
    CaptureSession::new(
        Pixmap::solid(128, 96, WHITE),
        Rect::new(200, 150, 128, 96).unwrap(),
        &config,
    )
}

fn drag(session: &mut CaptureSession, from: (f64, f64), to: (f64, f64)) {
    session.on_pointer_press(from.0, from.1);
    session.on_pointer_motion(to.0, to.1);
    session.on_pointer_release();
}

#[test]
fn rectangle_drag_commits_and_undo_restores_base() {
    let mut session = session();
    session.set_tool(ToolKind::Rect);

    let empty = session.render_frame();
    drag(&mut session, (10.0, 10.0), (60.0, 40.0));

    assert_eq!(session.canvas().annotations().len(), 1);
    assert_ne!(session.render_frame().data(), empty.data());

    assert!(session.undo());
    assert_eq!(session.canvas().annotations().len(), 0);
    assert_eq!(session.render_frame().data(), empty.data());
}

#[test]
fn pencil_drag_commits_a_stroke() {
    let mut session = session();
    drag(&mut session, (5.0, 5.0), (30.0, 30.0));

    match session.canvas().annotations() {
        [Annotation::Stroke { points, color, .. }] => {
            assert_eq!(points.first(), Some(&(5, 5)));
            assert_eq!(points.last(), Some(&(30, 30)));
            assert_eq!(*color, RED);
        }
        other => panic!("expected one stroke, got {other:?}"),
    }
}

#[test]
fn pointer_coordinates_are_clamped_to_the_canvas() {
    let mut session = session();
    session.set_tool(ToolKind::Line);
    drag(&mut session, (-40.0, 10.0), (9999.0, f64::NAN));

    match session.canvas().annotations() {
        [Annotation::Line { x1, y1, x2, y2, .. }] => {
            assert_eq!((*x1, *y1), (0, 10));
            assert_eq!((*x2, *y2), (127, 0));
        }
        other => panic!("expected one line, got {other:?}"),
    }
}

#[test]
fn counter_numbers_are_monotonic_and_burned_on_undo() {
    let mut session = session();
    session.set_tool(ToolKind::Counter);

    session.on_pointer_press(10.0, 10.0);
    session.on_pointer_release();
    session.on_pointer_press(30.0, 10.0);
    session.on_pointer_release();
    assert_eq!(session.next_counter(), 3);

    assert!(session.undo());
    // The undone bubble's number is not reused.
    session.on_pointer_press(50.0, 10.0);
    session.on_pointer_release();

    let numbers: Vec<u32> = session
        .canvas()
        .annotations()
        .iter()
        .map(|a| match a {
            Annotation::CounterBubble { number, .. } => *number,
            other => panic!("expected counter bubble, got {other:?}"),
        })
        .collect();
    assert_eq!(numbers, vec![1, 3]);
}

#[test]
fn style_changes_mid_drag_do_not_affect_the_gesture() {
    let mut session = session();
    session.set_tool(ToolKind::Rect);

    session.on_pointer_press(10.0, 10.0);
    session.on_pointer_motion(40.0, 40.0);
    session.set_color(BLUE);
    session.set_thickness(9.0);
    session.on_pointer_release();

    match session.canvas().annotations() {
        [Annotation::Rect {
            color, thickness, ..
        }] => {
            assert_eq!(*color, RED);
            assert_eq!(*thickness, 3.0);
        }
        other => panic!("expected one rect, got {other:?}"),
    }

    // The next gesture picks up the new style.
    drag(&mut session, (50.0, 50.0), (80.0, 80.0));
    match &session.canvas().annotations()[1] {
        Annotation::Rect { color, .. } => assert_eq!(*color, BLUE),
        other => panic!("expected rect, got {other:?}"),
    }
}

#[test]
fn text_tool_commits_through_the_keyboard() {
    let mut session = session();
    session.set_tool(ToolKind::Text);
    session.on_pointer_press(20.0, 40.0);
    session.on_pointer_release();

    for c in "note".chars() {
        assert_eq!(session.on_key(Key::Char(c), Modifiers::NONE), None);
    }
    session.on_key(Key::Backspace, Modifiers::NONE);
    session.on_key(Key::Return, Modifiers::NONE);

    match session.canvas().annotations() {
        [Annotation::Text { x, y, text, .. }] => {
            assert_eq!((*x, *y), (20, 40));
            assert_eq!(text, "not");
        }
        other => panic!("expected one text, got {other:?}"),
    }
}

#[test]
fn escape_discards_an_empty_text_entry() {
    let mut session = session();
    session.set_tool(ToolKind::Text);
    session.on_pointer_press(20.0, 40.0);
    session.on_pointer_release();

    assert_eq!(session.on_key(Key::Escape, Modifiers::NONE), None);
    assert!(session.canvas().annotations().is_empty());

    // Escape with nothing in flight goes to the host.
    assert_eq!(
        session.on_key(Key::Escape, Modifiers::NONE),
        Some(Action::Cancel)
    );
}

#[test]
fn clicking_elsewhere_commits_pending_text() {
    let mut session = session();
    session.set_tool(ToolKind::Text);
    session.on_pointer_press(20.0, 40.0);
    session.on_pointer_release();
    session.on_key(Key::Char('a'), Modifiers::NONE);

    session.on_pointer_press(70.0, 70.0);
    session.on_pointer_release();

    assert_eq!(session.canvas().annotations().len(), 1);
    assert!(matches!(
        session.canvas().annotations()[0],
        Annotation::Text { .. }
    ));
}

#[test]
fn shortcuts_route_undo_internally_and_exports_to_the_host() {
    let mut session = session();
    drag(&mut session, (5.0, 5.0), (25.0, 25.0));
    assert_eq!(session.canvas().annotations().len(), 1);

    assert_eq!(session.on_key(Key::Char('z'), Modifiers::CTRL), None);
    assert_eq!(session.canvas().annotations().len(), 0);
    assert_eq!(session.on_key(Key::Char('y'), Modifiers::CTRL), None);
    assert_eq!(session.canvas().annotations().len(), 1);

    assert_eq!(
        session.on_key(Key::Char('s'), Modifiers::CTRL),
        Some(Action::SaveFile)
    );
    assert_eq!(
        session.on_key(Key::Char('c'), Modifiers::CTRL),
        Some(Action::CopyClipboard)
    );
}

#[test]
fn escape_cancels_a_drag_before_reaching_the_host() {
    let mut session = session();
    session.set_tool(ToolKind::Ellipse);
    session.on_pointer_press(10.0, 10.0);
    session.on_pointer_motion(40.0, 40.0);

    assert_eq!(session.on_key(Key::Escape, Modifiers::NONE), None);
    session.on_pointer_release();
    assert!(session.canvas().annotations().is_empty());
}

#[test]
fn shortcuts_are_suppressed_during_text_entry() {
    let mut session = session();
    drag(&mut session, (5.0, 5.0), (25.0, 25.0));

    session.set_tool(ToolKind::Text);
    session.on_pointer_press(50.0, 50.0);
    session.on_pointer_release();

    // Plain characters go to the buffer, not the shortcut table.
    assert_eq!(session.on_key(Key::Char('z'), Modifiers::NONE), None);
    session.on_key(Key::Return, Modifiers::NONE);

    assert_eq!(session.canvas().annotations().len(), 2);
    match &session.canvas().annotations()[1] {
        Annotation::Text { text, .. } => assert_eq!(text, "z"),
        other => panic!("expected text, got {other:?}"),
    }
}

#[test]
fn setters_clamp_out_of_range_values() {
    let mut session = session();
    session.set_thickness(500.0);
    assert_eq!(session.style().thickness, 20.0);
    session.set_font_size(1.0);
    assert_eq!(session.style().font_size, 8.0);
}

#[test]
fn region_is_carried_from_the_selection() {
    let session = session();
    assert_eq!(
        session.canvas().region(),
        Rect::new(200, 150, 128, 96).unwrap()
    );
}
