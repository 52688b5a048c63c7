use std::io::Cursor;

use rowedit::app::{App, OutputStyle};
use rowedit::editor::{EditorBuffer, Position};
use rowedit::list::Arena;

#[test]
fn test_merge_scenario() {
    let mut buf = EditorBuffer::new();
    buf.insert("AB");
    buf.enter();
    buf.insert("CD");
    buf.move_left();
    buf.move_left();
    buf.backspace();
    assert_eq!(buf.lines().collect::<Vec<_>>(), vec!["AB|CD"]);
    assert_eq!(buf.cursor(), Position::at(0, 2));
}

#[test]
fn test_boundary_noops_leave_buffer_unchanged() {
    let mut buf = EditorBuffer::new();
    buf.insert("one");
    buf.enter();
    buf.insert("two");
    let end_state = buf.snapshot();
    buf.move_right();
    buf.move_down();
    assert_eq!(buf.snapshot(), end_state);

    for _ in 0..4 {
        buf.move_up();
        buf.move_left();
    }
    let start_state = buf.snapshot();
    assert_eq!(start_state.cursor, Position::at(0, 0));
    buf.move_left();
    buf.move_up();
    assert!(!buf.backspace());
    assert_eq!(buf.snapshot(), start_state);
    assert_eq!(buf.check_invariants(), Ok(()));
}

#[test]
fn test_scripted_session_matches_direct_calls() {
    let script = "I\nfirst line\nN\nI\nsecond\nU\nR\nB\nD\nN\n";
    let mut out = Vec::new();
    let model = App::new()
        .with_prompts(false)
        .with_style(OutputStyle::Plain)
        .run_with(Cursor::new(script), &mut out)
        .unwrap();

    let mut buf = EditorBuffer::new();
    buf.insert("first line");
    buf.enter();
    buf.insert("second");
    buf.move_up();
    buf.move_right();
    buf.backspace();
    buf.move_down();
    buf.enter();

    assert_eq!(model.buffer.snapshot(), buf.snapshot());
    assert_eq!(model.commands_applied, 8);
}

#[test]
fn test_arena_is_usable_on_its_own() {
    let mut arena = Arena::new();
    let mut head = None;
    let mut last = None;
    for word in ["alpha", "beta", "gamma"] {
        let id = arena.alloc(word);
        head = arena.insert_after(id, last, head);
        last = Some(id);
    }
    let out = arena.delete_next(None, head);
    if let Some(removed) = out.removed {
        assert_eq!(arena.remove(removed), Some("alpha"));
    }
    let words: Vec<&str> = arena.iter(out.head).map(|(_, w)| *w).collect();
    assert_eq!(words, vec!["beta", "gamma"]);
}
