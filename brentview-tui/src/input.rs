//! Keyboard input dispatch: overlays first, then global keys, then the
//! focused date input.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{AppState, Overlay};

const PAGE_DAYS: i64 = 30;

pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.running = false;
        return;
    }

    // 1. Overlays consume input first.
    match app.overlay {
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::Help => {
            app.overlay = Overlay::None;
            return;
        }
        Overlay::None => {}
    }

    // 2. Global keys.
    let focus = app.inputs.focus;
    match key.code {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Char('?') => app.overlay = Overlay::Help,
        KeyCode::Char('e') => {
            app.error_scroll = 0;
            app.overlay = Overlay::ErrorHistory;
        }
        KeyCode::Char('r') => app.refresh(),
        KeyCode::Char('j') => {
            if app.events_scroll + 1 < app.view.events.len() {
                app.events_scroll += 1;
            }
        }
        KeyCode::Char('k') => {
            app.events_scroll = app.events_scroll.saturating_sub(1);
        }
        KeyCode::Tab | KeyCode::BackTab => app.inputs.focus = focus.toggle(),

        // 3. Focused date input.
        KeyCode::Enter => app.commit(focus),
        KeyCode::Esc => app.revert(focus),
        KeyCode::Backspace => app.inputs.pop(),
        KeyCode::Up => app.shift(focus, 1),
        KeyCode::Down => app.shift(focus, -1),
        KeyCode::PageUp => app.shift(focus, PAGE_DAYS),
        KeyCode::PageDown => app.shift(focus, -PAGE_DAYS),
        KeyCode::Char(c) => app.inputs.push(c),
        _ => {}
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('e') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{DateField, ErrorCategory};
    use crate::test_helpers::test_app;
    use crate::worker::WorkerCommand;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(app: &mut AppState, s: &str) {
        for c in s.chars() {
            handle_key(app, press(KeyCode::Char(c)));
        }
    }

    #[test]
    fn q_quits() {
        let (mut app, _cmds, _resp) = test_app();
        handle_key(&mut app, press(KeyCode::Char('q')));
        assert!(!app.running);
    }

    #[test]
    fn ctrl_c_quits() {
        let (mut app, _cmds, _resp) = test_app();
        handle_key(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.running);
    }

    #[test]
    fn release_events_are_ignored() {
        let (mut app, _cmds, _resp) = test_app();
        let mut key = press(KeyCode::Char('q'));
        key.kind = KeyEventKind::Release;
        handle_key(&mut app, key);
        assert!(app.running);
    }

    #[test]
    fn typing_then_enter_commits_focused_field() {
        let (mut app, cmds, _resp) = test_app();
        handle_key(&mut app, press(KeyCode::Tab));
        assert_eq!(app.inputs.focus, DateField::End);
        for _ in 0..10 {
            handle_key(&mut app, press(KeyCode::Backspace));
        }
        type_str(&mut app, "2020-12-31");
        handle_key(&mut app, press(KeyCode::Enter));

        match cmds.try_recv().unwrap() {
            WorkerCommand::Fetch { range, .. } => {
                assert_eq!(range.end.to_string(), "2020-12-31");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn esc_reverts_uncommitted_edit() {
        let (mut app, cmds, _resp) = test_app();
        handle_key(&mut app, press(KeyCode::Backspace));
        assert_eq!(app.inputs.start, "2012-01-0");
        handle_key(&mut app, press(KeyCode::Esc));
        assert_eq!(app.inputs.start, "2012-01-01");
        assert!(cmds.try_recv().is_err());
    }

    #[test]
    fn arrows_step_by_day_and_page_by_month() {
        let (mut app, _cmds, _resp) = test_app();
        handle_key(&mut app, press(KeyCode::Up));
        assert_eq!(app.inputs.start, "2012-01-02");
        handle_key(&mut app, press(KeyCode::PageDown));
        assert_eq!(app.inputs.start, "2011-12-03");
    }

    #[test]
    fn r_refetches_same_range() {
        let (mut app, cmds, _resp) = test_app();
        handle_key(&mut app, press(KeyCode::Char('r')));
        assert!(matches!(cmds.try_recv().unwrap(), WorkerCommand::Fetch { .. }));
    }

    #[test]
    fn error_overlay_scrolls_and_closes() {
        let (mut app, _cmds, _resp) = test_app();
        app.push_error(ErrorCategory::Data, "a".into(), String::new());
        app.push_error(ErrorCategory::Data, "b".into(), String::new());

        handle_key(&mut app, press(KeyCode::Char('e')));
        assert_eq!(app.overlay, Overlay::ErrorHistory);
        handle_key(&mut app, press(KeyCode::Char('j')));
        handle_key(&mut app, press(KeyCode::Char('j')));
        assert_eq!(app.error_scroll, 1);
        handle_key(&mut app, press(KeyCode::Esc));
        assert_eq!(app.overlay, Overlay::None);
    }

    #[test]
    fn help_overlay_closes_on_any_key() {
        let (mut app, _cmds, _resp) = test_app();
        handle_key(&mut app, press(KeyCode::Char('?')));
        assert_eq!(app.overlay, Overlay::Help);
        handle_key(&mut app, press(KeyCode::Char('q')));
        assert_eq!(app.overlay, Overlay::None);
        assert!(app.running);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        fn any_key() -> impl Strategy<Value = KeyCode> {
            prop_oneof![
                proptest::char::range(' ', '~')
                    .prop_filter("not quit", |c| *c != 'q')
                    .prop_map(KeyCode::Char),
                Just(KeyCode::Backspace),
                Just(KeyCode::Tab),
                Just(KeyCode::Esc),
                Just(KeyCode::Up),
                Just(KeyCode::PageDown),
            ]
        }

        proptest! {
            #[test]
            fn date_buffers_stay_short(keys in proptest::collection::vec(any_key(), 0..60)) {
                let (mut app, _cmds, _resp) = test_app();
                for code in keys {
                    handle_key(&mut app, press(code));
                    app.overlay = Overlay::None;
                }
                prop_assert!(app.inputs.start.len() <= 10);
                prop_assert!(app.inputs.end.len() <= 10);
                prop_assert!(app.running);
            }
        }
    }
}
