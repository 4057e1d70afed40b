//! Scenario tests for page navigation.
//!
//! Each test replays what a visitor types and checks the resulting page and
//! cursor positions.

use folio_app::{App, AppAction, AppEvent, Content, KeyInput, Page};

/// Feed a sequence of keys, collecting every action produced.
fn type_keys(app: &mut App, keys: &[KeyInput]) -> Vec<AppAction> {
    keys.iter().flat_map(|&key| app.handle(AppEvent::Key(key))).collect()
}

#[test]
fn menu_down_twice_opens_experience_and_back_keeps_cursor() {
    let mut app = App::new(&Content::builtin());

    type_keys(&mut app, &[KeyInput::Down]);
    assert_eq!(app.menu_cursor(), 1);
    type_keys(&mut app, &[KeyInput::Down]);
    assert_eq!(app.menu_cursor(), 2);

    type_keys(&mut app, &[KeyInput::Enter]);
    assert_eq!(app.page(), Page::Experience);

    type_keys(&mut app, &[KeyInput::Esc]);
    assert_eq!(app.page(), Page::Menu);
    assert_eq!(app.menu_cursor(), 2);
}

#[test]
fn project_cursor_clamps_at_last_entry() {
    let content = Content::builtin();
    let mut app = App::new(&content);

    type_keys(&mut app, &[KeyInput::Down, KeyInput::Enter]);
    assert_eq!(app.page(), Page::Projects);

    let downs = vec![KeyInput::Down; content.projects.len()];
    let actions = type_keys(&mut app, &downs);

    assert_eq!(app.project_cursor(), content.projects.len() - 1);
    assert_eq!(actions.len(), content.projects.len() - 1, "last press is a no-op");
    assert!(actions.iter().all(|a| *a == AppAction::Render));
}

#[test]
fn returning_to_list_resumes_previous_entry() {
    let mut app = App::new(&Content::builtin());

    type_keys(&mut app, &[KeyInput::Char('j'), KeyInput::Char(' ')]);
    type_keys(&mut app, &[KeyInput::Char('j'), KeyInput::Char('j')]);
    assert_eq!(app.project_cursor(), 2);

    type_keys(&mut app, &[KeyInput::Backspace, KeyInput::Enter]);
    assert_eq!(app.page(), Page::Projects);
    assert_eq!(app.project_cursor(), 2);
}

#[test]
fn vi_and_arrow_keys_are_equivalent() {
    let mut arrows = App::new(&Content::builtin());
    let mut vi = App::new(&Content::builtin());

    type_keys(&mut arrows, &[KeyInput::Down, KeyInput::Down, KeyInput::Up, KeyInput::Enter]);
    type_keys(&mut vi, &[
        KeyInput::Char('j'),
        KeyInput::Char('j'),
        KeyInput::Char('k'),
        KeyInput::Char(' '),
    ]);

    assert_eq!(arrows, vi);
}

#[test]
fn full_tour_ends_with_quit() {
    let mut app = App::new(&Content::builtin());

    for _ in 0..4 {
        type_keys(&mut app, &[KeyInput::Enter]);
        assert_ne!(app.page(), Page::Menu);
        type_keys(&mut app, &[KeyInput::Char('q'), KeyInput::Down]);
        assert_eq!(app.page(), Page::Menu);
    }

    assert_eq!(app.menu_cursor(), 3);
    assert_eq!(type_keys(&mut app, &[KeyInput::Interrupt]), [AppAction::Quit]);
}
