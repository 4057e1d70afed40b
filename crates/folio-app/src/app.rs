//! Application state machine.
//!
//! This module defines the [`App`] state machine, which holds the interactive
//! state of one SSH session completely decoupled from I/O.
//!
//! This is a pure state machine: it consumes [`crate::AppEvent`] inputs and
//! produces [`crate::AppAction`] instructions for the runtime to execute.
//!
//! # Responsibilities
//!
//! - Tracks the current page and one cursor per browsable list.
//! - Stores terminal dimensions to handle resize events.
//! - Advances the logo sweep while the menu is displayed.

use crate::{AppAction, AppEvent, Binding, Content, MENU_ITEMS, Page};

/// Terminal size assumed until the client reports its own.
const DEFAULT_TERMINAL_SIZE: (u16, u16) = (80, 24);

/// Per-session state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable without a terminal.
///
/// Cursors are clamped to their list bounds and survive page changes, so
/// returning to a list resumes at the previously highlighted entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct App {
    /// Page currently displayed.
    page: Page,
    /// Highlighted menu entry.
    menu_cursor: usize,
    /// Highlighted project.
    project_cursor: usize,
    /// Highlighted experience entry.
    experience_cursor: usize,
    /// Length of the project list the cursor is clamped to.
    project_count: usize,
    /// Length of the experience list the cursor is clamped to.
    experience_count: usize,
    /// Terminal dimensions (columns, rows).
    terminal_size: (u16, u16),
    /// Logo animation counter.
    sweep: usize,
}

impl App {
    /// Create a session positioned on the menu, sized for `content`.
    pub fn new(content: &Content) -> Self {
        Self {
            page: Page::Menu,
            menu_cursor: 0,
            project_cursor: 0,
            experience_cursor: 0,
            project_count: content.projects.len(),
            experience_count: content.experiences.len(),
            terminal_size: DEFAULT_TERMINAL_SIZE,
            sweep: 0,
        }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Key(key) => key.binding().map_or_else(Vec::new, |b| self.apply(b)),
            AppEvent::Tick => {
                if self.page == Page::Menu {
                    self.sweep = self.sweep.wrapping_add(1);
                    vec![AppAction::Render]
                } else {
                    vec![]
                }
            },
            AppEvent::Resize(cols, rows) => {
                self.terminal_size = (cols, rows);
                vec![AppAction::Render]
            },
        }
    }

    /// Apply a logical key binding to the current page.
    fn apply(&mut self, binding: Binding) -> Vec<AppAction> {
        match binding {
            Binding::Quit if self.page == Page::Menu => vec![AppAction::Quit],
            Binding::Quit | Binding::Back => self.navigate(Page::Menu),
            Binding::Select => {
                if self.page != Page::Menu {
                    return vec![];
                }
                Page::from_menu_index(self.menu_cursor)
                    .map_or_else(Vec::new, |page| self.navigate(page))
            },
            Binding::Up | Binding::Down => {
                let down = binding == Binding::Down;
                let moved = match self.page {
                    Page::Menu => step(&mut self.menu_cursor, MENU_ITEMS.len(), down),
                    Page::Projects => step(&mut self.project_cursor, self.project_count, down),
                    Page::Experience => {
                        step(&mut self.experience_cursor, self.experience_count, down)
                    },
                    Page::About | Page::Contact => false,
                };
                if moved { vec![AppAction::Render] } else { vec![] }
            },
        }
    }

    /// Switch to `page`. No actions if already there.
    fn navigate(&mut self, page: Page) -> Vec<AppAction> {
        if self.page == page {
            return vec![];
        }
        tracing::debug!(from = ?self.page, to = ?page, "page changed");
        self.page = page;
        vec![AppAction::Render]
    }

    /// Page currently displayed.
    pub fn page(&self) -> Page {
        self.page
    }

    /// Highlighted menu entry.
    pub fn menu_cursor(&self) -> usize {
        self.menu_cursor
    }

    /// Highlighted project.
    pub fn project_cursor(&self) -> usize {
        self.project_cursor
    }

    /// Highlighted experience entry.
    pub fn experience_cursor(&self) -> usize {
        self.experience_cursor
    }

    /// Terminal dimensions (columns, rows).
    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    /// Logo animation counter.
    pub fn sweep(&self) -> usize {
        self.sweep
    }
}

/// Move `cursor` one entry within `[0, len)`. Returns whether it moved.
fn step(cursor: &mut usize, len: usize, down: bool) -> bool {
    let last = len.saturating_sub(1);
    let next = if down { cursor.saturating_add(1).min(last) } else { cursor.saturating_sub(1) };
    let moved = next != *cursor;
    *cursor = next;
    moved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::KeyInput;

    fn press(app: &mut App, key: KeyInput) -> Vec<AppAction> {
        app.handle(AppEvent::Key(key))
    }

    #[test]
    fn starts_on_menu_with_default_size() {
        let app = App::new(&Content::builtin());

        assert_eq!(app.page(), Page::Menu);
        assert_eq!(app.menu_cursor(), 0);
        assert_eq!(app.terminal_size(), (80, 24));
    }

    #[test]
    fn quit_on_menu_ends_session() {
        let mut app = App::new(&Content::builtin());

        assert_eq!(press(&mut app, KeyInput::Char('q')), [AppAction::Quit]);
        assert_eq!(press(&mut app, KeyInput::Interrupt), [AppAction::Quit]);
        assert_eq!(app.page(), Page::Menu);
    }

    #[test]
    fn quit_off_menu_returns_to_menu() {
        let mut app = App::new(&Content::builtin());
        press(&mut app, KeyInput::Enter);
        assert_eq!(app.page(), Page::About);

        assert_eq!(press(&mut app, KeyInput::Char('q')), [AppAction::Render]);
        assert_eq!(app.page(), Page::Menu);
    }

    #[test]
    fn back_on_menu_is_noop() {
        let mut app = App::new(&Content::builtin());
        let before = app.clone();

        assert!(press(&mut app, KeyInput::Esc).is_empty());
        assert!(press(&mut app, KeyInput::Backspace).is_empty());
        assert_eq!(app, before);
    }

    #[test]
    fn select_off_menu_is_noop() {
        let mut app = App::new(&Content::builtin());
        press(&mut app, KeyInput::Down);
        press(&mut app, KeyInput::Enter);
        assert_eq!(app.page(), Page::Projects);

        assert!(press(&mut app, KeyInput::Char(' ')).is_empty());
        assert_eq!(app.page(), Page::Projects);
    }

    #[test]
    fn arrows_ignored_on_text_pages() {
        let mut app = App::new(&Content::builtin());
        press(&mut app, KeyInput::Enter);

        assert!(press(&mut app, KeyInput::Down).is_empty());
        assert!(press(&mut app, KeyInput::Char('k')).is_empty());
        assert_eq!(app.menu_cursor(), 0);
    }

    #[test]
    fn tick_only_animates_menu() {
        let mut app = App::new(&Content::builtin());

        assert_eq!(app.handle(AppEvent::Tick), [AppAction::Render]);
        assert_eq!(app.sweep(), 1);

        press(&mut app, KeyInput::Enter);
        assert!(app.handle(AppEvent::Tick).is_empty());
        assert_eq!(app.sweep(), 1);
    }

    #[test]
    fn resize_keeps_page_and_cursors() {
        let mut app = App::new(&Content::builtin());
        press(&mut app, KeyInput::Down);
        press(&mut app, KeyInput::Enter);
        press(&mut app, KeyInput::Down);

        let actions = app.handle(AppEvent::Resize(120, 40));

        assert_eq!(actions, [AppAction::Render]);
        assert_eq!(app.terminal_size(), (120, 40));
        assert_eq!(app.page(), Page::Projects);
        assert_eq!(app.menu_cursor(), 1);
        assert_eq!(app.project_cursor(), 1);
    }

    #[test]
    fn unbound_key_changes_nothing() {
        let mut app = App::new(&Content::builtin());
        let before = app.clone();

        assert!(press(&mut app, KeyInput::Char('x')).is_empty());
        assert!(press(&mut app, KeyInput::Tab).is_empty());
        assert_eq!(app, before);
    }

    #[test]
    fn empty_list_pins_cursor() {
        let mut content = Content::builtin();
        content.projects.clear();
        let mut app = App::new(&content);
        press(&mut app, KeyInput::Down);
        press(&mut app, KeyInput::Enter);

        assert!(press(&mut app, KeyInput::Down).is_empty());
        assert!(press(&mut app, KeyInput::Up).is_empty());
        assert_eq!(app.project_cursor(), 0);
    }

    #[test]
    fn step_clamps_both_ends() {
        let mut cursor = 0;
        assert!(!step(&mut cursor, 3, false));
        assert!(step(&mut cursor, 3, true));
        assert!(step(&mut cursor, 3, true));
        assert!(!step(&mut cursor, 3, true));
        assert_eq!(cursor, 2);
    }
}
