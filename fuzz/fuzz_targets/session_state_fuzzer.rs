//! Fuzz target for the session state machine and renderer
//!
//! Ensure navigation invariants and render purity under arbitrary input (HIGH priority)
//!
//! # Strategy
//!
//! - Key bytes: arbitrary reads pushed through the decoder
//! - Resizes: zero, tiny and oversized terminals
//! - Ticks: interleaved with input
//!
//! # Invariants
//!
//! - Cursors stay within their lists
//! - Back from any page lands on the menu with cursors unchanged
//! - Rendering the same state twice gives identical buffers and links

#![no_main]

use arbitrary::Arbitrary;
use folio_app::{App, AppEvent, Content, KeyInput, MENU_ITEMS, Page};
use folio_tui::{Theme, ThemeName, render_buffer};
use libfuzzer_sys::fuzz_target;
use ratatui::{buffer::Buffer, layout::Rect};

#[derive(Debug, Clone, Arbitrary)]
enum SessionOp {
    Input(Vec<u8>),
    Resize { cols: u8, rows: u8 },
    Tick,
    Back,
}

#[derive(Debug, Clone, Arbitrary)]
struct Session {
    theme: u8,
    ops: Vec<SessionOp>,
}

fuzz_target!(|session: Session| {
    let content = Content::builtin();
    let theme = Theme::preset(ThemeName::ALL[usize::from(session.theme) % ThemeName::ALL.len()]);
    let mut app = App::new(&content);

    for op in session.ops {
        match op {
            SessionOp::Input(bytes) => {
                for key in folio_tui::decode(&bytes) {
                    app.handle(AppEvent::Key(key));
                }
            },
            SessionOp::Resize { cols, rows } => {
                app.handle(AppEvent::Resize(u16::from(cols), u16::from(rows)));
            },
            SessionOp::Tick => {
                app.handle(AppEvent::Tick);
            },
            SessionOp::Back => {
                let cursors = (app.menu_cursor(), app.project_cursor(), app.experience_cursor());
                app.handle(AppEvent::Key(KeyInput::Esc));
                assert_eq!(app.page(), Page::Menu);
                assert_eq!(
                    cursors,
                    (app.menu_cursor(), app.project_cursor(), app.experience_cursor())
                );
            },
        }

        assert!(app.menu_cursor() < MENU_ITEMS.len());
        assert!(app.project_cursor() < content.projects.len().max(1));
        assert!(app.experience_cursor() < content.experiences.len().max(1));
    }

    let (cols, rows) = app.terminal_size();
    let area = Rect::new(0, 0, cols, rows);
    let mut first = Buffer::empty(area);
    let mut second = Buffer::empty(area);
    let links_first = render_buffer(&mut first, area, &app, &content, &theme);
    let links_second = render_buffer(&mut second, area, &app, &content, &theme);

    assert_eq!(first, second);
    assert_eq!(links_first, links_second);
});
