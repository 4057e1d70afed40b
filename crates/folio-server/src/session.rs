//! Per-session runtime.
//!
//! Each SSH session owns one [`App`] and one ratatui [`Terminal`]. The runtime
//! takes events one at a time, from the connection handler (input bytes and
//! size reports) and from the animation timer, feeds them to the state
//! machine and carries out the returned actions.

use std::{sync::Arc, time::Duration};

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen},
};
use folio_app::{App, AppAction, AppEvent, Content};
use folio_tui::{Theme, ui};
use ratatui::Terminal;
use tokio::{sync::mpsc, time::MissedTickBehavior};

use crate::{
    SessionError,
    terminal::{ChannelWriter, RemoteBackend},
};

/// Logo animation period.
pub const TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Terminal size assumed until the client reports one.
pub const DEFAULT_SIZE: (u16, u16) = (80, 24);

/// Largest terminal size a session draws, as (columns, rows).
pub const MAX_SIZE: (u16, u16) = (512, 256);

/// Free output slots a frame needs before it is drawn.
const FRAME_HEADROOM: usize = 8;

/// Input events queued per session before the handler waits.
pub const EVENT_QUEUE: usize = 32;

/// Content and theme shared read-only by every session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Portfolio {
    /// What the pages show.
    pub content: Content,
    /// How the pages look.
    pub theme: Theme,
}

/// Input from the connection handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Raw bytes typed by the client.
    Input(Vec<u8>),
    /// New terminal size as (columns, rows).
    Resize(u16, u16),
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The visitor quit from the menu.
    Quit,
    /// The connection went away first.
    Disconnected,
}

/// Client terminal size limited to [`MAX_SIZE`].
pub fn bounded_size((cols, rows): (u16, u16)) -> (u16, u16) {
    (cols.min(MAX_SIZE.0), rows.min(MAX_SIZE.1))
}

/// Event loop for one session.
pub struct SessionRuntime {
    app: App,
    terminal: Terminal<RemoteBackend<ChannelWriter>>,
    portfolio: Arc<Portfolio>,
    stale: bool,
}

impl SessionRuntime {
    /// Create a session for a terminal of `size` (columns, rows).
    pub fn new(
        writer: ChannelWriter,
        portfolio: Arc<Portfolio>,
        size: (u16, u16),
    ) -> Result<Self, SessionError> {
        let size = bounded_size(size);
        let mut app = App::new(&portfolio.content);
        app.handle(AppEvent::Resize(size.0, size.1));

        let terminal = Terminal::new(RemoteBackend::new(writer, size))?;

        Ok(Self { app, terminal, portfolio, stale: false })
    }

    /// Session state.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Run until the visitor quits or `events` closes.
    ///
    /// On quit the alternate screen is left before returning. On disconnect
    /// nothing more is written.
    pub async fn run(
        mut self,
        mut events: mpsc::Receiver<SessionEvent>,
        tick: Duration,
    ) -> Result<SessionEnd, SessionError> {
        execute!(self.terminal.backend_mut(), EnterAlternateScreen)?;
        self.terminal.clear()?;
        self.render()?;

        let mut ticker = tokio::time::interval(tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        ticker.tick().await;

        loop {
            let actions = tokio::select! {
                event = events.recv() => match event {
                    Some(event) => self.handle(event)?,
                    None => return Ok(SessionEnd::Disconnected),
                },
                _ = ticker.tick() => {
                    let mut actions = self.app.handle(AppEvent::Tick);
                    if self.stale && actions.is_empty() {
                        actions.push(AppAction::Render);
                    }
                    actions
                },
            };

            if self.process_actions(&actions)? {
                break;
            }
        }

        self.terminal.show_cursor()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        Ok(SessionEnd::Quit)
    }

    /// Feed one event to the state machine.
    ///
    /// Keys after a quit in the same read are dropped.
    fn handle(&mut self, event: SessionEvent) -> Result<Vec<AppAction>, SessionError> {
        match event {
            SessionEvent::Input(bytes) => {
                let mut actions = Vec::new();
                for key in folio_tui::decode(&bytes) {
                    let key_actions = self.app.handle(AppEvent::Key(key));
                    let quit = key_actions.contains(&AppAction::Quit);
                    actions.extend(key_actions);
                    if quit {
                        break;
                    }
                }
                Ok(actions)
            },
            SessionEvent::Resize(cols, rows) => {
                let size = bounded_size((cols, rows));
                self.terminal.backend_mut().set_size(size);
                self.terminal.autoresize()?;
                Ok(self.app.handle(AppEvent::Resize(size.0, size.1)))
            },
        }
    }

    /// Carry out actions, rendering at most once.
    ///
    /// Returns `true` if the session should end.
    fn process_actions(&mut self, actions: &[AppAction]) -> Result<bool, SessionError> {
        if actions.contains(&AppAction::Quit) {
            return Ok(true);
        }
        if actions.contains(&AppAction::Render) {
            self.render()?;
        }
        Ok(false)
    }

    /// Draw the current page.
    ///
    /// While the client is not reading, frames are skipped. Once output was
    /// lost the next frame repaints the whole screen.
    fn render(&mut self) -> Result<(), SessionError> {
        if self.terminal.backend().writer().capacity() < FRAME_HEADROOM {
            self.stale = true;
            return Ok(());
        }
        if self.stale {
            self.terminal.clear()?;
            self.stale = false;
        }

        let (app, portfolio) = (&self.app, &self.portfolio);
        let mut links = Vec::new();
        self.terminal.draw(|frame| {
            links = ui::render(frame, app, &portfolio.content, &portfolio.theme);
        })?;
        ui::write_links(self.terminal.backend_mut(), &links)?;

        if self.terminal.backend_mut().writer_mut().take_dropped() {
            self.stale = true;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use folio_app::Page;
    use proptest::prelude::*;
    use ratatui::layout::Rect;

    use super::*;

    const ENTER_ALT_SCREEN: &str = "\x1b[?1049h";
    const LEAVE_ALT_SCREEN: &str = "\x1b[?1049l";
    const CLEAR_ALL: &str = "\x1b[2J";

    fn runtime_sized(size: (u16, u16)) -> (SessionRuntime, mpsc::Receiver<Vec<u8>>) {
        let (writer, chunks) = ChannelWriter::new();
        let runtime = SessionRuntime::new(writer, Arc::new(Portfolio::default()), size)
            .expect("remote backend needs no terminal queries");
        (runtime, chunks)
    }

    fn runtime() -> (SessionRuntime, mpsc::Receiver<Vec<u8>>) {
        runtime_sized(DEFAULT_SIZE)
    }

    fn drain(chunks: &mut mpsc::Receiver<Vec<u8>>) -> String {
        let mut output = Vec::new();
        while let Ok(chunk) = chunks.try_recv() {
            output.extend(chunk);
        }
        String::from_utf8_lossy(&output).into_owned()
    }

    /// Run a session over `inputs`, closing the event channel afterwards.
    async fn run_session(inputs: &[&[u8]]) -> (SessionEnd, String) {
        let (runtime, mut chunks) = runtime();
        let (tx, rx) = mpsc::channel(EVENT_QUEUE);
        for input in inputs {
            tx.try_send(SessionEvent::Input(input.to_vec())).unwrap();
        }
        drop(tx);

        let end = runtime.run(rx, Duration::from_secs(3600)).await.unwrap();
        (end, drain(&mut chunks))
    }

    #[tokio::test]
    async fn quit_from_menu_leaves_alternate_screen() {
        let (end, output) = run_session(&[b"q"]).await;

        assert_eq!(end, SessionEnd::Quit);
        assert!(output.starts_with(ENTER_ALT_SCREEN));
        assert!(output.contains(CLEAR_ALL));
        assert!(output.contains(LEAVE_ALT_SCREEN));
    }

    #[tokio::test]
    async fn disconnect_writes_no_teardown() {
        let (end, output) = run_session(&[b"j"]).await;

        assert_eq!(end, SessionEnd::Disconnected);
        assert!(output.contains("Projects"));
        assert!(!output.contains(LEAVE_ALT_SCREEN));
    }

    #[tokio::test]
    async fn q_on_a_page_returns_to_menu() {
        let (end, _) = run_session(&[b"\r", b"q"]).await;
        assert_eq!(end, SessionEnd::Disconnected);
    }

    #[tokio::test]
    async fn contact_page_emits_hyperlinks() {
        let (_, output) = run_session(&[b"jjj\r"]).await;

        let github = "https://github.com/JoeS51";
        assert!(output.contains(&ui::osc8(github, github)));
        assert!(output.contains(&ui::osc8("mailto:joesluis51@gmail.com", "joesluis51@gmail.com")));
    }

    #[tokio::test]
    async fn keys_after_quit_are_ignored() {
        let (end, output) = run_session(&[b"q\x1b[B"]).await;

        assert_eq!(end, SessionEnd::Quit);
        assert!(output.ends_with(LEAVE_ALT_SCREEN));
    }

    #[tokio::test]
    async fn layout_follows_client_size() {
        let (mut runtime, mut chunks) = runtime_sized((120, 40));
        assert_eq!(runtime.terminal.get_frame().area(), Rect::new(0, 0, 120, 40));

        let (tx, rx) = mpsc::channel(EVENT_QUEUE);
        tx.try_send(SessionEvent::Input(b"q".to_vec())).unwrap();

        let end = runtime.run(rx, Duration::from_secs(3600)).await.unwrap();

        assert_eq!(end, SessionEnd::Quit);
        // Help footer row of the menu box, centered for 120x40.
        assert!(drain(&mut chunks).contains("\x1b[30;28H"));
    }

    #[test]
    fn resize_updates_app_and_viewport() {
        let (mut runtime, _chunks) = runtime();

        let actions = runtime.handle(SessionEvent::Resize(100, 30)).unwrap();

        assert_eq!(actions, [AppAction::Render]);
        assert_eq!(runtime.app().terminal_size(), (100, 30));
        assert_eq!(runtime.terminal.get_frame().area(), Rect::new(0, 0, 100, 30));
    }

    #[test]
    fn oversized_terminal_is_bounded() {
        let (mut runtime, _chunks) = runtime_sized((u16::MAX, u16::MAX));
        assert_eq!(runtime.app().terminal_size(), MAX_SIZE);

        runtime.handle(SessionEvent::Resize(u16::MAX, u16::MAX)).unwrap();

        let (cols, rows) = MAX_SIZE;
        assert_eq!(runtime.app().terminal_size(), MAX_SIZE);
        assert_eq!(runtime.terminal.get_frame().area(), Rect::new(0, 0, cols, rows));
    }

    #[test]
    fn input_is_decoded_in_order() {
        let (mut runtime, _chunks) = runtime();

        let actions = runtime.handle(SessionEvent::Input(b"\x1b[B\x1b[B\r".to_vec())).unwrap();

        assert_eq!(actions, [AppAction::Render; 3]);
        assert_eq!(runtime.app().page(), Page::Experience);
    }

    #[test]
    fn stalled_client_skips_frames_then_repaints() {
        let (mut runtime, mut chunks) = runtime();

        for i in 0..500 {
            let key: &[u8] = if i % 2 == 0 { b"j" } else { b"k" };
            let actions = runtime.handle(SessionEvent::Input(key.to_vec())).unwrap();
            runtime.process_actions(&actions).unwrap();
        }

        assert!(runtime.stale);
        assert!(runtime.terminal.backend().writer().capacity() < FRAME_HEADROOM);
        let queued = drain(&mut chunks);
        assert!(!queued.is_empty());

        runtime.render().unwrap();

        assert!(!runtime.stale);
        assert!(drain(&mut chunks).contains(CLEAR_ALL));
    }

    proptest! {
        #[test]
        fn prop_arbitrary_input_keeps_session_usable(
            reads in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..32), 0..16),
        ) {
            let (mut runtime, _chunks) = runtime();

            for read in reads {
                let actions = runtime.handle(SessionEvent::Input(read)).unwrap();
                if runtime.process_actions(&actions).unwrap() {
                    prop_assert_eq!(runtime.app().page(), Page::Menu);
                    break;
                }
            }
        }
    }
}
