//! Terminal-agnostic keyboard input.

/// Keyboard input abstraction.
///
/// Decouples application logic from the byte encoding used by the remote
/// terminal, so the state machine can be driven directly in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Printable character.
    Char(char),
    /// Enter/Return key.
    Enter,
    /// Backspace key.
    Backspace,
    /// Escape key.
    Esc,
    /// Ctrl-C.
    Interrupt,
    /// Tab key.
    Tab,
    /// Left arrow key.
    Left,
    /// Right arrow key.
    Right,
    /// Up arrow key.
    Up,
    /// Down arrow key.
    Down,
    /// Home key.
    Home,
    /// End key.
    End,
}

/// Logical bindings the pages react to.
///
/// Several physical keys map to each binding (arrows and vi keys, Enter and
/// Space, Esc and Backspace).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// Move the cursor up.
    Up,
    /// Move the cursor down.
    Down,
    /// Open the highlighted menu entry.
    Select,
    /// Return to the menu.
    Back,
    /// Return to the menu, or end the session from the menu.
    Quit,
}

impl KeyInput {
    /// Logical binding for this key. `None` for keys no page reacts to.
    pub fn binding(self) -> Option<Binding> {
        match self {
            Self::Up | Self::Char('k') => Some(Binding::Up),
            Self::Down | Self::Char('j') => Some(Binding::Down),
            Self::Enter | Self::Char(' ') => Some(Binding::Select),
            Self::Esc | Self::Backspace => Some(Binding::Back),
            Self::Interrupt | Self::Char('q') => Some(Binding::Quit),
            _ => None,
        }
    }
}
