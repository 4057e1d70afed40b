//! Application input events.
//!
//! This module defines [`AppEvent`], the complete set of inputs that drive the
//! [`crate::App`] state machine. All of them originate from the session's
//! terminal: keystrokes, size reports and the animation timer.

use crate::KeyInput;

/// Events processed by the App state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// Keyboard input.
    Key(KeyInput),

    /// Animation timer fired.
    Tick,

    /// Terminal resize (columns, rows).
    Resize(u16, u16),
}
