//! Application layer for folio
//!
//! Pure state machine and static content for the SSH portfolio. Nothing in
//! this crate performs I/O, so the same code that serves a remote session can
//! be driven directly from tests.
//!
//! # Components
//!
//! - [`App`]: per-session page state machine (cursors, page, terminal size)
//! - [`Content`]: immutable profile, project and experience tables
//! - [`AppEvent`] / [`AppAction`]: inputs and outputs of [`App::handle`]
//! - [`KeyInput`]: terminal-agnostic keyboard input

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
mod content;
mod event;
mod input;
mod page;

pub use action::AppAction;
pub use app::App;
pub use content::{Contact, Content, Experience, Profile, Project};
pub use event::AppEvent;
pub use input::{Binding, KeyInput};
pub use page::{MENU_ITEMS, Page};
