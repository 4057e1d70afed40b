//! Terminal presentation for folio
//!
//! Everything between the [`folio_app::App`] state machine and the bytes
//! sent to a remote terminal: decoding keys, building page views, themes,
//! the animated logo and drawing with ratatui.
//!
//! This crate performs no network I/O. Rendering writes into a ratatui
//! buffer, and the only direct terminal output is the link overlay written
//! by [`ui::write_links`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod input;
pub mod logo;
pub mod theme;
pub mod ui;
pub mod view;

pub use input::decode;
pub use theme::{Theme, ThemeName, UnknownTheme};
pub use ui::{LinkSpan, render, render_buffer, write_links};
pub use view::{PageView, Row, page_view};
