//! Clickable links
//!
//! ratatui measures an OSC 8 escape sequence as if every byte were a visible
//! column, which shifts the rest of the line. Links are therefore drawn in
//! two passes: the page render puts the plain label into the buffer and
//! marks those cells as skipped, then [`write_links`] writes the labels
//! wrapped in OSC 8 directly to the backend once the frame is flushed.

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{self, Attribute, Print, ResetColor, SetAttribute, SetForegroundColor},
};
use ratatui::style::{Color, Modifier, Style};

/// A link drawn on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSpan {
    /// Column of the first label cell.
    pub x: u16,
    /// Row of the label.
    pub y: u16,
    /// Visible text, already clipped to the content box.
    pub label: String,
    /// Link target.
    pub url: String,
    /// Style of the visible text.
    pub style: Style,
}

/// `label` wrapped in an OSC 8 hyperlink to `url`.
pub fn osc8(url: &str, label: &str) -> String {
    format!("\x1b]8;;{url}\x1b\\{label}\x1b]8;;\x1b\\")
}

/// Write every link at its position and flush `out`.
pub fn write_links<W: Write>(out: &mut W, links: &[LinkSpan]) -> io::Result<()> {
    for link in links {
        queue!(out, MoveTo(link.x, link.y), SetAttribute(Attribute::Reset))?;
        if let Some(fg) = link.style.fg {
            queue!(out, SetForegroundColor(crossterm_color(fg)))?;
        }
        for (modifier, attribute) in [
            (Modifier::BOLD, Attribute::Bold),
            (Modifier::ITALIC, Attribute::Italic),
            (Modifier::UNDERLINED, Attribute::Underlined),
        ] {
            if link.style.add_modifier.contains(modifier) {
                queue!(out, SetAttribute(attribute))?;
            }
        }
        queue!(
            out,
            Print(osc8(&link.url, &link.label)),
            SetAttribute(Attribute::Reset),
            ResetColor
        )?;
    }
    out.flush()
}

fn crossterm_color(color: Color) -> style::Color {
    match color {
        Color::Reset => style::Color::Reset,
        Color::Black => style::Color::Black,
        Color::Red => style::Color::DarkRed,
        Color::Green => style::Color::DarkGreen,
        Color::Yellow => style::Color::DarkYellow,
        Color::Blue => style::Color::DarkBlue,
        Color::Magenta => style::Color::DarkMagenta,
        Color::Cyan => style::Color::DarkCyan,
        Color::Gray => style::Color::Grey,
        Color::DarkGray => style::Color::DarkGrey,
        Color::LightRed => style::Color::Red,
        Color::LightGreen => style::Color::Green,
        Color::LightYellow => style::Color::Yellow,
        Color::LightBlue => style::Color::Blue,
        Color::LightMagenta => style::Color::Magenta,
        Color::LightCyan => style::Color::Cyan,
        Color::White => style::Color::White,
        Color::Indexed(i) => style::Color::AnsiValue(i),
        Color::Rgb(r, g, b) => style::Color::Rgb { r, g, b },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(url: &str, label: &str) -> LinkSpan {
        LinkSpan {
            x: 4,
            y: 2,
            label: label.to_owned(),
            url: url.to_owned(),
            style: Style::default().fg(Color::Rgb(1, 2, 3)).add_modifier(Modifier::BOLD),
        }
    }

    #[test]
    fn osc8_wraps_label() {
        assert_eq!(
            osc8("https://example.com", "example"),
            "\x1b]8;;https://example.com\x1b\\example\x1b]8;;\x1b\\"
        );
    }

    #[test]
    fn links_are_positioned_and_styled() {
        let mut out = Vec::new();
        write_links(&mut out, &[span("mailto:a@b.c", "a@b.c")]).unwrap();
        let out = String::from_utf8(out).unwrap();

        let cursor = out.find("\x1b[3;5H").unwrap();
        let color = out.find("\x1b[38;2;1;2;3m").unwrap();
        let link = out.find(&osc8("mailto:a@b.c", "a@b.c")).unwrap();
        assert!(cursor < color && color < link);
        assert!(out.contains("\x1b[1m"));
    }

    #[test]
    fn no_links_writes_nothing() {
        let mut out = Vec::new();
        write_links(&mut out, &[]).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn named_colors_map_to_ansi_brightness() {
        assert_eq!(crossterm_color(Color::Cyan), style::Color::DarkCyan);
        assert_eq!(crossterm_color(Color::LightCyan), style::Color::Cyan);
        assert_eq!(crossterm_color(Color::Indexed(42)), style::Color::AnsiValue(42));
    }
}
