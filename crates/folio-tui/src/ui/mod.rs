//! UI rendering
//!
//! Draws the current [`PageView`] centered in the terminal. Rendering is pure:
//! it only writes into the frame buffer, and returns the links the caller
//! overlays afterwards with [`write_links`].

mod hyperlink;

pub use hyperlink::{LinkSpan, osc8, write_links};

use folio_app::{App, Content};
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Rect},
    widgets::{Block, Borders, Padding, Widget},
};

use crate::{
    theme::Theme,
    view::{self, PADDING_X, PADDING_Y, PageView, Row},
};

/// Render the page `app` is on.
pub fn render(frame: &mut Frame, app: &App, content: &Content, theme: &Theme) -> Vec<LinkSpan> {
    let area = frame.area();
    render_buffer(frame.buffer_mut(), area, app, content, theme)
}

/// Render the page `app` is on into `buf`.
///
/// `area` is clipped to the buffer and to the terminal size the session last
/// reported.
pub fn render_buffer(
    buf: &mut Buffer,
    area: Rect,
    app: &App,
    content: &Content,
    theme: &Theme,
) -> Vec<LinkSpan> {
    let (cols, rows) = app.terminal_size();
    let area = area.intersection(buf.area).intersection(Rect::new(area.x, area.y, cols, rows));
    let view = view::page_view(app, content, theme);
    draw(&view, theme, area, buf)
}

/// Content box for `view`, centered in `area`.
pub fn content_box(view: &PageView, theme: &Theme, area: Rect) -> Rect {
    let border = if theme.border.is_some() { 2 } else { 0 };
    let rows = u16::try_from(view.height()).unwrap_or(u16::MAX);

    let width = (view::text_width(area.width) + 2 * PADDING_X + border).min(area.width);
    let height = rows.saturating_add(2 * PADDING_Y + border).min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn draw(view: &PageView, theme: &Theme, area: Rect, buf: &mut Buffer) -> Vec<LinkSpan> {
    let outer = content_box(view, theme, area);
    let mut block = Block::default().padding(Padding::symmetric(PADDING_X, PADDING_Y));
    if let Some(border) = theme.border {
        block = block.borders(Borders::ALL).border_type(border).border_style(theme.border());
    }
    let inner = block.inner(outer);
    block.render(outer, buf);

    let mut links = Vec::new();
    for (row, y) in view.rows.iter().zip(inner.top()..inner.bottom()) {
        match row {
            Row::Text(line) => {
                let x = match line.alignment {
                    Some(Alignment::Center) => {
                        let width = u16::try_from(line.width()).unwrap_or(u16::MAX);
                        inner.x + inner.width.saturating_sub(width) / 2
                    },
                    _ => inner.x,
                };
                buf.set_line(x, y, line, inner.right() - x);
            },
            Row::Link { prefix, label, url, style } => {
                let (x, _) = buf.set_line(inner.x, y, prefix, inner.width);
                let room = usize::from(inner.right().saturating_sub(x));
                let label: String = label.chars().take(room).collect();
                if label.is_empty() {
                    continue;
                }

                let (end, _) = buf.set_stringn(x, y, &label, room, *style);
                for cx in x..end {
                    if let Some(cell) = buf.cell_mut((cx, y)) {
                        cell.set_skip(true);
                    }
                }
                links.push(LinkSpan { x, y, label, url: url.clone(), style: *style });
            },
        }
    }
    links
}
