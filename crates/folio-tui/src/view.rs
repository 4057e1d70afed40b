//! Page view model
//!
//! [`page_view`] turns session state into the rows of one page. It is a pure
//! function of the [`App`], the [`Content`] and the [`Theme`]: the same
//! inputs always produce an equal [`PageView`], and rendering a view has no
//! other inputs.

use folio_app::{App, Content, MENU_ITEMS, Page};
use ratatui::{
    style::Style,
    text::{Line, Span},
};

use crate::{logo, theme::Theme};

/// Widest content box, in columns.
pub const MAX_BOX_WIDTH: u16 = 70;

/// Columns between the terminal edge and the content box.
pub const BOX_MARGIN: u16 = 4;

/// Horizontal padding inside the content box.
pub const PADDING_X: u16 = 2;

/// Vertical padding inside the content box.
pub const PADDING_Y: u16 = 1;

const CURSOR: &str = "→ ";
const NO_CURSOR: &str = "  ";
const DETAIL_INDENT: &str = "    ";
const CONTACT_LABEL_WIDTH: usize = 12;

const MENU_HELP: &str = "↑/↓: navigate • enter: select • esc/backspace: menu • q: quit";
const LIST_HELP: &str = "↑/↓: browse • esc: back to menu";
const TEXT_HELP: &str = "esc: back to menu";

/// One row of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    /// Styled text.
    Text(Line<'static>),
    /// Text followed by a clickable link.
    Link {
        /// Text before the link.
        prefix: Line<'static>,
        /// Visible link text.
        label: String,
        /// Link target.
        url: String,
        /// Style of the visible text.
        style: Style,
    },
}

impl Row {
    fn blank() -> Self {
        Self::Text(Line::default())
    }

    fn styled(text: impl Into<String>, style: Style) -> Self {
        Self::Text(Line::from(Span::styled(text.into(), style)))
    }

    /// Display width in columns.
    pub fn width(&self) -> usize {
        match self {
            Self::Text(line) => line.width(),
            Self::Link { prefix, label, .. } => prefix.width() + Line::raw(label.as_str()).width(),
        }
    }

    /// Row as unstyled text, links shown by their label.
    pub fn plain(&self) -> String {
        let spans = match self {
            Self::Text(line) | Self::Link { prefix: line, .. } => &line.spans,
        };
        let mut text: String = spans.iter().map(|s| s.content.as_ref()).collect();
        if let Self::Link { label, .. } = self {
            text.push_str(label);
        }
        text
    }
}

/// Rows of one page, top to bottom.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageView {
    /// Rows in display order.
    pub rows: Vec<Row>,
}

impl PageView {
    /// Widest row, in columns.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Row::width).max().unwrap_or(0)
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// The page as unstyled text, one line per row.
    pub fn plain(&self) -> String {
        self.rows.iter().map(Row::plain).collect::<Vec<_>>().join("\n")
    }
}

/// Width available to page text for a terminal `cols` columns wide.
pub fn text_width(cols: u16) -> u16 {
    cols.saturating_sub(BOX_MARGIN).min(MAX_BOX_WIDTH).saturating_sub(PADDING_X * 2)
}

/// Build the view of the page `app` is on.
pub fn page_view(app: &App, content: &Content, theme: &Theme) -> PageView {
    let width = usize::from(text_width(app.terminal_size().0)).max(1);

    let mut rows = match app.page() {
        Page::Menu => menu(app, theme),
        Page::About => about(content, theme, width),
        Page::Projects => projects(app, content, theme, width),
        Page::Experience => experience(app, content, theme, width),
        Page::Contact => contact(content, theme),
    };

    let help = match app.page() {
        Page::Menu => MENU_HELP,
        Page::Projects | Page::Experience => LIST_HELP,
        Page::About | Page::Contact => TEXT_HELP,
    };
    rows.push(Row::blank());
    rows.extend(wrap(help, width, "", theme.help()));

    PageView { rows }
}

/// Title row followed by a blank row.
fn title(page: Page, theme: &Theme) -> Vec<Row> {
    vec![Row::styled(format!("━━━ {} ━━━", page.title()), theme.title()), Row::blank()]
}

/// Word-wrap `text` to `width` columns, prefixing every line with `indent`.
fn wrap(text: &str, width: usize, indent: &str, style: Style) -> Vec<Row> {
    let options = textwrap::Options::new(width.max(indent.len() + 1))
        .wrap_algorithm(textwrap::WrapAlgorithm::FirstFit)
        .initial_indent(indent)
        .subsequent_indent(indent);
    textwrap::wrap(text, options).into_iter().map(|line| Row::styled(line, style)).collect()
}

fn cursor(selected: bool) -> &'static str {
    if selected { CURSOR } else { NO_CURSOR }
}

fn menu(app: &App, theme: &Theme) -> Vec<Row> {
    let logo = logo::lines(app.sweep(), theme).into_iter();
    let mut rows: Vec<Row> = logo.map(|line| Row::Text(line.centered())).collect();
    rows.push(Row::blank());

    for (i, item) in MENU_ITEMS.iter().enumerate() {
        let selected = app.menu_cursor() == i;
        let style = if selected { theme.selected() } else { theme.normal() };
        rows.push(Row::styled(format!("{}{item}", cursor(selected)), style));
    }
    rows
}

fn about(content: &Content, theme: &Theme, width: usize) -> Vec<Row> {
    let mut rows = title(Page::About, theme);
    for (i, paragraph) in content.profile.about.iter().enumerate() {
        if i > 0 {
            rows.push(Row::blank());
        }
        rows.extend(wrap(paragraph, width, "", theme.normal()));
    }
    rows
}

fn projects(app: &App, content: &Content, theme: &Theme, width: usize) -> Vec<Row> {
    let mut rows = title(Page::Projects, theme);

    for (i, project) in content.projects.iter().enumerate() {
        let selected = app.project_cursor() == i;
        let style = if selected { theme.project_name() } else { theme.normal() };
        rows.push(Row::styled(format!("{}{}", cursor(selected), project.name), style));

        if selected {
            rows.extend(wrap(&project.description, width, DETAIL_INDENT, theme.subtle()));
            rows.extend(wrap(&project.tech, width, DETAIL_INDENT, theme.tech()));
            let url = project.url();
            rows.push(Row::Link {
                prefix: Line::raw(DETAIL_INDENT),
                label: url.clone(),
                url,
                style: theme.link(),
            });
        }
        rows.push(Row::blank());
    }
    rows.pop();
    rows
}

fn experience(app: &App, content: &Content, theme: &Theme, width: usize) -> Vec<Row> {
    let mut rows = title(Page::Experience, theme);

    for (i, entry) in content.experiences.iter().enumerate() {
        let selected = app.experience_cursor() == i;
        rows.push(Row::Text(Line::from(vec![
            Span::styled(cursor(selected), theme.normal()),
            Span::styled(entry.role.clone(), theme.selected()),
            Span::styled(" @ ", theme.normal()),
            Span::styled(entry.company.clone(), theme.company()),
        ])));
        rows.push(Row::styled(format!("{DETAIL_INDENT}{}", entry.period), theme.period()));

        if selected {
            rows.extend(wrap(&entry.description, width, DETAIL_INDENT, theme.normal()));
        }
        rows.push(Row::blank());
    }
    rows.pop();
    rows
}

fn contact(content: &Content, theme: &Theme) -> Vec<Row> {
    let mut rows = title(Page::Contact, theme);
    rows.push(Row::styled("Feel free to reach out!", theme.normal()));
    rows.push(Row::blank());

    for entry in &content.profile.contacts {
        rows.push(Row::Link {
            prefix: Line::styled(
                format!("  {:<CONTACT_LABEL_WIDTH$}", entry.label),
                theme.normal(),
            ),
            label: entry.display.clone(),
            url: entry.url.clone(),
            style: theme.link(),
        });
    }
    rows
}
