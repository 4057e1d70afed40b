//! Animated menu logo
//!
//! The logo is padded by one blank cell on every side. A short "snake" runs
//! along the border of the padded grid, one cell per tick, without ever
//! covering the art itself.

use ratatui::{
    style::Style,
    text::{Line, Span},
};

use crate::theme::{LogoStyle, Theme};

/// ASCII art shown above the menu.
pub const LOGO: [&str; 11] = [
    r"             __       __           __      ",
    r"            /\ \     /\ \         /\ \    ",
    r"            \ \ \   /  \ \       /  \ \   ",
    r"            /\ \_\ / /\ \ \     / /\ \ \  ",
    r"           / /\/_// / /\ \ \   / / /\ \_\ ",
    r"  __      / / /  / / /  \ \_\ / /_/_ \/_/ ",
    r" /\ \    / / /  / / /   / / // /____/\    ",
    r" \ \_\  / / /  / / /   / / // /\____\/    ",
    r" / / /_/ / /  / / /___/ / // / /______    ",
    r"/ / /__\/ /  / / /____\/ // / /_______\   ",
    r"\/_______/   \/_________/ \/__________/   ",
];

/// Cells of padding around the art.
pub const PADDING: usize = 1;

/// Cells covered by the snake.
pub const SNAKE_LENGTH: usize = 14;

/// Glyph drawn for snake cells.
pub const SNAKE_GLYPH: char = '•';

/// One cell of the padded logo grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    /// Empty cell.
    Blank,
    /// Part of the art.
    Glyph(char),
    /// Covered by the snake.
    Snake,
}

/// Border cells of a `width` x `height` grid as `(x, y)`, clockwise from the
/// top-left corner.
///
/// Every border cell appears exactly once: the top edge left to right, the
/// right edge downwards, the bottom edge right to left and the left edge
/// upwards.
pub fn perimeter(width: usize, height: usize) -> Vec<(usize, usize)> {
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let mut path = Vec::with_capacity(2 * width + 2 * height);
    path.extend((0..width).map(|x| (x, 0)));
    path.extend((1..height.saturating_sub(1)).map(|y| (width - 1, y)));
    if height > 1 {
        path.extend((0..width).rev().map(|x| (x, height - 1)));
    }
    if width > 1 {
        path.extend((1..height.saturating_sub(1)).rev().map(|y| (0, y)));
    }
    path
}

/// Padded grid for animation step `sweep`.
///
/// With [`LogoStyle::Static`] the snake is omitted.
pub fn grid(art: &[&str], sweep: usize, style: LogoStyle) -> Vec<Vec<Cell>> {
    let art_width = art.iter().map(|line| line.chars().count()).max().unwrap_or(0);
    if art.is_empty() || art_width == 0 {
        return Vec::new();
    }

    let width = art_width + PADDING * 2;
    let height = art.len() + PADDING * 2;
    let mut grid = vec![vec![Cell::Blank; width]; height];

    for (row, line) in grid.iter_mut().skip(PADDING).zip(art) {
        for (cell, ch) in row.iter_mut().skip(PADDING).zip(line.chars()) {
            if ch != ' ' {
                *cell = Cell::Glyph(ch);
            }
        }
    }

    if style == LogoStyle::Snake {
        let path = perimeter(width, height);
        let start = sweep % path.len();
        for i in 0..SNAKE_LENGTH.min(path.len()) {
            let (x, y) = path[(start + i) % path.len()];
            grid[y][x] = Cell::Snake;
        }
    }

    grid
}

/// Styled lines of the logo for animation step `sweep`.
///
/// Adjacent cells with the same style are merged into one span.
pub fn lines(sweep: usize, theme: &Theme) -> Vec<Line<'static>> {
    grid(&LOGO, sweep, theme.logo)
        .into_iter()
        .map(|row| {
            let mut spans: Vec<Span<'static>> = Vec::new();
            let mut run = String::new();
            let mut run_style = Style::default();

            for cell in row {
                let (ch, style) = match cell {
                    Cell::Blank => (' ', Style::default()),
                    Cell::Glyph(ch) => (ch, theme.logo()),
                    Cell::Snake => (SNAKE_GLYPH, theme.snake()),
                };
                if style != run_style && !run.is_empty() {
                    spans.push(Span::styled(std::mem::take(&mut run), run_style));
                }
                run_style = style;
                run.push(ch);
            }
            if !run.is_empty() {
                spans.push(Span::styled(run, run_style));
            }
            Line::from(spans)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn snake_cells(grid: &[Vec<Cell>]) -> usize {
        grid.iter().flatten().filter(|c| **c == Cell::Snake).count()
    }

    #[test]
    fn perimeter_visits_each_border_cell_once() {
        let (w, h) = (7, 4);
        let path = perimeter(w, h);
        let unique: HashSet<_> = path.iter().copied().collect();

        assert_eq!(path.len(), 2 * w + 2 * h - 4);
        assert_eq!(unique.len(), path.len());
        assert!(path.iter().all(|&(x, y)| x == 0 || y == 0 || x == w - 1 || y == h - 1));
    }

    #[test]
    fn perimeter_is_clockwise_from_origin() {
        let path = perimeter(3, 3);
        assert_eq!(path, [(0, 0), (1, 0), (2, 0), (2, 1), (2, 2), (1, 2), (0, 2), (0, 1)]);
    }

    #[test]
    fn perimeter_degenerate_grids() {
        assert!(perimeter(0, 5).is_empty());
        assert_eq!(perimeter(4, 1), [(0, 0), (1, 0), (2, 0), (3, 0)]);
        assert_eq!(perimeter(1, 3), [(0, 0), (0, 1), (0, 2)]);
    }

    #[test]
    fn snake_never_covers_art() {
        let theme_grid = grid(&LOGO, 0, LogoStyle::Static);
        for sweep in 0..200 {
            let animated = grid(&LOGO, sweep, LogoStyle::Snake);
            assert_eq!(snake_cells(&animated), SNAKE_LENGTH);
            for (a, b) in animated.iter().flatten().zip(theme_grid.iter().flatten()) {
                if let Cell::Glyph(_) = b {
                    assert_eq!(a, b);
                }
            }
        }
    }

    #[test]
    fn snake_wraps_around_path() {
        let art = ["ab"];
        let path_len = perimeter(4, 3).len();

        assert_eq!(grid(&art, 0, LogoStyle::Snake), grid(&art, path_len, LogoStyle::Snake));
        assert_eq!(snake_cells(&grid(&art, 3, LogoStyle::Snake)), path_len);
    }

    #[test]
    fn static_logo_has_no_snake() {
        assert_eq!(snake_cells(&grid(&LOGO, 42, LogoStyle::Static)), 0);
    }

    #[test]
    fn lines_have_padded_width() {
        let theme = Theme::default();
        let width = LOGO.iter().map(|l| l.chars().count()).max().unwrap_or(0);

        let lines = lines(5, &theme);

        assert_eq!(lines.len(), LOGO.len() + 2 * PADDING);
        assert!(lines.iter().all(|l| l.width() == width + 2 * PADDING));
    }
}
