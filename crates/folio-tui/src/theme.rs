//! Color themes
//!
//! A [`Theme`] is built once at startup and shared by every session. It
//! bundles the palette, the box border and the logo animation style, which
//! are the only things that differ between the built-in presets.

use std::{fmt, str::FromStr};

use ratatui::{
    style::{Color, Modifier, Style},
    widgets::BorderType,
};
use thiserror::Error;

/// Colors by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Primary text.
    pub fg: Color,
    /// Muted and help text.
    pub muted: Color,
    /// Titles, logo glyphs and borders.
    pub title: Color,
    /// Links and company names.
    pub link: Color,
    /// Highlighted entries.
    pub selected: Color,
    /// Tech-stack labels.
    pub tech: Color,
    /// Logo snake.
    pub snake: Color,
}

/// How the menu logo is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoStyle {
    /// A highlighted segment runs around the logo on every tick.
    Snake,
    /// Plain logo, no animation.
    Static,
}

/// Built-in theme presets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThemeName {
    /// Tokyo Night colors, borderless.
    #[default]
    TokyoNight,
    /// Kanagawa colors in a rounded box.
    Kanagawa,
    /// 16-color ANSI palette with a plain box and a static logo.
    Mono,
}

/// Unrecognized theme name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown theme '{0}' (expected tokyo-night, kanagawa or mono)")]
pub struct UnknownTheme(pub String);

impl ThemeName {
    /// All presets, in the order they are listed in help text.
    pub const ALL: [Self; 3] = [Self::TokyoNight, Self::Kanagawa, Self::Mono];

    /// Name accepted on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TokyoNight => "tokyo-night",
            Self::Kanagawa => "kanagawa",
            Self::Mono => "mono",
        }
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeName {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownTheme(s.to_owned()))
    }
}

/// Immutable rendering configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Preset this theme was built from.
    pub name: ThemeName,
    /// Colors by role.
    pub palette: Palette,
    /// Border around the content box. `None` for a borderless box.
    pub border: Option<BorderType>,
    /// Menu logo style.
    pub logo: LogoStyle,
}

impl Theme {
    /// Build a preset.
    pub fn preset(name: ThemeName) -> Self {
        match name {
            ThemeName::TokyoNight => Self {
                name,
                palette: Palette {
                    fg: Color::from_u32(0x00C0_CAF5),
                    muted: Color::from_u32(0x0056_5F89),
                    title: Color::from_u32(0x007A_A2F7),
                    link: Color::from_u32(0x007D_CFFF),
                    selected: Color::from_u32(0x00BB_9AF7),
                    tech: Color::from_u32(0x009E_CE6A),
                    snake: Color::from_u32(0x009E_C5FF),
                },
                border: None,
                logo: LogoStyle::Snake,
            },
            ThemeName::Kanagawa => Self {
                name,
                palette: Palette {
                    fg: Color::from_u32(0x00DC_D7BA),
                    muted: Color::from_u32(0x0072_7169),
                    title: Color::from_u32(0x0095_7FB8),
                    link: Color::from_u32(0x007E_9CD8),
                    selected: Color::from_u32(0x0098_BB6C),
                    tech: Color::from_u32(0x00FF_A066),
                    snake: Color::from_u32(0x007A_A89F),
                },
                border: Some(BorderType::Rounded),
                logo: LogoStyle::Snake,
            },
            ThemeName::Mono => Self {
                name,
                palette: Palette {
                    fg: Color::White,
                    muted: Color::DarkGray,
                    title: Color::Blue,
                    link: Color::Cyan,
                    selected: Color::Magenta,
                    tech: Color::Green,
                    snake: Color::LightBlue,
                },
                border: Some(BorderType::Plain),
                logo: LogoStyle::Static,
            },
        }
    }

    /// Page titles.
    pub fn title(&self) -> Style {
        Style::default().fg(self.palette.title).add_modifier(Modifier::BOLD)
    }

    /// Unselected list entries.
    pub fn normal(&self) -> Style {
        Style::default().fg(self.palette.fg)
    }

    /// Highlighted list entries and roles.
    pub fn selected(&self) -> Style {
        Style::default().fg(self.palette.selected).add_modifier(Modifier::BOLD)
    }

    /// Help footer.
    pub fn help(&self) -> Style {
        Style::default().fg(self.palette.muted)
    }

    /// Descriptions under a highlighted project.
    pub fn subtle(&self) -> Style {
        Style::default().fg(self.palette.muted)
    }

    /// Clickable links.
    pub fn link(&self) -> Style {
        Style::default().fg(self.palette.link).add_modifier(Modifier::BOLD)
    }

    /// Highlighted project name.
    pub fn project_name(&self) -> Style {
        Style::default().fg(self.palette.title).add_modifier(Modifier::BOLD)
    }

    /// Tech-stack labels.
    pub fn tech(&self) -> Style {
        Style::default().fg(self.palette.tech)
    }

    /// Company names.
    pub fn company(&self) -> Style {
        Style::default().fg(self.palette.link)
    }

    /// Employment periods.
    pub fn period(&self) -> Style {
        Style::default().fg(self.palette.muted).add_modifier(Modifier::ITALIC)
    }

    /// Logo glyphs.
    pub fn logo(&self) -> Style {
        Style::default().fg(self.palette.title).add_modifier(Modifier::BOLD)
    }

    /// Logo snake cells.
    pub fn snake(&self) -> Style {
        Style::default().fg(self.palette.snake).add_modifier(Modifier::BOLD)
    }

    /// Content box border.
    pub fn border(&self) -> Style {
        Style::default().fg(self.palette.title)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::preset(ThemeName::default())
    }
}
