//! Pages a session can display.

/// Labels of the menu entries, in display order.
///
/// Entry `i` opens [`Page::from_menu_index`]`(i)`.
pub const MENU_ITEMS: [&str; 4] = ["About", "Projects", "Experience", "Contact"];

/// One of the five views of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Page {
    /// Landing menu with the animated logo.
    #[default]
    Menu,
    /// Free-form introduction text.
    About,
    /// Browsable project list.
    Projects,
    /// Browsable work history.
    Experience,
    /// Contact links.
    Contact,
}

impl Page {
    /// Page opened by the menu entry at `index`. `None` past the last entry.
    pub fn from_menu_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::About),
            1 => Some(Self::Projects),
            2 => Some(Self::Experience),
            3 => Some(Self::Contact),
            _ => None,
        }
    }

    /// Heading shown at the top of the page. Empty for the menu, which shows
    /// the logo instead.
    pub fn title(self) -> &'static str {
        match self {
            Self::Menu => "",
            Self::About => "About Me",
            Self::Projects => "Projects",
            Self::Experience => "Experience",
            Self::Contact => "Contact",
        }
    }
}
