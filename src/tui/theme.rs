//! Central theme configuration for the TUI.
//!
//! All colors and styles are defined here to maintain consistency.

use ratatui::style::{Color, Modifier, Style};

/// Theme configuration for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    // General UI
    pub border: Color,
    pub border_focused: Color,
    pub selection_indicator: Color,

    // Text
    pub text: Color,
    pub text_muted: Color,
    pub text_highlight: Color,

    // Feed
    pub post_title: Color,
    pub post_title_selected: Color,
    pub id: Color,
    pub timestamp: Color,
    pub separator: Color,

    // Rendered Markdown
    pub heading: Color,
    pub code: Color,
    pub link: Color,
    pub quote: Color,
    pub list_marker: Color,

    // Popups
    pub modal_border: Color,
    pub modal_border_alert: Color,
    pub modal_border_delete: Color,
    pub modal_cursor: Color,

    // Footer/Mode colors
    pub mode_normal: (Color, Color), // (bg, fg)
    pub mode_edit: (Color, Color),
    pub mode_delete: (Color, Color),
    pub mode_import: (Color, Color),
    pub mode_alert: (Color, Color),

    pub message: Color,
    pub help_key: Color,

    pub row_marker: &'static str,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            border: Color::DarkGray,
            border_focused: Color::Cyan,
            selection_indicator: Color::Cyan,

            text: Color::White,
            text_muted: Color::DarkGray,
            text_highlight: Color::Yellow,

            post_title: Color::White,
            post_title_selected: Color::Cyan,
            id: Color::DarkGray,
            timestamp: Color::Gray,
            separator: Color::DarkGray,

            heading: Color::Magenta,
            code: Color::Yellow,
            link: Color::Blue,
            quote: Color::Gray,
            list_marker: Color::Cyan,

            modal_border: Color::Cyan,
            modal_border_alert: Color::Yellow,
            modal_border_delete: Color::Red,
            modal_cursor: Color::Cyan,

            mode_normal: (Color::Blue, Color::White),
            mode_edit: (Color::Green, Color::Black),
            mode_delete: (Color::Red, Color::White),
            mode_import: (Color::Magenta, Color::White),
            mode_alert: (Color::Yellow, Color::Black),

            message: Color::Yellow,
            help_key: Color::Cyan,

            row_marker: "▌",
        }
    }
}

impl Theme {
    /// Border style for a pane, brighter when it has focus
    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.border_focused)
        } else {
            Style::default().fg(self.border)
        }
    }

    /// Title style for a post in the feed
    pub fn post_title_style(&self, selected: bool) -> Style {
        let color = if selected {
            self.post_title_selected
        } else {
            self.post_title
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    /// Heading style by level
    pub fn heading_style(&self, level: u8) -> Style {
        let style = Style::default()
            .fg(self.heading)
            .add_modifier(Modifier::BOLD);
        if level == 1 {
            style.add_modifier(Modifier::UNDERLINED)
        } else {
            style
        }
    }
}

static THEME: std::sync::OnceLock<Theme> = std::sync::OnceLock::new();

/// Get the current theme
pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}
