use ratatui::style::{Color, Modifier, Style};

/// Color scheme for the table binding
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    pub foreground: Color,
    pub background: Color,
    pub border: Color,
    pub border_focused: Color,

    pub header_fg: Color,
    pub cursor_fg: Color,
    pub cursor_bg: Color,
    pub row_alt_bg: Color,
    pub selected_marker: Color,

    pub muted: Color,
    pub error: Color,
}

impl Theme {
    /// Default dark theme
    pub fn dark() -> Self {
        Self {
            name: "Dark".to_string(),
            foreground: Color::Gray,
            background: Color::Reset,
            border: Color::DarkGray,
            border_focused: Color::Cyan,
            header_fg: Color::Cyan,
            cursor_fg: Color::Black,
            cursor_bg: Color::Cyan,
            row_alt_bg: Color::Rgb(25, 25, 35),
            selected_marker: Color::Green,
            muted: Color::DarkGray,
            error: Color::Red,
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            name: "Light".to_string(),
            foreground: Color::Black,
            background: Color::White,
            border: Color::Gray,
            border_focused: Color::Blue,
            header_fg: Color::Blue,
            cursor_fg: Color::White,
            cursor_bg: Color::Blue,
            row_alt_bg: Color::Rgb(245, 245, 245),
            selected_marker: Color::Green,
            muted: Color::Gray,
            error: Color::Red,
        }
    }

    /// Look up a theme by its config name; unknown names fall back to dark
    pub fn by_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }

    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.header_fg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn cursor_style(&self) -> Style {
        Style::default()
            .fg(self.cursor_fg)
            .bg(self.cursor_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn normal_style(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.background)
    }

    pub fn alt_row_style(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.row_alt_bg)
    }

    pub fn selected_marker_style(&self) -> Style {
        Style::default().fg(self.selected_marker)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn focused_border_style(&self) -> Style {
        Style::default().fg(self.border_focused)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn error_style(&self) -> Style {
        Style::default()
            .fg(self.error)
            .add_modifier(Modifier::BOLD)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
