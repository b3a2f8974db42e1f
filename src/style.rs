use ratatui::style::{Color, Modifier, Style as RatStyle};
use serde::Deserialize;

use crate::mode::Mode;
use crate::notify::NotificationKind;

/// Color as written in config: a name, `[r, g, b]`, or a 256-color index
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ThemeColor {
    Named(NamedColor),
    Rgb([u8; 3]),
    Indexed(u8),
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamedColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    Gray,
    DarkGray,
    LightRed,
    LightGreen,
    LightYellow,
    LightBlue,
    LightCyan,
    White,
    Reset,
}

impl From<ThemeColor> for Color {
    fn from(tc: ThemeColor) -> Color {
        match tc {
            ThemeColor::Named(n) => match n {
                NamedColor::Black => Color::Black,
                NamedColor::Red => Color::Red,
                NamedColor::Green => Color::Green,
                NamedColor::Yellow => Color::Yellow,
                NamedColor::Blue => Color::Blue,
                NamedColor::Magenta => Color::Magenta,
                NamedColor::Cyan => Color::Cyan,
                NamedColor::Gray => Color::Gray,
                NamedColor::DarkGray => Color::DarkGray,
                NamedColor::LightRed => Color::LightRed,
                NamedColor::LightGreen => Color::LightGreen,
                NamedColor::LightYellow => Color::LightYellow,
                NamedColor::LightBlue => Color::LightBlue,
                NamedColor::LightCyan => Color::LightCyan,
                NamedColor::White => Color::White,
                NamedColor::Reset => Color::Reset,
            },
            ThemeColor::Rgb([r, g, b]) => Color::Rgb(r, g, b),
            ThemeColor::Indexed(i) => Color::Indexed(i),
        }
    }
}

/// Style definition for a single element
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ElementStyle {
    pub fg: Option<ThemeColor>,
    pub bg: Option<ThemeColor>,
    pub bold: bool,
    pub dim: bool,
}

impl ElementStyle {
    pub fn fg(color: NamedColor) -> Self {
        Self { fg: Some(ThemeColor::Named(color)), ..Default::default() }
    }

    pub fn with_bg(mut self, color: NamedColor) -> Self {
        self.bg = Some(ThemeColor::Named(color));
        self
    }

    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn with_dim(mut self) -> Self {
        self.dim = true;
        self
    }

    pub fn to_ratatui(&self) -> RatStyle {
        let mut style = RatStyle::default();
        if let Some(fg) = self.fg {
            style = style.fg(fg.into());
        }
        if let Some(bg) = self.bg {
            style = style.bg(bg.into());
        }
        if self.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.dim {
            style = style.add_modifier(Modifier::DIM);
        }
        style
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    pub name: String,
    pub background: Option<ThemeColor>,

    pub cell: ElementStyle,
    pub cell_cursor: ElementStyle,
    pub header: ElementStyle,
    pub header_sorted: ElementStyle,

    pub status_bar: ElementStyle,
    pub status_mode_normal: ElementStyle,
    pub status_mode_search: ElementStyle,
    pub status_mode_command: ElementStyle,
    pub status_mode_form: ElementStyle,
    pub filter_status: ElementStyle,
    pub counter: ElementStyle,

    pub command_line: ElementStyle,
    pub command_prompt: ElementStyle,

    pub notify_success: ElementStyle,
    pub notify_error: ElementStyle,
    pub notify_warning: ElementStyle,
    pub notify_info: ElementStyle,

    pub modal_border: ElementStyle,
    pub modal_label: ElementStyle,
    pub form_focus: ElementStyle,
    pub form_error: ElementStyle,
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

impl Theme {
    pub fn dark() -> Self {
        use NamedColor::*;
        Self {
            name: "dark".to_string(),
            background: Some(ThemeColor::Named(Black)),
            cell: ElementStyle::fg(White),
            cell_cursor: ElementStyle::fg(Black).with_bg(LightCyan).with_bold(),
            header: ElementStyle::fg(LightGreen).with_bold(),
            header_sorted: ElementStyle::fg(LightYellow).with_bold(),
            status_bar: ElementStyle::fg(White).with_bg(DarkGray),
            status_mode_normal: ElementStyle::fg(Black).with_bg(LightBlue).with_bold(),
            status_mode_search: ElementStyle::fg(Black).with_bg(LightGreen).with_bold(),
            status_mode_command: ElementStyle::fg(Black).with_bg(LightYellow).with_bold(),
            status_mode_form: ElementStyle::fg(Black).with_bg(LightRed).with_bold(),
            filter_status: ElementStyle::fg(LightCyan).with_bold(),
            counter: ElementStyle::fg(LightYellow),
            command_line: ElementStyle::fg(White),
            command_prompt: ElementStyle::fg(LightCyan),
            notify_success: ElementStyle::fg(Black).with_bg(LightGreen),
            notify_error: ElementStyle::fg(White).with_bg(Red).with_bold(),
            notify_warning: ElementStyle::fg(Black).with_bg(LightYellow),
            notify_info: ElementStyle::fg(Black).with_bg(LightBlue),
            modal_border: ElementStyle::fg(LightCyan),
            modal_label: ElementStyle::fg(LightGreen).with_bold(),
            form_focus: ElementStyle::fg(Black).with_bg(LightCyan),
            form_error: ElementStyle::fg(LightRed),
        }
    }

    /// Light theme (default)
    pub fn light() -> Self {
        use NamedColor::*;
        Self {
            name: "light".to_string(),
            background: None, // Use terminal default
            cell: ElementStyle::fg(Black),
            cell_cursor: ElementStyle::fg(White).with_bg(Blue).with_bold(),
            header: ElementStyle::fg(Blue).with_bold(),
            header_sorted: ElementStyle::fg(Magenta).with_bold(),
            status_bar: ElementStyle::fg(Black).with_bg(Gray),
            status_mode_normal: ElementStyle::fg(White).with_bg(Blue).with_bold(),
            status_mode_search: ElementStyle::fg(White).with_bg(Green).with_bold(),
            status_mode_command: ElementStyle::fg(Black).with_bg(Yellow).with_bold(),
            status_mode_form: ElementStyle::fg(White).with_bg(Magenta).with_bold(),
            filter_status: ElementStyle::fg(Blue).with_bold(),
            counter: ElementStyle::fg(Black).with_bold(),
            command_line: ElementStyle::fg(Black),
            command_prompt: ElementStyle::fg(Blue),
            notify_success: ElementStyle::fg(White).with_bg(Green),
            notify_error: ElementStyle::fg(White).with_bg(Red).with_bold(),
            notify_warning: ElementStyle::fg(Black).with_bg(Yellow),
            notify_info: ElementStyle::fg(White).with_bg(Blue),
            modal_border: ElementStyle::fg(Blue),
            modal_label: ElementStyle::fg(DarkGray).with_bold(),
            form_focus: ElementStyle::fg(White).with_bg(Blue),
            form_error: ElementStyle::fg(Red).with_dim(),
        }
    }

    /// Get theme by name
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "dark" => Some(Self::dark()),
            "light" => Some(Self::light()),
            _ => None,
        }
    }
}

/// Runtime style manager
#[derive(Debug, Clone, Default)]
pub struct Style {
    pub theme: Theme,
}

impl Style {
    pub fn with_theme(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn cell(&self) -> RatStyle {
        self.theme.cell.to_ratatui()
    }

    pub fn cell_cursor(&self) -> RatStyle {
        self.theme.cell_cursor.to_ratatui()
    }

    pub fn header(&self, sorted: bool) -> RatStyle {
        if sorted {
            self.theme.header_sorted.to_ratatui()
        } else {
            self.theme.header.to_ratatui()
        }
    }

    pub fn status_bar(&self) -> RatStyle {
        self.theme.status_bar.to_ratatui()
    }

    pub fn status_mode(&self, mode: Mode) -> RatStyle {
        match mode {
            Mode::Normal => self.theme.status_mode_normal.to_ratatui(),
            Mode::Search => self.theme.status_mode_search.to_ratatui(),
            Mode::Command => self.theme.status_mode_command.to_ratatui(),
            Mode::Form => self.theme.status_mode_form.to_ratatui(),
        }
    }

    pub fn filter_status(&self) -> RatStyle {
        self.theme.filter_status.to_ratatui()
    }

    pub fn counter(&self) -> RatStyle {
        self.theme.counter.to_ratatui()
    }

    pub fn command_line(&self) -> RatStyle {
        self.theme.command_line.to_ratatui()
    }

    pub fn command_prompt(&self) -> RatStyle {
        self.theme.command_prompt.to_ratatui()
    }

    pub fn notification(&self, kind: NotificationKind) -> RatStyle {
        match kind {
            NotificationKind::Success => self.theme.notify_success.to_ratatui(),
            NotificationKind::Error => self.theme.notify_error.to_ratatui(),
            NotificationKind::Warning => self.theme.notify_warning.to_ratatui(),
            NotificationKind::Info => self.theme.notify_info.to_ratatui(),
        }
    }

    pub fn modal_border(&self) -> RatStyle {
        self.theme.modal_border.to_ratatui()
    }

    pub fn modal_label(&self) -> RatStyle {
        self.theme.modal_label.to_ratatui()
    }

    pub fn form_focus(&self) -> RatStyle {
        self.theme.form_focus.to_ratatui()
    }

    pub fn form_error(&self) -> RatStyle {
        self.theme.form_error.to_ratatui()
    }

    pub fn background(&self) -> Option<Color> {
        self.theme.background.map(|c| c.into())
    }
}
