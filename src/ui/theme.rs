//! Page colors. Dark and light palettes, picked from settings or from the
//! terminal background.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::data::StockAlert;
use crate::settings::ThemeChoice;

/// Colors and styles shared by every widget on the page.
///
/// Build one with [`Theme::from_choice`]; [`Theme::auto_detect`] probes the
/// terminal.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights, links and the brand.
    pub highlight: Color,
    /// Color for expiring products.
    pub warning: Color,
    /// Color for low stock.
    pub critical: Color,
    /// Panel borders and the sidebar edge.
    pub border: Color,
    /// Table header and section titles.
    pub header: Style,
    /// Style for the focused input.
    pub focused: Style,
    /// Style for clickable buttons.
    pub button: Style,
    /// Style for buttons that cannot be pressed right now.
    pub button_disabled: Style,
    /// Style for the navigation bar.
    pub navbar: Style,
    pub border_type: BorderType,
}

impl Theme {
    /// Palette for dark backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            warning: Color::Yellow,
            critical: Color::Red,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            focused: Style::default().fg(Color::Black).bg(Color::Cyan),
            button: Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD),
            button_disabled: Style::default().fg(Color::Gray).bg(Color::DarkGray),
            navbar: Style::default().bg(Color::DarkGray).fg(Color::White),
            border_type: BorderType::Rounded,
        }
    }

    /// Palette for light backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            warning: Color::Yellow,
            critical: Color::Red,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            focused: Style::default().fg(Color::White).bg(Color::Blue),
            button: Style::default().fg(Color::White).bg(Color::Green).add_modifier(Modifier::BOLD),
            button_disabled: Style::default().fg(Color::DarkGray).bg(Color::Gray),
            navbar: Style::default().bg(Color::LightBlue).fg(Color::Black),
            border_type: BorderType::Rounded,
        }
    }

    /// Light palette when the terminal background is bright, dark otherwise.
    pub fn auto_detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Theme for a configured choice. Only `auto` probes the terminal.
    pub fn from_choice(choice: ThemeChoice) -> Self {
        match choice {
            ThemeChoice::Auto => Self::auto_detect(),
            ThemeChoice::Dark => Self::dark(),
            ThemeChoice::Light => Self::light(),
        }
    }

    /// Style for one notification line.
    pub fn alert_style(&self, alert: &StockAlert) -> Style {
        match alert {
            StockAlert::LowStock { .. } => {
                Style::default().fg(self.critical).add_modifier(Modifier::BOLD)
            }
            StockAlert::ExpiringSoon { .. } => Style::default().fg(self.warning),
        }
    }
}
