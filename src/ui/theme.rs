//! Centralized theming for the mailpane TUI
//!
//! Single source of truth for colors and styles.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;
use std::sync::RwLock;

use crate::config::ThemeVariant;

static THEME_VARIANT: RwLock<ThemeVariant> = RwLock::new(ThemeVariant::Dark);

/// Initialize the theme variant (call once at startup)
pub fn init_theme(variant: ThemeVariant) {
    if let Ok(mut guard) = THEME_VARIANT.write() {
        *guard = variant;
    }
}

pub fn current_theme() -> ThemeVariant {
    THEME_VARIANT.read().map(|g| *g).unwrap_or_default()
}

pub mod borders {
    use super::*;

    pub fn popup() -> BorderType {
        match current_theme() {
            ThemeVariant::Dark => BorderType::Rounded,
            ThemeVariant::HighContrast => BorderType::Double,
        }
    }

    pub fn input_focused() -> BorderType {
        match current_theme() {
            ThemeVariant::Dark => BorderType::Rounded,
            ThemeVariant::HighContrast => BorderType::Thick,
        }
    }

    pub fn panel() -> BorderType {
        BorderType::Plain
    }
}

/// Colors that vary by theme
pub mod colors {
    use super::*;

    pub fn bg_selection() -> Color {
        match current_theme() {
            ThemeVariant::Dark => Color::Rgb(69, 71, 90),
            ThemeVariant::HighContrast => Color::LightBlue,
        }
    }

    pub fn bg_status() -> Color {
        match current_theme() {
            ThemeVariant::Dark => Color::DarkGray,
            ThemeVariant::HighContrast => Color::Black,
        }
    }

    pub fn bg_error() -> Color {
        Color::Red
    }

    pub fn fg_primary() -> Color {
        Color::White
    }

    pub fn fg_secondary() -> Color {
        match current_theme() {
            ThemeVariant::Dark => Color::Gray,
            ThemeVariant::HighContrast => Color::White,
        }
    }

    pub fn fg_muted() -> Color {
        match current_theme() {
            ThemeVariant::Dark => Color::DarkGray,
            ThemeVariant::HighContrast => Color::Gray,
        }
    }

    pub fn fg_accent() -> Color {
        match current_theme() {
            ThemeVariant::Dark => Color::Cyan,
            ThemeVariant::HighContrast => Color::LightCyan,
        }
    }

    pub fn fg_warning() -> Color {
        match current_theme() {
            ThemeVariant::Dark => Color::Yellow,
            ThemeVariant::HighContrast => Color::LightYellow,
        }
    }

    pub fn unread_indicator() -> Color {
        match current_theme() {
            ThemeVariant::Dark => Color::Magenta,
            ThemeVariant::HighContrast => Color::LightMagenta,
        }
    }

    pub fn border() -> Color {
        match current_theme() {
            ThemeVariant::Dark => Color::DarkGray,
            ThemeVariant::HighContrast => Color::White,
        }
    }

    pub fn border_focused() -> Color {
        match current_theme() {
            ThemeVariant::Dark => Color::Cyan,
            ThemeVariant::HighContrast => Color::Yellow,
        }
    }

    pub fn success() -> Color {
        match current_theme() {
            ThemeVariant::Dark => Color::Green,
            ThemeVariant::HighContrast => Color::LightGreen,
        }
    }

    pub fn bg_help() -> Color {
        Color::Reset
    }
}

pub mod symbols {
    pub const UNREAD: &str = "●";
    pub const READ: &str = " ";
    pub const IDLE: &str = "●";
}

/// Pre-composed styles for common UI elements
pub struct Theme;

impl Theme {
    pub fn selected() -> Style {
        Style::default()
            .bg(colors::bg_selection())
            .fg(colors::fg_primary())
    }

    pub fn text() -> Style {
        Style::default().fg(colors::fg_primary())
    }

    pub fn text_secondary() -> Style {
        Style::default().fg(colors::fg_secondary())
    }

    pub fn text_muted() -> Style {
        Style::default().fg(colors::fg_muted())
    }

    pub fn text_unread() -> Style {
        Style::default()
            .fg(colors::fg_primary())
            .add_modifier(Modifier::BOLD)
    }

    pub fn heading() -> Style {
        Style::default()
            .fg(colors::fg_accent())
            .add_modifier(Modifier::BOLD)
    }

    // === Status Bar ===

    pub fn status_bar() -> Style {
        Style::default()
            .bg(colors::bg_status())
            .fg(colors::fg_primary())
    }

    pub fn error_bar() -> Style {
        Style::default()
            .bg(colors::bg_error())
            .fg(colors::fg_primary())
    }

    pub fn status_idle() -> Style {
        Style::default()
            .bg(colors::bg_status())
            .fg(colors::success())
    }

    pub fn status_busy() -> Style {
        Style::default()
            .bg(colors::bg_status())
            .fg(colors::fg_warning())
    }

    pub fn status_info() -> Style {
        Style::default()
            .bg(colors::bg_status())
            .fg(colors::fg_secondary())
    }

    // === Help Bar ===

    pub fn help_key() -> Style {
        Style::default()
            .bg(colors::bg_help())
            .fg(colors::fg_warning())
    }

    pub fn help_desc() -> Style {
        Style::default()
            .bg(colors::bg_help())
            .fg(colors::fg_muted())
    }

    // === Borders ===

    pub fn border() -> Style {
        Style::default().fg(colors::border())
    }

    pub fn border_focused() -> Style {
        Style::default().fg(colors::border_focused())
    }

    pub fn unread_indicator() -> Style {
        Style::default().fg(colors::unread_indicator())
    }

    /// Field labels in headers and the composer
    pub fn label() -> Style {
        Style::default()
            .fg(colors::fg_muted())
            .add_modifier(Modifier::BOLD)
    }

    /// Action buttons in the detail panel
    pub fn button() -> Style {
        Style::default()
            .fg(colors::fg_accent())
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    }
}

/// Apply the selection background when the row is selected
pub fn with_selection_bg(style: Style, selected: bool) -> Style {
    if selected {
        style.bg(colors::bg_selection())
    } else {
        style
    }
}
