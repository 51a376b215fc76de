//! Theme system for the TUI.
//!
//! Provides semantic color roles that map to ratatui `Style` values.
//! The `ThemeVariant` enum selects between Dark and Light palettes.

use crate::feed::{Category, CategoryFilter};
use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// Theme Variant
// ============================================================================

/// Available theme variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    Dark,
    Light,
}

impl ThemeVariant {
    /// Parse a variant name from a string (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    /// Build the `ColorPalette` for this variant.
    pub fn palette(self) -> ColorPalette {
        match self {
            Self::Dark => ColorPalette::dark(),
            Self::Light => ColorPalette::light(),
        }
    }

    /// Cycle to the next variant: Dark → Light → Dark.
    pub fn next(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Human-readable name for status display.
    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }
}

// ============================================================================
// Color Palette: semantic roles to Style
// ============================================================================

/// A complete color palette mapping every semantic UI role to a `Style`.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    // -- Header --
    pub header_title: Style,
    pub header_subtitle: Style,
    pub read_badge: Style,

    // -- Tabs --
    pub tab_inactive: Style,

    // -- Feed cards --
    pub card_title: Style,
    pub card_selected: Style,
    pub card_meta: Style,
    pub card_detail: Style,
    pub card_loading: Style,
    pub card_error: Style,
    pub empty_state: Style,

    // -- Chrome --
    pub status_bar: Style,
    pub panel_border: Style,

    // -- Category accents --
    pub accent_all: Color,
    pub accent_tech: Color,
    pub accent_campus: Color,
    pub accent_sports: Color,
}

impl ColorPalette {
    fn dark() -> Self {
        Self {
            header_title: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            header_subtitle: Style::default().fg(Color::DarkGray),
            read_badge: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),

            tab_inactive: Style::default().fg(Color::Gray),

            card_title: Style::default().add_modifier(Modifier::BOLD),
            card_selected: Style::default().bg(Color::DarkGray).fg(Color::White),
            card_meta: Style::default().fg(Color::DarkGray),
            card_detail: Style::default().fg(Color::Gray),
            card_loading: Style::default().fg(Color::Yellow),
            card_error: Style::default().fg(Color::Red),
            empty_state: Style::default().fg(Color::DarkGray),

            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
            panel_border: Style::default().fg(Color::DarkGray),

            accent_all: Color::Cyan,
            accent_tech: Color::LightBlue,
            accent_campus: Color::LightMagenta,
            accent_sports: Color::LightRed,
        }
    }

    fn light() -> Self {
        Self {
            header_title: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            header_subtitle: Style::default().fg(Color::DarkGray),
            read_badge: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),

            tab_inactive: Style::default().fg(Color::DarkGray),

            card_title: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            card_selected: Style::default().bg(Color::Blue).fg(Color::White),
            card_meta: Style::default().fg(Color::DarkGray),
            card_detail: Style::default().fg(Color::Black),
            card_loading: Style::default().fg(Color::Magenta),
            card_error: Style::default().fg(Color::Red),
            empty_state: Style::default().fg(Color::DarkGray),

            status_bar: Style::default().bg(Color::White).fg(Color::Black),
            panel_border: Style::default().fg(Color::Gray),

            accent_all: Color::Cyan,
            accent_tech: Color::Blue,
            accent_campus: Color::Magenta,
            accent_sports: Color::Red,
        }
    }

    /// Accent color for an item's category.
    pub fn category_accent(&self, category: Category) -> Color {
        self.filter_accent(category.into())
    }

    /// Accent color for a filter tab.
    pub fn filter_accent(&self, filter: CategoryFilter) -> Color {
        match filter {
            CategoryFilter::All => self.accent_all,
            CategoryFilter::Tech => self.accent_tech,
            CategoryFilter::Campus => self.accent_campus,
            CategoryFilter::Sports => self.accent_sports,
        }
    }

    /// Style for the selected filter tab.
    pub fn tab_active(&self, filter: CategoryFilter) -> Style {
        Style::default()
            .bg(self.filter_accent(filter))
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    }
}

// ============================================================================
// Tests
// ============================================================================
