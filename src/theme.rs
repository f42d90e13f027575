//! Theme system for the TUI.
//!
//! `ThemeVariant` selects a Dark or Light `ColorPalette`; `StyleMap` resolves
//! role names to concrete styles. Category buttons additionally take their
//! accent colour from [`category_color`].

use crate::catalog::CategoryKind;
use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;

// ============================================================================
// Theme Variant
// ============================================================================

/// Available theme variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeVariant {
    #[default]
    Dark,
    Light,
}

impl ThemeVariant {
    /// Parse a variant name (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    pub fn palette(self) -> ColorPalette {
        match self {
            Self::Dark => ColorPalette::dark(),
            Self::Light => ColorPalette::light(),
        }
    }

    /// Dark → Light → Dark.
    pub fn next(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }
}

// ============================================================================
// Color Palette
// ============================================================================

/// Every semantic UI role mapped to a `Style`.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    // -- Header --
    pub heading: Style,
    pub search_text: Style,
    pub search_placeholder: Style,
    pub favourites_toggle: Style,
    pub favourites_toggle_active: Style,

    // -- Category buttons --
    pub category_button: Style,
    pub category_button_selected: Style,
    pub category_cursor: Style,

    // -- Cards --
    pub card_name: Style,
    pub card_ordinal: Style,
    pub card_border: Style,
    pub card_border_selected: Style,
    pub card_favourite: Style,
    pub card_not_favourite: Style,

    // -- Chrome --
    pub status_bar: Style,
    pub panel_border: Style,
    pub panel_border_focused: Style,
    pub help_key: Style,
}

impl ColorPalette {
    fn dark() -> Self {
        Self {
            heading: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            search_text: Style::default().fg(Color::White),
            search_placeholder: Style::default().fg(Color::DarkGray),
            favourites_toggle: Style::default().fg(Color::Gray),
            favourites_toggle_active: Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),

            category_button: Style::default().fg(Color::Gray),
            category_button_selected: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            category_cursor: Style::default().add_modifier(Modifier::UNDERLINED),

            card_name: Style::default().add_modifier(Modifier::BOLD),
            card_ordinal: Style::default().fg(Color::DarkGray),
            card_border: Style::default().fg(Color::DarkGray),
            card_border_selected: Style::default().fg(Color::Cyan),
            card_favourite: Style::default().fg(Color::Red),
            card_not_favourite: Style::default().fg(Color::DarkGray),

            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
            panel_border: Style::default(),
            panel_border_focused: Style::default().fg(Color::Cyan),
            help_key: Style::default().fg(Color::Cyan),
        }
    }

    fn light() -> Self {
        Self {
            heading: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            search_text: Style::default().fg(Color::Black),
            search_placeholder: Style::default().fg(Color::DarkGray),
            favourites_toggle: Style::default().fg(Color::DarkGray),
            favourites_toggle_active: Style::default()
                .fg(Color::White)
                .bg(Color::Magenta)
                .add_modifier(Modifier::BOLD),

            category_button: Style::default().fg(Color::DarkGray),
            category_button_selected: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            category_cursor: Style::default().add_modifier(Modifier::UNDERLINED),

            card_name: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            card_ordinal: Style::default().fg(Color::DarkGray),
            card_border: Style::default().fg(Color::Gray),
            card_border_selected: Style::default().fg(Color::Blue),
            card_favourite: Style::default().fg(Color::Red),
            card_not_favourite: Style::default().fg(Color::Gray),

            status_bar: Style::default().bg(Color::White).fg(Color::Black),
            panel_border: Style::default().fg(Color::DarkGray),
            panel_border_focused: Style::default().fg(Color::Blue),
            help_key: Style::default().fg(Color::Blue),
        }
    }
}

/// Accent colour for a category button. Shared by both variants.
pub fn category_color(kind: CategoryKind) -> Color {
    match kind {
        CategoryKind::Normal => Color::Rgb(168, 167, 122),
        CategoryKind::Fighting => Color::Rgb(194, 46, 40),
        CategoryKind::Flying => Color::Rgb(169, 143, 243),
        CategoryKind::Poison => Color::Rgb(163, 62, 161),
        CategoryKind::Ground => Color::Rgb(226, 191, 101),
        CategoryKind::Rock => Color::Rgb(182, 161, 54),
        CategoryKind::Bug => Color::Rgb(166, 185, 26),
        CategoryKind::Ghost => Color::Rgb(115, 87, 151),
        CategoryKind::Steel => Color::Rgb(183, 183, 206),
        CategoryKind::Fire => Color::Rgb(238, 129, 48),
        CategoryKind::Water => Color::Rgb(99, 144, 240),
        CategoryKind::Grass => Color::Rgb(122, 199, 76),
        CategoryKind::Electric => Color::Rgb(247, 208, 44),
        CategoryKind::Psychic => Color::Rgb(249, 85, 135),
        CategoryKind::Ice => Color::Rgb(150, 217, 214),
        CategoryKind::Dragon => Color::Rgb(111, 53, 252),
        CategoryKind::Dark => Color::Rgb(112, 87, 70),
        CategoryKind::Fairy => Color::Rgb(214, 133, 173),
    }
}

// ============================================================================
// Style Map
// ============================================================================

/// String-keyed style lookup built from a `ColorPalette`.
#[derive(Debug, Clone)]
pub struct StyleMap {
    map: HashMap<&'static str, Style>,
}

/// All semantic role names, in declaration order.
const ROLE_NAMES: [&str; 18] = [
    "heading",
    "search_text",
    "search_placeholder",
    "favourites_toggle",
    "favourites_toggle_active",
    "category_button",
    "category_button_selected",
    "category_cursor",
    "card_name",
    "card_ordinal",
    "card_border",
    "card_border_selected",
    "card_favourite",
    "card_not_favourite",
    "status_bar",
    "panel_border",
    "panel_border_focused",
    "help_key",
];

impl StyleMap {
    pub fn from_palette(p: &ColorPalette) -> Self {
        let styles: [Style; 18] = [
            p.heading,
            p.search_text,
            p.search_placeholder,
            p.favourites_toggle,
            p.favourites_toggle_active,
            p.category_button,
            p.category_button_selected,
            p.category_cursor,
            p.card_name,
            p.card_ordinal,
            p.card_border,
            p.card_border_selected,
            p.card_favourite,
            p.card_not_favourite,
            p.status_bar,
            p.panel_border,
            p.panel_border_focused,
            p.help_key,
        ];

        let map = ROLE_NAMES.into_iter().zip(styles).collect();
        Self { map }
    }

    /// Resolve a role name, falling back to `Style::default()`.
    pub fn resolve(&self, role: &str) -> Style {
        self.map.get(role).copied().unwrap_or_default()
    }
}

// ============================================================================
// Tests
// ============================================================================
