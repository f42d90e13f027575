//! Keybinding registry: maps key events to catalog actions per focus context.
//!
//! Defaults are registered in code; `[keybindings]` in config.toml rebinds
//! an action to a different key in every context it appears in.
use crossterm::event::{KeyCode, KeyModifiers};
use std::collections::HashMap;

// ============================================================================
// Action Enum
// ============================================================================

/// Every user-facing action that can be bound to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    CycleFocus,
    FocusSearch,
    NavUp,
    NavDown,
    NavLeft,
    NavRight,
    ToggleFavourite,
    ToggleFavouritesFilter,
    ToggleCategory,
    ClearQuery,
    Back,
    CycleTheme,
    ShowHelp,
}

impl Action {
    /// Human-readable description for the help overlay.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Quit => "Quit",
            Self::CycleFocus => "Cycle focus: search, categories, grid",
            Self::FocusSearch => "Jump to the search box",
            Self::NavUp => "Move up",
            Self::NavDown => "Move down",
            Self::NavLeft => "Move left",
            Self::NavRight => "Move right",
            Self::ToggleFavourite => "Add / remove favourite",
            Self::ToggleFavouritesFilter => "Show only favourites",
            Self::ToggleCategory => "Select / deselect category",
            Self::ClearQuery => "Clear search",
            Self::Back => "Leave panel",
            Self::CycleTheme => "Cycle theme",
            Self::ShowHelp => "Show help",
        }
    }

    /// Parse an action name from config (`snake_case`, a few short aliases).
    fn from_config_name(name: &str) -> Option<Self> {
        let action = match name.to_lowercase().as_str() {
            "quit" => Self::Quit,
            "cycle_focus" | "tab" => Self::CycleFocus,
            "focus_search" | "search" => Self::FocusSearch,
            "nav_up" | "up" => Self::NavUp,
            "nav_down" | "down" => Self::NavDown,
            "nav_left" | "left" => Self::NavLeft,
            "nav_right" | "right" => Self::NavRight,
            "toggle_favourite" | "toggle_favorite" | "favourite" | "favorite" => {
                Self::ToggleFavourite
            }
            "toggle_favourites_filter" | "toggle_favorites_filter" | "favourites" | "favorites" => {
                Self::ToggleFavouritesFilter
            }
            "toggle_category" | "category" => Self::ToggleCategory,
            "clear_query" | "clear" => Self::ClearQuery,
            "back" => Self::Back,
            "cycle_theme" | "theme" => Self::CycleTheme,
            "show_help" | "help" => Self::ShowHelp,
            _ => return None,
        };
        Some(action)
    }
}

// ============================================================================
// Context Enum
// ============================================================================

/// Dispatch context, one per focusable panel plus the global fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Context {
    Global,
    Search,
    Categories,
    Grid,
}

impl Context {
    /// Label shown in the help overlay.
    pub fn label(self) -> &'static str {
        match self {
            Self::Global => "Global",
            Self::Search => "Search",
            Self::Categories => "Categories",
            Self::Grid => "Grid",
        }
    }
}

// ============================================================================
// Key Specification
// ============================================================================

/// A key event: code + modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeySpec {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeySpec {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub const fn char(c: char) -> Self {
        Self::plain(KeyCode::Char(c))
    }

    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    /// Parse a key string from config.
    ///
    /// Accepts a single character (`"q"`, `"/"`), a named key (`"Enter"`,
    /// `"Esc"`, `"Tab"`, arrows, `"Backspace"`, `"Space"`), `"Ctrl+<char>"`,
    /// or `"F1"`..`"F12"`.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();

        if let Some(rest) = s.strip_prefix("Ctrl+") {
            let mut chars = rest.trim().chars();
            return match (chars.next(), chars.next()) {
                (Some(c), None) => Some(Self::ctrl(c)),
                _ => None,
            };
        }

        let named = match s.to_lowercase().as_str() {
            "enter" | "return" => Some(KeyCode::Enter),
            "esc" | "escape" => Some(KeyCode::Esc),
            "tab" => Some(KeyCode::Tab),
            "up" => Some(KeyCode::Up),
            "down" => Some(KeyCode::Down),
            "left" => Some(KeyCode::Left),
            "right" => Some(KeyCode::Right),
            "backspace" => Some(KeyCode::Backspace),
            "space" => Some(KeyCode::Char(' ')),
            _ => None,
        };
        if let Some(code) = named {
            return Some(Self::plain(code));
        }

        if let Some(n) = s
            .strip_prefix(&['F', 'f'][..])
            .and_then(|digits| digits.parse::<u8>().ok())
        {
            return (1..=12).contains(&n).then(|| Self::plain(KeyCode::F(n)));
        }

        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(Self::char(c)),
            _ => None,
        }
    }

    /// Human-readable form for the help overlay.
    pub fn display(&self) -> String {
        let prefix = if self.modifiers.contains(KeyModifiers::CONTROL) {
            "Ctrl+"
        } else {
            ""
        };
        let name = match self.code {
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::Up => "Up".to_string(),
            KeyCode::Down => "Down".to_string(),
            KeyCode::Left => "Left".to_string(),
            KeyCode::Right => "Right".to_string(),
            KeyCode::Backspace => "Backspace".to_string(),
            KeyCode::F(n) => format!("F{n}"),
            _ => "?".to_string(),
        };
        format!("{prefix}{name}")
    }
}

// ============================================================================
// Keybinding Registry
// ============================================================================

/// Context-aware key → action lookup with a Global fallback.
#[derive(Debug, Clone)]
pub struct KeybindingRegistry {
    lookup: HashMap<(Context, KeySpec), Action>,
    /// Registration order, for the help overlay.
    bindings: Vec<(Context, KeySpec, Action)>,
}

impl KeybindingRegistry {
    /// Registry populated with the default bindings.
    pub fn new() -> Self {
        let mut registry = Self {
            lookup: HashMap::new(),
            bindings: Vec::new(),
        };
        registry.register_defaults();
        registry
    }

    fn bind(&mut self, context: Context, key: KeySpec, action: Action) {
        self.lookup.insert((context, key), action);
        self.bindings.push((context, key, action));
    }

    fn register_defaults(&mut self) {
        use Action::*;
        use Context::*;

        let global = [
            (KeySpec::char('q'), Quit),
            (KeySpec::ctrl('c'), Quit),
            (KeySpec::plain(KeyCode::Tab), CycleFocus),
            (KeySpec::char('/'), FocusSearch),
            (KeySpec::char('k'), NavUp),
            (KeySpec::plain(KeyCode::Up), NavUp),
            (KeySpec::char('j'), NavDown),
            (KeySpec::plain(KeyCode::Down), NavDown),
            (KeySpec::char('h'), NavLeft),
            (KeySpec::plain(KeyCode::Left), NavLeft),
            (KeySpec::char('l'), NavRight),
            (KeySpec::plain(KeyCode::Right), NavRight),
            (KeySpec::char('f'), ToggleFavouritesFilter),
            (KeySpec::char('x'), ClearQuery),
            (KeySpec::plain(KeyCode::Esc), Back),
            (KeySpec::char('t'), CycleTheme),
            (KeySpec::char('?'), ShowHelp),
        ];
        for (key, action) in global {
            self.bind(Global, key, action);
        }

        // Enter leaves the search box; Esc clears it
        self.bind(Search, KeySpec::plain(KeyCode::Esc), ClearQuery);
        self.bind(Search, KeySpec::plain(KeyCode::Enter), Back);

        self.bind(Categories, KeySpec::plain(KeyCode::Enter), ToggleCategory);
        self.bind(Categories, KeySpec::char(' '), ToggleCategory);

        self.bind(Grid, KeySpec::plain(KeyCode::Enter), ToggleFavourite);
        self.bind(Grid, KeySpec::char(' '), ToggleFavourite);
    }

    /// Apply user overrides from the config `[keybindings]` table.
    ///
    /// Keys are action names (`"quit"`, `"toggle_favourite"`), values are key
    /// strings (`"Ctrl+q"`, `"F5"`). An override replaces every default key
    /// for that action, in the same contexts.
    ///
    /// Returns one warning per unknown action or unparseable key.
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, String>) -> Vec<String> {
        let mut warnings = Vec::new();

        for (action_name, key_str) in overrides {
            let Some(action) = Action::from_config_name(action_name) else {
                warnings.push(format!("Unknown action '{action_name}', ignoring"));
                continue;
            };
            let Some(key) = KeySpec::parse(key_str) else {
                warnings.push(format!(
                    "Cannot parse key '{key_str}' for action '{action_name}', ignoring"
                ));
                continue;
            };

            let mut contexts: Vec<Context> = Vec::new();
            for (ctx, _, a) in &self.bindings {
                if *a == action && !contexts.contains(ctx) {
                    contexts.push(*ctx);
                }
            }

            self.lookup.retain(|_, a| *a != action);
            self.bindings.retain(|(_, _, a)| *a != action);
            for ctx in contexts {
                self.bind(ctx, key, action);
            }

            tracing::info!(action = %action_name, key = %key_str, "Applied keybinding override");
        }

        warnings
    }

    /// Look up the action for a key, trying `context` first and then Global.
    pub fn action_for_key(
        &self,
        code: KeyCode,
        modifiers: KeyModifiers,
        context: Context,
    ) -> Option<Action> {
        let key = KeySpec::new(code, modifiers);
        self.lookup
            .get(&(context, key))
            .or_else(|| self.lookup.get(&(Context::Global, key)))
            .copied()
    }

    /// First key bound to `action` in any context, for status-bar hints.
    pub fn key_for(&self, action: Action) -> Option<String> {
        self.bindings
            .iter()
            .find(|(_, _, a)| *a == action)
            .map(|(_, key, _)| key.display())
    }

    /// All bindings as (context, key label, description), in registration order.
    pub fn all_bindings(&self) -> Vec<(Context, String, &'static str)> {
        self.bindings
            .iter()
            .map(|(ctx, key, action)| (*ctx, key.display(), action.describe()))
            .collect()
    }
}

impl Default for KeybindingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
