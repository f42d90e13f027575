use crate::api::PokeApi;
use crate::catalog::{CatalogState, Category, Entry, Field};
use crate::keybindings::KeybindingRegistry;
use crate::theme::{StyleMap, ThemeVariant};
use ratatui::style::Style;
use std::borrow::Cow;
use tokio::time::Instant;

/// Maximum length of the search query, in characters.
pub const MAX_QUERY_LENGTH: usize = 64;

/// How long a status message stays on screen.
const STATUS_TTL_SECS: u64 = 3;

// ============================================================================
// Focus
// ============================================================================

/// Which panel receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Search,
    Categories,
    Grid,
}

impl Focus {
    /// Search → Categories → Grid → Search.
    pub fn next(self) -> Self {
        match self {
            Self::Search => Self::Categories,
            Self::Categories => Self::Grid,
            Self::Grid => Self::Search,
        }
    }
}

// ============================================================================
// Background Events
// ============================================================================

/// Completions sent back from spawned fetch tasks.
///
/// Errors are carried as display strings; the catalog only needs to know
/// that a load failed, and the message goes to the log.
#[derive(Debug)]
pub enum AppEvent {
    EntriesLoaded(Result<Vec<Entry>, String>),
    CategoriesLoaded(Result<Vec<Category>, String>),
    CategoryMembersLoaded {
        category: String,
        result: Result<Vec<String>, String>,
    },
}

// ============================================================================
// Application State
// ============================================================================

/// Central application state.
pub struct App {
    pub api: PokeApi,
    pub catalog: CatalogState,
    /// Entries requested by the startup fetch.
    pub page_limit: u32,

    // Theme
    pub theme_variant: ThemeVariant,
    pub theme: StyleMap,

    pub keybindings: KeybindingRegistry,

    // UI State
    pub focus: Focus,
    /// Index into `catalog.entries()`.
    pub selected_card: usize,
    /// Index into `catalog.categories()`.
    pub category_cursor: usize,
    /// Column count of the last rendered grid; drives up/down navigation.
    pub grid_columns: usize,

    pub show_help: bool,
    pub help_scroll_offset: usize,

    /// Dirty flag to skip unnecessary frame renders.
    pub needs_redraw: bool,

    /// Transient status with the time it was set; `Cow` keeps literals free.
    pub status_message: Option<(Cow<'static, str>, Instant)>,
}

impl App {
    pub fn new(api: PokeApi, catalog: CatalogState, page_limit: u32) -> Self {
        Self {
            api,
            catalog,
            page_limit,
            theme_variant: ThemeVariant::Dark,
            theme: StyleMap::from_palette(&ThemeVariant::Dark.palette()),
            keybindings: KeybindingRegistry::new(),
            focus: Focus::Search,
            selected_card: 0,
            category_cursor: 0,
            grid_columns: 1,
            show_help: false,
            help_scroll_offset: 0,
            needs_redraw: true,
            status_message: None,
        }
    }

    /// Resolve a semantic role name to its `Style`.
    pub fn style(&self, role: &str) -> Style {
        self.theme.resolve(role)
    }

    pub fn set_theme(&mut self, variant: ThemeVariant) {
        self.theme_variant = variant;
        self.theme = StyleMap::from_palette(&variant.palette());
        self.needs_redraw = true;
    }

    /// Cycle to the next theme variant, returning its name for display.
    pub fn cycle_theme(&mut self) -> &'static str {
        let next = self.theme_variant.next();
        self.set_theme(next);
        next.name()
    }

    // ------------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------------

    pub fn selected_entry(&self) -> Option<&Entry> {
        self.catalog.entries().get(self.selected_card)
    }

    pub fn selected_category(&self) -> Option<&Category> {
        self.catalog.categories().get(self.category_cursor)
    }

    /// Keep cursors inside their lists after the derived view changes.
    pub fn clamp_selections(&mut self) {
        let cards = self.catalog.entries().len();
        self.selected_card = self.selected_card.min(cards.saturating_sub(1));
        let categories = self.catalog.categories().len();
        self.category_cursor = self.category_cursor.min(categories.saturating_sub(1));
    }

    pub fn cycle_focus(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn nav_up(&mut self) {
        match self.focus {
            Focus::Search => {}
            Focus::Categories => self.category_cursor = self.category_cursor.saturating_sub(1),
            Focus::Grid => {
                if self.selected_card >= self.grid_columns {
                    self.selected_card -= self.grid_columns;
                }
            }
        }
    }

    pub fn nav_down(&mut self) {
        match self.focus {
            Focus::Search => {}
            Focus::Categories => self.category_step_forward(),
            Focus::Grid => {
                let target = self.selected_card.saturating_add(self.grid_columns.max(1));
                if target < self.catalog.entries().len() {
                    self.selected_card = target;
                }
            }
        }
    }

    pub fn nav_left(&mut self) {
        match self.focus {
            Focus::Search => {}
            Focus::Categories => self.category_cursor = self.category_cursor.saturating_sub(1),
            Focus::Grid => self.selected_card = self.selected_card.saturating_sub(1),
        }
    }

    pub fn nav_right(&mut self) {
        match self.focus {
            Focus::Search => {}
            Focus::Categories => self.category_step_forward(),
            Focus::Grid => {
                let max_index = self.catalog.entries().len().saturating_sub(1);
                self.selected_card = self.selected_card.saturating_add(1).min(max_index);
            }
        }
    }

    fn category_step_forward(&mut self) {
        let max_index = self.catalog.categories().len().saturating_sub(1);
        self.category_cursor = self.category_cursor.saturating_add(1).min(max_index);
    }

    // ------------------------------------------------------------------------
    // Catalog actions
    // ------------------------------------------------------------------------

    /// Append a character to the query. Returns false at the length cap.
    pub fn push_query_char(&mut self, c: char) -> bool {
        if self.catalog.query().chars().count() >= MAX_QUERY_LENGTH {
            return false;
        }
        let mut query = self.catalog.query().to_string();
        query.push(c);
        self.catalog.search(query);
        self.clamp_selections();
        true
    }

    pub fn pop_query_char(&mut self) {
        let mut query = self.catalog.query().to_string();
        if query.pop().is_some() {
            self.catalog.search(query);
            self.clamp_selections();
        }
    }

    pub fn clear_query(&mut self) {
        if !self.catalog.query().is_empty() {
            self.catalog.search("");
            self.clamp_selections();
        }
    }

    /// "My Favourites" button: a truthy filter is removed, anything else
    /// (unset or `false`) becomes `true`.
    pub fn toggle_favourites_filter(&mut self) {
        if self.catalog.filters().is_on(Field::Favourite) {
            self.catalog.remove_filter(Field::Favourite);
        } else {
            self.catalog.add_filter(Field::Favourite, true);
        }
        self.selected_card = 0;
        self.clamp_selections();
    }

    // ------------------------------------------------------------------------
    // Status
    // ------------------------------------------------------------------------

    /// Set a status message; it expires after three seconds.
    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
    }

    /// Drop the status message once expired. Returns true if one was cleared.
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, set_at)) = &self.status_message {
            if set_at.elapsed().as_secs() >= STATUS_TTL_SECS {
                self.status_message = None;
                return true;
            }
        }
        false
    }
}
