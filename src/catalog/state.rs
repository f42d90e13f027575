use super::filter::{derive_view, CategoryFilterMode, CategoryScope, Field, Filters};
use super::model::{Category, Entry};
use std::collections::HashMap;

/// Outcome of [`CatalogState::toggle_category_selection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryToggle {
    /// The category was added; the caller should fetch its members.
    Selected,
    /// The category was removed.
    Deselected,
}

/// A favourite mutation bound to one entry.
///
/// Cards hand these out instead of closures so the state can be borrowed
/// for rendering while the change is pending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavouriteChange {
    Add(Entry),
    Remove(Entry),
}

/// Session state for the catalog screen.
///
/// Owns the fetched entries and categories plus everything the user can
/// change. Every mutator ends in [`CatalogState::recompute`], so
/// [`CatalogState::entries`] always reflects the current inputs.
#[derive(Debug, Default)]
pub struct CatalogState {
    all_entries: Option<Vec<Entry>>,
    categories: Vec<Category>,
    view: Vec<Entry>,
    query: String,
    /// Append-only: adding an existing name stores it again.
    favourites: Vec<String>,
    filters: Filters,
    selected_categories: Vec<String>,
    category_members: HashMap<String, Vec<String>>,
    category_filter: CategoryFilterMode,
    load_error: Option<String>,
}

impl CatalogState {
    pub fn new(category_filter: CategoryFilterMode) -> Self {
        Self {
            category_filter,
            ..Self::default()
        }
    }

    // ------------------------------------------------------------------------
    // Initial load
    // ------------------------------------------------------------------------

    /// Apply the result of the entry list fetch.
    pub fn finish_entries_load(&mut self, result: Result<Vec<Entry>, String>) {
        match result {
            Ok(entries) => {
                tracing::info!(count = entries.len(), "Entries loaded");
                self.all_entries = Some(entries);
                self.recompute();
            }
            Err(error) => self.record_load_error("entries", error),
        }
    }

    /// Apply the result of the category list fetch.
    pub fn finish_categories_load(&mut self, result: Result<Vec<Category>, String>) {
        match result {
            Ok(categories) => {
                tracing::info!(count = categories.len(), "Categories loaded");
                self.categories = categories;
            }
            Err(error) => self.record_load_error("categories", error),
        }
    }

    fn record_load_error(&mut self, what: &'static str, error: String) {
        tracing::error!(fetch = what, error = %error, "Initial load failed");
        // First failure wins; the flag is never cleared.
        if self.load_error.is_none() {
            self.load_error = Some(error);
        }
    }

    // ------------------------------------------------------------------------
    // Mutators
    // ------------------------------------------------------------------------

    /// Replace the search query.
    pub fn search(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.recompute();
    }

    pub fn add_favourite(&mut self, entry: &Entry) {
        self.favourites.push(entry.name.clone());
        self.recompute();
    }

    /// Remove every occurrence of the entry's name.
    pub fn remove_favourite(&mut self, entry: &Entry) {
        self.favourites.retain(|name| *name != entry.name);
        self.recompute();
    }

    pub fn apply_favourite_change(&mut self, change: FavouriteChange) {
        match change {
            FavouriteChange::Add(entry) => self.add_favourite(&entry),
            FavouriteChange::Remove(entry) => self.remove_favourite(&entry),
        }
    }

    pub fn add_filter(&mut self, field: Field, value: bool) {
        self.filters.set(field, value);
        self.recompute();
    }

    pub fn remove_filter(&mut self, field: Field) {
        self.filters.clear(field);
        self.recompute();
    }

    /// Select or deselect a category by name.
    ///
    /// Selecting returns [`CategoryToggle::Selected`]; the caller is expected
    /// to fetch the members and hand them to
    /// [`CatalogState::record_category_members`].
    pub fn toggle_category_selection(&mut self, name: &str) -> CategoryToggle {
        let outcome = if let Some(pos) = self.selected_categories.iter().position(|c| c == name) {
            self.selected_categories.remove(pos);
            CategoryToggle::Deselected
        } else {
            self.selected_categories.push(name.to_string());
            CategoryToggle::Selected
        };
        tracing::debug!(category = %name, ?outcome, "Category toggled");
        self.recompute();
        outcome
    }

    /// Store member names for a category. Later results overwrite earlier ones.
    pub fn record_category_members(&mut self, name: &str, members: Vec<String>) {
        tracing::debug!(category = %name, members = members.len(), "Category members recorded");
        self.category_members.insert(name.to_string(), members);
        self.recompute();
    }

    fn recompute(&mut self) {
        let Some(all) = self.all_entries.as_deref() else {
            return;
        };
        self.view = derive_view(
            all,
            &self.filters,
            &self.query,
            &self.favourites,
            CategoryScope {
                mode: self.category_filter,
                selected: &self.selected_categories,
                members: &self.category_members,
            },
        );
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    /// The derived, sorted list shown to the user.
    pub fn entries(&self) -> &[Entry] {
        &self.view
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn favourites(&self) -> &[String] {
        &self.favourites
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn selected_categories(&self) -> &[String] {
        &self.selected_categories
    }

    pub fn category_members(&self, name: &str) -> Option<&[String]> {
        self.category_members.get(name).map(Vec::as_slice)
    }

    pub fn is_favourite(&self, entry: &Entry) -> bool {
        self.favourites.iter().any(|name| *name == entry.name)
    }

    pub fn is_category_selected(&self, name: &str) -> bool {
        self.selected_categories.iter().any(|c| c == name)
    }

    /// True once the entry list has arrived.
    pub fn is_loaded(&self) -> bool {
        self.all_entries.is_some()
    }

    pub fn has_error(&self) -> bool {
        self.load_error.is_some()
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }
}
