//! Pure derivation of the visible entry list.
//!
//! [`derive_view`] is recomputed in full by [`super::CatalogState`] after
//! every mutation. It never looks at previous output.

use super::model::Entry;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap, HashSet};

// ============================================================================
// Field Filters
// ============================================================================

/// Enumerated filter dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    /// Restrict by membership in the favourite list.
    Favourite,
}

/// Tri-state filter values keyed by [`Field`].
///
/// A field that is absent is unset. `Some(true)` and `Some(false)` are
/// distinct, active states.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    values: BTreeMap<Field, bool>,
}

impl Filters {
    pub fn get(&self, field: Field) -> Option<bool> {
        self.values.get(&field).copied()
    }

    pub fn set(&mut self, field: Field, value: bool) {
        self.values.insert(field, value);
    }

    pub fn clear(&mut self, field: Field) {
        self.values.remove(&field);
    }

    /// True when the field is set to `true`.
    pub fn is_on(&self, field: Field) -> bool {
        self.get(field) == Some(true)
    }
}

// ============================================================================
// Category Restriction
// ============================================================================

/// How selected categories affect the derived list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum CategoryFilterMode {
    /// Selected categories only change button state; the list is untouched.
    #[default]
    Highlight,
    /// Keep only entries belonging to at least one selected category.
    Restrict,
}

impl CategoryFilterMode {
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "highlight" => Some(Self::Highlight),
            "restrict" => Some(Self::Restrict),
            _ => None,
        }
    }
}

impl TryFrom<String> for CategoryFilterMode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str_name(&value).ok_or_else(|| {
            format!("unknown category filter mode '{value}', expected 'highlight' or 'restrict'")
        })
    }
}

/// Category inputs to [`derive_view`].
#[derive(Debug, Clone, Copy)]
pub struct CategoryScope<'a> {
    pub mode: CategoryFilterMode,
    pub selected: &'a [String],
    /// Member names per category, present once the member fetch resolved.
    pub members: &'a HashMap<String, Vec<String>>,
}

// ============================================================================
// Derivation
// ============================================================================

/// Filter and sort `all` into the list shown to the user.
///
/// Steps, in order:
/// 1. `Field::Favourite`: `true` keeps favourites, `false` keeps the rest.
/// 2. A non-empty `query` keeps names containing it (case-sensitive).
/// 3. In [`CategoryFilterMode::Restrict`], once any selected category has
///    known members, keep entries in the union of those members.
/// 4. Sort ascending by URL ordinal. Entries without one go last and equal
///    keys keep their input order.
pub fn derive_view(
    all: &[Entry],
    filters: &Filters,
    query: &str,
    favourites: &[String],
    categories: CategoryScope<'_>,
) -> Vec<Entry> {
    let favourite_names: HashSet<&str> = favourites.iter().map(String::as_str).collect();

    let mut view: Vec<Entry> = all
        .iter()
        .filter(|entry| match filters.get(Field::Favourite) {
            Some(true) => favourite_names.contains(entry.name.as_str()),
            Some(false) => !favourite_names.contains(entry.name.as_str()),
            None => true,
        })
        .filter(|entry| query.is_empty() || entry.name.contains(query))
        .cloned()
        .collect();

    if categories.mode == CategoryFilterMode::Restrict {
        if let Some(allowed) = category_members(categories) {
            view.retain(|entry| allowed.contains(entry.name.as_str()));
        }
    }

    view.sort_by_cached_key(|entry| match entry.ordinal() {
        Some(n) => (false, n),
        None => (true, 0),
    });
    view
}

/// Union of known members for the selected categories, or `None` when no
/// selected category has resolved yet.
fn category_members<'a>(scope: CategoryScope<'a>) -> Option<HashSet<&'a str>> {
    let known: Vec<&Vec<String>> = scope
        .selected
        .iter()
        .filter_map(|name| scope.members.get(name))
        .collect();

    if known.is_empty() {
        return None;
    }

    Some(
        known
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect(),
    )
}
