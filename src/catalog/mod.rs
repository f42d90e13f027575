//! Catalog state and filtering.
//!
//! - [`model`] - Entries, categories and URL ordinals
//! - [`filter`] - Field filters and the pure [`derive_view`] function
//! - [`state`] - [`CatalogState`], the session state owner the UI reads from
//!
//! Nothing here touches the network or the terminal; the UI layer spawns
//! fetches and feeds their results back through the `finish_*` and
//! `record_*` methods.

mod filter;
mod model;
mod state;

pub use filter::{derive_view, CategoryFilterMode, CategoryScope, Field, Filters};
pub use model::{ordinal_from_url, Category, CategoryKind, Entry};
pub use state::{CatalogState, CategoryToggle, FavouriteChange};
