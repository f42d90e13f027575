//! PokéAPI client.
//!
//! - [`client`] - [`PokeApi`] and its [`ApiError`] type
//! - [`types`] - Response envelopes deserialized from the API
//!
//! Only three operations are consumed: list all types, list one page of
//! Pokémon, and fetch a single type's members. There is no retry.

mod client;
mod types;

pub use client::{ApiError, PokeApi, DEFAULT_BASE_URL, DEFAULT_PAGE_LIMIT, DEFAULT_TIMEOUT};
pub use types::{CategoryDetail, CategoryMember, ResourceList};
