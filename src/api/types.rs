use crate::catalog::Entry;
use serde::Deserialize;

/// Paginated list envelope used by every `/{resource}` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceList<T> {
    /// Total number of resources on the server.
    #[serde(default)]
    pub count: usize,
    /// URL of the next page, if any.
    #[serde(default)]
    pub next: Option<String>,
    pub results: Vec<T>,
}

/// The subset of `/type/{name}` the catalog reads.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryDetail {
    pub name: String,
    #[serde(default)]
    pub pokemon: Vec<CategoryMember>,
}

/// One slot of a type's member list.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryMember {
    pub pokemon: Entry,
}

impl CategoryDetail {
    /// Member names in API order.
    pub fn member_names(&self) -> Vec<String> {
        self.pokemon.iter().map(|m| m.pokemon.name.clone()).collect()
    }
}
