use serde::Deserialize;

// ============================================================================
// Entries and Categories
// ============================================================================

/// One catalog item as returned by the list endpoints.
///
/// `name` is the stable identifier used by favourites and category members.
/// `url` points at the detail resource and ends with the entry's national
/// dex number, which is what the catalog sorts by.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct Entry {
    pub name: String,
    pub url: String,
}

impl Entry {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Numeric ordinal encoded in the resource URL, if any.
    pub fn ordinal(&self) -> Option<u32> {
        ordinal_from_url(&self.url)
    }
}

/// One taxonomy tag (a Pokémon type).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct Category {
    pub name: String,
    pub url: String,
}

impl Category {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Known type for icon and colour lookup.
    pub fn kind(&self) -> CategoryKind {
        CategoryKind::from_name(&self.name)
    }
}

/// Extract the trailing numeric path segment of a resource URL.
///
/// `https://pokeapi.co/api/v2/pokemon/25/` yields `Some(25)`. A trailing
/// slash is optional. Anything that does not end in a number yields `None`.
pub fn ordinal_from_url(url: &str) -> Option<u32> {
    url.trim_end_matches('/').rsplit('/').next()?.parse().ok()
}

// ============================================================================
// Category Kind
// ============================================================================

/// The eighteen battle types with a dedicated glyph and colour.
///
/// The type list also carries pseudo-types such as `unknown` and `shadow`;
/// those render as [`CategoryKind::Normal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryKind {
    Bug,
    Dark,
    Dragon,
    Electric,
    Fairy,
    Fighting,
    Fire,
    Flying,
    Ghost,
    Grass,
    Ground,
    Ice,
    Normal,
    Poison,
    Psychic,
    Rock,
    Steel,
    Water,
}

impl CategoryKind {
    pub const ALL: [CategoryKind; 18] = [
        Self::Bug,
        Self::Dark,
        Self::Dragon,
        Self::Electric,
        Self::Fairy,
        Self::Fighting,
        Self::Fire,
        Self::Flying,
        Self::Ghost,
        Self::Grass,
        Self::Ground,
        Self::Ice,
        Self::Normal,
        Self::Poison,
        Self::Psychic,
        Self::Rock,
        Self::Steel,
        Self::Water,
    ];

    /// Look up a kind by API name, falling back to `Normal`.
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == name)
            .unwrap_or(Self::Normal)
    }

    /// API name of the type.
    pub fn name(self) -> &'static str {
        match self {
            Self::Bug => "bug",
            Self::Dark => "dark",
            Self::Dragon => "dragon",
            Self::Electric => "electric",
            Self::Fairy => "fairy",
            Self::Fighting => "fighting",
            Self::Fire => "fire",
            Self::Flying => "flying",
            Self::Ghost => "ghost",
            Self::Grass => "grass",
            Self::Ground => "ground",
            Self::Ice => "ice",
            Self::Normal => "normal",
            Self::Poison => "poison",
            Self::Psychic => "psychic",
            Self::Rock => "rock",
            Self::Steel => "steel",
            Self::Water => "water",
        }
    }

    /// Single-column glyph shown in front of the category button.
    pub fn glyph(self) -> char {
        match self {
            Self::Bug => '¤',
            Self::Dark => '◐',
            Self::Dragon => '∆',
            Self::Electric => 'ϟ',
            Self::Fairy => '✧',
            Self::Fighting => '✖',
            Self::Fire => '♨',
            Self::Flying => '≈',
            Self::Ghost => '☽',
            Self::Grass => '♣',
            Self::Ground => '▲',
            Self::Ice => '❄',
            Self::Normal => '○',
            Self::Poison => '☠',
            Self::Psychic => '◎',
            Self::Rock => '◆',
            Self::Steel => '⚙',
            Self::Water => '≋',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinal_with_trailing_slash() {
        assert_eq!(
            ordinal_from_url("https://pokeapi.co/api/v2/pokemon/25/"),
            Some(25)
        );
    }

    #[test]
    fn test_ordinal_without_trailing_slash() {
        assert_eq!(ordinal_from_url("https://pokeapi.co/api/v2/pokemon/150"), Some(150));
    }

    #[test]
    fn test_ordinal_missing() {
        assert_eq!(ordinal_from_url("https://pokeapi.co/api/v2/pokemon/"), None);
        assert_eq!(ordinal_from_url(""), None);
        assert_eq!(ordinal_from_url("not-a-url"), None);
    }

    #[test]
    fn test_entry_ordinal_delegates_to_url() {
        let entry = Entry::new("ivysaur", ".../2/");
        assert_eq!(entry.ordinal(), Some(2));
    }

    #[test]
    fn test_category_kind_known_names() {
        assert_eq!(CategoryKind::from_name("fire"), CategoryKind::Fire);
        assert_eq!(CategoryKind::from_name("water"), CategoryKind::Water);
        assert_eq!(
            Category::new("psychic", "https://pokeapi.co/api/v2/type/14/").kind(),
            CategoryKind::Psychic
        );
    }

    #[test]
    fn test_category_kind_unknown_falls_back_to_normal() {
        assert_eq!(CategoryKind::from_name("shadow"), CategoryKind::Normal);
        assert_eq!(CategoryKind::from_name("unknown"), CategoryKind::Normal);
        assert_eq!(CategoryKind::from_name("Fire"), CategoryKind::Normal);
    }

    #[test]
    fn test_category_kind_names_round_trip() {
        for kind in CategoryKind::ALL {
            assert_eq!(CategoryKind::from_name(kind.name()), kind);
        }
    }
}
