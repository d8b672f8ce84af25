use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of the sentinel registry entry that spans every recipe.
pub const ALL_CATEGORIES_ID: &str = "all";

/// Icon shown for the sentinel entry and for anything without its own icon.
pub const FALLBACK_ICON: &str = "utensils";

/// The closed set of recipe categories.
///
/// Variants are declared in registry order, which is also the order the
/// generated module lists them in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Bolos,
    Sobremesas,
    PratosPrincipais,
    Lanches,
    Bebidas,
    Paes,
    Saladas,
    Sopas,
}

impl Category {
    /// Every category, in registry order.
    pub const ALL: [Category; 8] = [
        Self::Bolos,
        Self::Sobremesas,
        Self::PratosPrincipais,
        Self::Lanches,
        Self::Bebidas,
        Self::Paes,
        Self::Saladas,
        Self::Sopas,
    ];

    /// Stable identifier used in the generated data.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Bolos => "bolos",
            Self::Sobremesas => "sobremesas",
            Self::PratosPrincipais => "pratos-principais",
            Self::Lanches => "lanches",
            Self::Bebidas => "bebidas",
            Self::Paes => "paes",
            Self::Saladas => "saladas",
            Self::Sopas => "sopas",
        }
    }

    /// Localized display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Bolos => "Bolos",
            Self::Sobremesas => "Sobremesas",
            Self::PratosPrincipais => "Pratos Principais",
            Self::Lanches => "Lanches",
            Self::Bebidas => "Bebidas",
            Self::Paes => "Pães",
            Self::Saladas => "Saladas",
            Self::Sopas => "Sopas",
        }
    }

    /// Icon identifier understood by the consuming application.
    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Self::Bolos => "cake",
            Self::Sobremesas => "ice-cream",
            Self::PratosPrincipais => "chef-hat",
            Self::Lanches => "sandwich",
            Self::Bebidas => "coffee",
            Self::Paes => "bread-slice",
            Self::Saladas => "salad",
            Self::Sopas => "bowl-hot",
        }
    }

    /// Looks a category up by its identifier.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// One entry of the category registry shipped with the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub count: usize,
}

impl CategoryEntry {
    fn all(count: usize) -> Self {
        Self {
            id: ALL_CATEGORIES_ID,
            name: "Todas",
            icon: FALLBACK_ICON,
            count,
        }
    }

    fn of(category: Category, count: usize) -> Self {
        Self {
            id: category.id(),
            name: category.name(),
            icon: category.icon(),
            count,
        }
    }
}

/// The 9-entry registry with every count at the `0` placeholder.
#[must_use]
pub fn category_registry() -> Vec<CategoryEntry> {
    std::iter::once(CategoryEntry::all(0))
        .chain(Category::ALL.into_iter().map(|c| CategoryEntry::of(c, 0)))
        .collect()
}

/// Derives the registry with live counts from the categories of an
/// enriched collection.
///
/// The `all` entry counts every item; each other entry counts the items
/// assigned to it.
#[must_use]
pub fn category_counts<I>(categories: I) -> Vec<CategoryEntry>
where
    I: IntoIterator<Item = Category>,
{
    let mut per_category = [0usize; Category::ALL.len()];
    let mut total = 0usize;
    for category in categories {
        per_category[category as usize] += 1;
        total += 1;
    }

    std::iter::once(CategoryEntry::all(total))
        .chain(
            Category::ALL
                .into_iter()
                .map(|c| CategoryEntry::of(c, per_category[c as usize])),
        )
        .collect()
}
