pub mod category;
pub mod labels;
pub mod recipe;

pub use category::{
    ALL_CATEGORIES_ID, Category, CategoryEntry, FALLBACK_ICON, category_counts, category_registry,
};
pub use labels::{Difficulty, Minutes};
pub use recipe::{EnrichedRecipe, NutritionFacts, RawRecipe};
