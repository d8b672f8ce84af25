pub mod heuristic;
pub mod rules;

pub use heuristic::{
    DEFAULT_CALORIES, DEFAULT_MASS, NutrientValues, RecipeEnricher, TimeEstimate, cover_label,
    describe,
};
pub use rules::{
    BUILTIN_RULES, CategoryGroup, DifficultyBand, Rules, TagFamily, TagScope, TimeBand,
};
