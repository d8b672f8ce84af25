//! # Receitario Core
//!
//! Heuristic recipe enrichment and TypeScript dataset generation. Raw
//! recipes are classified (category, time, difficulty, dietary tags) purely
//! from their own text, then emitted as a typed data module.
//!
//! ## Quick Start
//!
//! ```rust
//! use receitario_core::{Category, NutritionFacts, RawRecipe, RecipeEnricher};
//!
//! let enricher = RecipeEnricher::builtin().unwrap();
//! let raw = RawRecipe {
//!     title: "Bolo de Cenoura".into(),
//!     ingredients: vec!["cenoura".into(), "farinha".into()],
//!     instructions: vec!["bata".into(), "asse".into(), "espere".into()],
//!     nutrition: NutritionFacts::default(),
//! };
//! let recipe = enricher.enrich(&raw, 1);
//!
//! assert_eq!(recipe.category, Category::Bolos);
//! assert_eq!(recipe.time, "15 min");
//! assert_eq!(recipe.tags, vec!["Saudável".to_string()]);
//! ```
pub mod emit;
pub mod enrich;
pub mod error;
pub mod pipeline;
pub mod types;

// Re-export primary API
pub use emit::{DatasetEmitter, EmitterConfig, RECIPE_SHAPE, render};
pub use enrich::{RecipeEnricher, Rules, TimeEstimate};
pub use error::{ReceitarioError, Result};
pub use pipeline::{
    DEFAULT_INPUT, DEFAULT_OUTPUT, Dataset, GenerationReport, Pipeline, PipelineConfig,
    load_raw_recipes, parse_raw_recipes, write_atomic,
};
pub use types::{
    Category, CategoryEntry, Difficulty, EnrichedRecipe, Minutes, NutritionFacts, RawRecipe,
    category_counts, category_registry,
};
