use serde::{Deserialize, Serialize};

use super::category::Category;
use super::labels::{Difficulty, Minutes};

/// A recipe exactly as it appears in the raw dump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecipe {
    #[serde(rename = "titulo")]
    pub title: String,

    #[serde(rename = "ingredientes")]
    pub ingredients: Vec<String>,

    /// Preparation steps, in order.
    #[serde(rename = "modo_preparo")]
    pub instructions: Vec<String>,

    #[serde(rename = "informacao_nutricional")]
    pub nutrition: NutritionFacts,
}

/// Unit-suffixed nutrient values, any of which may be absent.
///
/// Keys other than the four below are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionFacts {
    #[serde(rename = "carboidratos", default)]
    pub carbs: Option<String>,

    #[serde(rename = "calorias", default)]
    pub calories: Option<String>,

    #[serde(rename = "proteinas", default)]
    pub protein: Option<String>,

    #[serde(rename = "fibras", default)]
    pub fiber: Option<String>,
}

/// A raw recipe plus every derived classification field.
///
/// Serializes with the field names of the generated `Recipe` interface.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedRecipe {
    /// 1-based position in the input.
    pub id: u32,
    pub title: String,
    pub category: Category,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    /// `Carboidratos: … | Fibras: … | Proteínas: … | Calorias: …`
    pub nutritional_info: String,
    /// Total time label taken from the matching time band.
    pub time: String,
    pub difficulty: Difficulty,
    pub carbs: String,
    pub calories: String,
    pub protein: String,
    pub fiber: String,
    /// Cover label standing in for real artwork.
    pub image: String,
    pub description: String,
    pub tags: Vec<String>,
    /// Never derived; left at 0 for the consuming application to fill in.
    pub rating: u32,
    pub prep_time: Minutes,
    pub cook_time: Minutes,
}
