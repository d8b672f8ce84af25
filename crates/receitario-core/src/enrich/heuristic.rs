use regex::Regex;
use tracing::debug;

use crate::enrich::rules::{Rules, TagScope};
use crate::error::{ReceitarioError, Result};
use crate::types::{Category, Difficulty, EnrichedRecipe, Minutes, NutritionFacts, RawRecipe};

/// Default for a missing mass-style nutrient.
pub const DEFAULT_MASS: &str = "0g";
/// Default for missing calories.
pub const DEFAULT_CALORIES: &str = "0 kcal";

/// A time label together with the minute count parsed out of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeEstimate {
    pub label: String,
    pub minutes: Minutes,
}

#[derive(Debug, Clone)]
struct ResolvedTimeBand {
    max_steps: usize,
    estimate: TimeEstimate,
}

/// The four displayed nutrient values after defaulting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NutrientValues {
    pub carbs: String,
    pub fiber: String,
    pub protein: String,
    pub calories: String,
}

impl NutrientValues {
    /// Reads the displayed nutrients, substituting zero values for absent keys.
    #[must_use]
    pub fn from_facts(facts: &NutritionFacts) -> Self {
        let or_default = |value: &Option<String>, default: &str| {
            value.clone().unwrap_or_else(|| default.to_string())
        };
        Self {
            carbs: or_default(&facts.carbs, DEFAULT_MASS),
            fiber: or_default(&facts.fiber, DEFAULT_MASS),
            protein: or_default(&facts.protein, DEFAULT_MASS),
            calories: or_default(&facts.calories, DEFAULT_CALORIES),
        }
    }

    /// Single display line, always in carbs / fiber / protein / calories order.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Carboidratos: {} | Fibras: {} | Proteínas: {} | Calorias: {}",
            self.carbs, self.fiber, self.protein, self.calories
        )
    }
}

/// Rule-driven enricher turning raw recipes into classified records.
///
/// Every derivation is a keyword scan or a band lookup over the recipe's
/// own text; nothing is shared between recipes.
pub struct RecipeEnricher {
    rules: Rules,
    time_bands: Vec<ResolvedTimeBand>,
    time_fallback: TimeEstimate,
    re_minutes: Regex,
}

impl RecipeEnricher {
    /// Builds an enricher over a validated rule table.
    ///
    /// # Errors
    ///
    /// Returns `ReceitarioError::InvalidRules` if the table fails validation
    /// or a time label does not start with a minute count.
    pub fn new(rules: Rules) -> Result<Self> {
        rules.validate()?;
        let re_minutes = Regex::new(r"^\s*(\d+)")?;

        let time_bands = rules
            .time_bands
            .iter()
            .map(|band| -> Result<ResolvedTimeBand> {
                Ok(ResolvedTimeBand {
                    max_steps: band.max_steps,
                    estimate: resolve_time_label(&re_minutes, &band.label)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let time_fallback = resolve_time_label(&re_minutes, &rules.time_fallback)?;

        Ok(Self {
            rules,
            time_bands,
            time_fallback,
            re_minutes,
        })
    }

    /// Builds an enricher over the built-in rule table.
    ///
    /// # Errors
    ///
    /// See [`RecipeEnricher::new`].
    pub fn builtin() -> Result<Self> {
        Self::new(Rules::builtin()?)
    }

    /// The rule table in use.
    #[must_use]
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Enriches one recipe. `id` is its 1-based position in the input.
    #[must_use]
    pub fn enrich(&self, raw: &RawRecipe, id: u32) -> EnrichedRecipe {
        let category = self.categorize(&raw.title);
        let time = self.estimate_time(raw.instructions.len());
        let (prep_time, cook_time) = time.minutes.split_prep_cook();
        let difficulty = self.determine_difficulty(raw.instructions.len());
        let tags = self.generate_tags(&raw.ingredients, &raw.title);
        let nutrients = NutrientValues::from_facts(&raw.nutrition);

        debug!(id, title = %raw.title, %category, time = %time.label, %difficulty, ?tags, "enriched recipe");

        EnrichedRecipe {
            id,
            title: raw.title.clone(),
            category,
            ingredients: raw.ingredients.clone(),
            instructions: raw.instructions.clone(),
            nutritional_info: nutrients.summary(),
            time: time.label.clone(),
            difficulty,
            image: cover_label(&raw.title, category),
            description: describe(&raw.title),
            carbs: nutrients.carbs,
            calories: nutrients.calories,
            protein: nutrients.protein,
            fiber: nutrients.fiber,
            tags,
            rating: 0,
            prep_time,
            cook_time,
        }
    }

    /// Picks the category of the first keyword group with a hit in the
    /// lowercased title, or the default category.
    #[must_use]
    pub fn categorize(&self, title: &str) -> Category {
        let title = title.to_lowercase();
        self.rules
            .category_groups
            .iter()
            .find(|group| contains_any(&title, &group.keywords))
            .map_or(self.rules.default_category, |group| group.category)
    }

    /// Maps an instruction-step count onto its time band.
    #[must_use]
    pub fn estimate_time(&self, step_count: usize) -> &TimeEstimate {
        self.time_bands
            .iter()
            .find(|band| step_count <= band.max_steps)
            .map_or(&self.time_fallback, |band| &band.estimate)
    }

    /// Maps an instruction-step count onto its difficulty band.
    #[must_use]
    pub fn determine_difficulty(&self, step_count: usize) -> Difficulty {
        self.rules
            .difficulty_bands
            .iter()
            .find(|band| step_count <= band.max_steps)
            .map_or(self.rules.difficulty_fallback, |band| band.difficulty)
    }

    /// Collects the tag of every family with at least one keyword hit.
    ///
    /// Never empty: falls back to the single fallback tag.
    #[must_use]
    pub fn generate_tags(&self, ingredients: &[String], title: &str) -> Vec<String> {
        let ingredients_text = ingredients.join(" ").to_lowercase();
        let title = title.to_lowercase();

        let tags: Vec<String> = self
            .rules
            .tag_families
            .iter()
            .filter(|family| {
                contains_any(&ingredients_text, &family.keywords)
                    || (family.scope == TagScope::IngredientsAndTitle
                        && contains_any(&title, &family.keywords))
            })
            .map(|family| family.tag.clone())
            .collect();

        if tags.is_empty() {
            vec![self.rules.fallback_tag.clone()]
        } else {
            tags
        }
    }

    /// Parses the leading minute count of a time label.
    #[must_use]
    pub fn parse_minutes(&self, label: &str) -> Option<Minutes> {
        leading_minutes(&self.re_minutes, label)
    }
}

/// Cover label standing in for real artwork: the title in upper case.
///
/// `category` is reserved for category-specific covers and currently unused.
#[must_use]
pub fn cover_label(title: &str, _category: Category) -> String {
    title.to_uppercase()
}

/// Templated one-sentence description.
#[must_use]
pub fn describe(title: &str) -> String {
    format!(
        "Deliciosa receita de {}, preparada com ingredientes saudáveis e nutritivos.",
        title.to_lowercase()
    )
}

fn contains_any(haystack: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|k| haystack.contains(k.as_str()))
}

fn leading_minutes(re: &Regex, label: &str) -> Option<Minutes> {
    re.captures(label)
        .and_then(|c| c[1].parse().ok())
        .map(Minutes)
}

fn resolve_time_label(re: &Regex, label: &str) -> Result<TimeEstimate> {
    let minutes = leading_minutes(re, label).ok_or_else(|| {
        ReceitarioError::InvalidRules(format!(
            "time label `{label}` does not start with a minute count"
        ))
    })?;
    Ok(TimeEstimate {
        label: label.to_string(),
        minutes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enricher() -> RecipeEnricher {
        RecipeEnricher::builtin().unwrap()
    }

    fn raw(title: &str, ingredients: &[&str], steps: usize) -> RawRecipe {
        RawRecipe {
            title: title.into(),
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            instructions: (1..=steps).map(|i| format!("passo {i}")).collect(),
            nutrition: NutritionFacts::default(),
        }
    }

    #[test]
    fn categorize_by_group() {
        let e = enricher();
        assert_eq!(e.categorize("Bolo de Cenoura"), Category::Bolos);
        assert_eq!(e.categorize("Mousse de Maracujá"), Category::Sobremesas);
        assert_eq!(e.categorize("Frango Grelhado"), Category::PratosPrincipais);
        assert_eq!(e.categorize("Pão de Queijo"), Category::Paes);
        assert_eq!(e.categorize("Creme de Abóbora"), Category::Sopas);
        assert_eq!(e.categorize("Salada Tropical"), Category::Saladas);
        assert_eq!(e.categorize("Suco Verde"), Category::Bebidas);
        assert_eq!(e.categorize("Tapioca Recheada"), Category::Lanches);
    }

    #[test]
    fn categorize_is_case_insensitive() {
        let e = enricher();
        assert_eq!(e.categorize("BOLO DE MILHO"), Category::Bolos);
        assert_eq!(e.categorize("PÃO CASEIRO"), Category::Paes);
    }

    #[test]
    fn first_group_wins() {
        let e = enricher();
        assert_eq!(e.categorize("Bolo de Frango"), Category::Bolos);
        assert_eq!(e.categorize("Torta de Frango"), Category::Sobremesas);
        assert_eq!(e.categorize("Sopa de Frango"), Category::PratosPrincipais);
    }

    #[test]
    fn uncategorized_falls_back_to_lanches() {
        let e = enricher();
        assert_eq!(e.categorize("Granola Caseira"), Category::Lanches);
        assert_eq!(e.categorize(""), Category::Lanches);
    }

    #[test]
    fn time_band_boundaries() {
        let e = enricher();
        assert_eq!(e.estimate_time(0).label, "15 min");
        assert_eq!(e.estimate_time(3).label, "15 min");
        assert_eq!(e.estimate_time(4).label, "30 min");
        assert_eq!(e.estimate_time(6).label, "30 min");
        assert_eq!(e.estimate_time(7).label, "45 min");
        assert_eq!(e.estimate_time(9).label, "45 min");
        assert_eq!(e.estimate_time(10).label, "60 min");
        assert_eq!(e.estimate_time(40).minutes, Minutes(60));
    }

    #[test]
    fn time_is_monotonic_in_step_count() {
        let e = enricher();
        let minutes: Vec<Minutes> = (0..30).map(|n| e.estimate_time(n).minutes).collect();
        assert!(minutes.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn difficulty_band_boundaries() {
        let e = enricher();
        assert_eq!(e.determine_difficulty(1), Difficulty::Easy);
        assert_eq!(e.determine_difficulty(4), Difficulty::Easy);
        assert_eq!(e.determine_difficulty(5), Difficulty::Medium);
        assert_eq!(e.determine_difficulty(7), Difficulty::Medium);
        assert_eq!(e.determine_difficulty(8), Difficulty::Hard);
    }

    #[test]
    fn tags_fall_back_to_saudavel() {
        let e = enricher();
        let tags = e.generate_tags(&["cenoura".into(), "farinha".into()], "Bolo de Cenoura");
        assert_eq!(tags, vec!["Saudável".to_string()]);
    }

    #[test]
    fn tags_collect_every_family_in_order() {
        let e = enricher();
        let tags = e.generate_tags(
            &[
                "1 xícara de aveia".into(),
                "2 ovos".into(),
                "adoçante a gosto".into(),
            ],
            "Panqueca",
        );
        assert_eq!(tags, vec!["Integral", "Diet", "Alto Proteína", "Rico em Fibras"]);
    }

    #[test]
    fn light_matches_title_other_families_do_not() {
        let e = enricher();
        assert_eq!(
            e.generate_tags(&["leite".into()], "Pudim Light"),
            vec!["Light".to_string()]
        );
        assert_eq!(
            e.generate_tags(&["leite".into()], "Frango com Aveia"),
            vec!["Saudável".to_string()]
        );
    }

    #[test]
    fn tags_scan_is_case_insensitive() {
        let e = enricher();
        let tags = e.generate_tags(&["Farelo de TRIGO".into()], "x");
        assert_eq!(tags, vec!["Integral".to_string()]);
    }

    #[test]
    fn nutrients_default_when_absent() {
        let facts = NutritionFacts {
            carbs: Some("30g".into()),
            ..NutritionFacts::default()
        };
        let values = NutrientValues::from_facts(&facts);
        assert_eq!(
            values.summary(),
            "Carboidratos: 30g | Fibras: 0g | Proteínas: 0g | Calorias: 0 kcal"
        );
    }

    #[test]
    fn cover_and_description() {
        assert_eq!(cover_label("Pão de Mel", Category::Paes), "PÃO DE MEL");
        assert_eq!(
            describe("Bolo de Cenoura"),
            "Deliciosa receita de bolo de cenoura, preparada com ingredientes saudáveis e nutritivos."
        );
    }

    #[test]
    fn enrich_splits_prep_and_cook() {
        let e = enricher();
        for steps in 0..15 {
            let r = e.enrich(&raw("Omelete", &["ovo"], steps), 1);
            let total = e.parse_minutes(&r.time).unwrap();
            assert_eq!(r.prep_time.0 + r.cook_time.0, total.0);
        }
    }

    #[test]
    fn enrich_fills_every_field() {
        let e = enricher();
        let r = e.enrich(&raw("Bolo de Cenoura", &["cenoura", "farinha"], 3), 5);

        assert_eq!(r.id, 5);
        assert_eq!(r.category, Category::Bolos);
        assert_eq!(r.time, "15 min");
        assert_eq!(r.prep_time, Minutes(7));
        assert_eq!(r.cook_time, Minutes(8));
        assert_eq!(r.difficulty, Difficulty::Easy);
        assert_eq!(r.tags, vec!["Saudável".to_string()]);
        assert_eq!(r.image, "BOLO DE CENOURA");
        assert_eq!(r.rating, 0);
        assert_eq!(r.calories, "0 kcal");
    }

    #[test]
    fn parse_minutes_reads_leading_integer() {
        let e = enricher();
        assert_eq!(e.parse_minutes("45 min"), Some(Minutes(45)));
        assert_eq!(e.parse_minutes(" 5min"), Some(Minutes(5)));
        assert_eq!(e.parse_minutes("min 5"), None);
    }

    #[test]
    fn time_label_without_minutes_is_rejected() {
        let mut rules = Rules::builtin().unwrap();
        rules.time_fallback = "uma hora".into();
        assert!(matches!(
            RecipeEnricher::new(rules),
            Err(ReceitarioError::InvalidRules(_))
        ));
    }
}
