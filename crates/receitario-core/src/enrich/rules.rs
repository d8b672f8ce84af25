//! Keyword tables and step-count bands that drive enrichment.
//!
//! The built-in table is embedded from `data/rules.json`; a replacement file
//! with the same layout can be loaded at runtime.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ReceitarioError, Result};
use crate::types::{Category, Difficulty};

/// The rule table compiled into the crate.
pub const BUILTIN_RULES: &str = include_str!("../../data/rules.json");

/// Keywords that select one category. Groups are tried in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryGroup {
    pub category: Category,
    pub keywords: Vec<String>,
}

/// Upper-inclusive step-count band mapped to a time label such as `"30 min"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBand {
    pub max_steps: usize,
    pub label: String,
}

/// Upper-inclusive step-count band mapped to a difficulty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyBand {
    pub max_steps: usize,
    pub difficulty: Difficulty,
}

/// Which text a tag family is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagScope {
    #[default]
    Ingredients,
    IngredientsAndTitle,
}

/// Keywords that add one dietary tag. Every family is evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagFamily {
    pub tag: String,
    pub keywords: Vec<String>,
    #[serde(default)]
    pub scope: TagScope,
}

/// The complete enrichment rule table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    pub category_groups: Vec<CategoryGroup>,
    pub default_category: Category,
    pub time_bands: Vec<TimeBand>,
    pub time_fallback: String,
    pub difficulty_bands: Vec<DifficultyBand>,
    pub difficulty_fallback: Difficulty,
    pub tag_families: Vec<TagFamily>,
    pub fallback_tag: String,
}

impl Rules {
    /// Parses and validates the built-in rule table.
    ///
    /// # Errors
    ///
    /// Returns `ReceitarioError::InvalidRules` if the embedded table is
    /// broken (only possible after a bad edit to `data/rules.json`).
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_RULES)
    }

    /// Parses and validates a rule table from JSON text.
    ///
    /// # Errors
    ///
    /// Returns `ReceitarioError::InvalidRules` on a JSON error or a table
    /// that fails [`Rules::validate`].
    pub fn from_json(json: &str) -> Result<Self> {
        let rules: Rules =
            serde_json::from_str(json).map_err(|e| ReceitarioError::InvalidRules(e.to_string()))?;
        rules.validate()?;
        Ok(rules)
    }

    /// Loads a rule table from a file.
    ///
    /// # Errors
    ///
    /// Returns `ReceitarioError::InputNotFound` if the file cannot be read,
    /// `ReceitarioError::InvalidRules` if it is not UTF-8, otherwise the
    /// errors of [`Rules::from_json`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| ReceitarioError::InputNotFound {
            path: path.to_path_buf(),
            source,
        })?;
        let json = String::from_utf8(bytes).map_err(|e| {
            ReceitarioError::InvalidRules(format!("rules file is not valid UTF-8: {e}"))
        })?;
        Self::from_json(&json)
    }

    /// Checks the structural invariants the enricher relies on.
    ///
    /// Keywords must be non-empty and lowercase (they are matched against
    /// lowercased text), bands must have strictly ascending limits and tag
    /// names must be unique.
    ///
    /// # Errors
    ///
    /// Returns `ReceitarioError::InvalidRules` describing the first problem.
    pub fn validate(&self) -> Result<()> {
        if self.category_groups.is_empty() {
            return invalid("at least one category group is required");
        }
        for group in &self.category_groups {
            check_keywords(&format!("category `{}`", group.category), &group.keywords)?;
        }

        check_ascending("time", self.time_bands.iter().map(|b| b.max_steps))?;
        check_ascending(
            "difficulty",
            self.difficulty_bands.iter().map(|b| b.max_steps),
        )?;

        let mut seen: Vec<&str> = Vec::with_capacity(self.tag_families.len());
        for family in &self.tag_families {
            if family.tag.trim().is_empty() {
                return invalid("tag families must have a name");
            }
            if seen.contains(&family.tag.as_str()) {
                return invalid(&format!("tag `{}` is declared twice", family.tag));
            }
            seen.push(&family.tag);
            check_keywords(&format!("tag `{}`", family.tag), &family.keywords)?;
        }

        if self.fallback_tag.trim().is_empty() {
            return invalid("fallback tag must not be empty");
        }

        Ok(())
    }
}

fn invalid(reason: &str) -> Result<()> {
    Err(ReceitarioError::InvalidRules(reason.to_string()))
}

fn check_keywords(owner: &str, keywords: &[String]) -> Result<()> {
    if keywords.is_empty() {
        return invalid(&format!("{owner} has no keywords"));
    }
    for keyword in keywords {
        if keyword.is_empty() {
            return invalid(&format!("{owner} has an empty keyword"));
        }
        if keyword.to_lowercase() != *keyword {
            return invalid(&format!("{owner}: keyword `{keyword}` must be lowercase"));
        }
    }
    Ok(())
}

fn check_ascending(kind: &str, limits: impl Iterator<Item = usize>) -> Result<()> {
    let mut previous: Option<usize> = None;
    for limit in limits {
        if previous.is_some_and(|p| limit <= p) {
            return invalid(&format!("{kind} bands must have strictly ascending limits"));
        }
        previous = Some(limit);
    }
    Ok(())
}
