//! # Dataset Emitter
//!
//! Lays the enriched collection out as a TypeScript module tree and renders
//! it. The record shape comes from [`RECIPE_SHAPE`]; the category counts are
//! shipped as code so they stay correct if the array is edited by hand.

use serde::Serialize;
use serde_json::Value;

use crate::emit::ast::{Block, Expr, Item, Module};
use crate::emit::render::Renderer;
use crate::emit::shape::RECIPE_SHAPE;
use crate::error::{ReceitarioError, Result};
use crate::types::{ALL_CATEGORIES_ID, EnrichedRecipe, category_registry};

/// Names and header used in the generated module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitterConfig {
    /// Name of the exported record interface.
    pub interface_name: String,
    /// Name of the exported category registry.
    pub categories_name: String,
    /// Name of the exported recipe array.
    pub recipes_name: String,
    /// Comment lines at the top of the file.
    pub header: Vec<String>,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            interface_name: "Recipe".to_string(),
            categories_name: "RECIPE_CATEGORIES".to_string(),
            recipes_name: "RECIPES".to_string(),
            header: vec!["Receitas extraídas do arquivo JSON e categorizadas".to_string()],
        }
    }
}

impl EmitterConfig {
    /// Create a configuration with the default names.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_interface_name(mut self, name: impl Into<String>) -> Self {
        self.interface_name = name.into();
        self
    }

    pub fn with_categories_name(mut self, name: impl Into<String>) -> Self {
        self.categories_name = name.into();
        self
    }

    pub fn with_recipes_name(mut self, name: impl Into<String>) -> Self {
        self.recipes_name = name.into();
        self
    }

    /// Replace the header comment lines.
    pub fn with_header<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.header = lines.into_iter().map(Into::into).collect();
        self
    }
}

/// Serializes an enriched collection into a TypeScript data module.
pub struct DatasetEmitter {
    config: EmitterConfig,
    renderer: Renderer,
}

impl DatasetEmitter {
    /// # Errors
    ///
    /// Returns `ReceitarioError::InvalidIdentifier` if a configured name is
    /// not a bare TypeScript identifier.
    pub fn new(config: EmitterConfig) -> Result<Self> {
        let renderer = Renderer::new()?;
        for name in [
            &config.interface_name,
            &config.categories_name,
            &config.recipes_name,
        ] {
            if !renderer.is_identifier(name) {
                return Err(ReceitarioError::InvalidIdentifier(name.clone()));
            }
        }
        Ok(Self { config, renderer })
    }

    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    /// Builds the module tree for `recipes`.
    ///
    /// # Errors
    ///
    /// Returns `ReceitarioError::ShapeMismatch` if a record lacks a declared
    /// field or carries one with the wrong type.
    pub fn build_module(&self, recipes: &[EnrichedRecipe]) -> Result<Module> {
        let records = recipes
            .iter()
            .map(record_expr)
            .collect::<Result<Vec<_>>>()?;

        Ok(Module {
            header: self.config.header.clone(),
            blocks: vec![
                Block {
                    comment: None,
                    item: Item::Interface {
                        name: self.config.interface_name.clone(),
                        fields: RECIPE_SHAPE
                            .iter()
                            .map(|f| (f.name.to_string(), f.ty.ts_name()))
                            .collect(),
                    },
                },
                Block {
                    comment: None,
                    item: Item::Const {
                        name: self.config.categories_name.clone(),
                        ty: None,
                        value: registry_expr(),
                    },
                },
                Block {
                    comment: Some("Dados das receitas processadas do JSON".to_string()),
                    item: Item::Const {
                        name: self.config.recipes_name.clone(),
                        ty: Some(format!("{}[]", self.config.interface_name)),
                        value: Expr::Array(records),
                    },
                },
                Block {
                    comment: Some("Atualizar contadores das categorias".to_string()),
                    item: Item::CountRefresh {
                        categories: self.config.categories_name.clone(),
                        recipes: self.config.recipes_name.clone(),
                        all_id: ALL_CATEGORIES_ID.to_string(),
                    },
                },
            ],
        })
    }

    /// Renders `recipes` to the text of the module.
    ///
    /// # Errors
    ///
    /// See [`DatasetEmitter::build_module`]. Nothing is rendered on error.
    pub fn render(&self, recipes: &[EnrichedRecipe]) -> Result<String> {
        let module = self.build_module(recipes)?;
        Ok(self.renderer.render(&module))
    }
}

/// Renders `recipes` with the default names.
///
/// # Errors
///
/// See [`DatasetEmitter::build_module`].
pub fn render(recipes: &[EnrichedRecipe]) -> Result<String> {
    DatasetEmitter::new(EmitterConfig::default())?.render(recipes)
}

/// The registry literal, every count at the `0` placeholder.
fn registry_expr() -> Expr {
    Expr::Array(
        category_registry()
            .into_iter()
            .map(|entry| {
                Expr::Object(vec![
                    ("id".to_string(), Expr::str(entry.id)),
                    ("name".to_string(), Expr::str(entry.name)),
                    ("icon".to_string(), Expr::str(entry.icon)),
                    ("count".to_string(), Expr::int(entry.count)),
                ])
            })
            .collect(),
    )
}

/// Lays a serialized record out field by field in shape order.
fn record_expr<T: Serialize>(record: &T) -> Result<Expr> {
    let Value::Object(mut map) = serde_json::to_value(record)? else {
        return Err(ReceitarioError::ShapeMismatch {
            field: "<record>",
            expected: "object",
        });
    };

    let fields = RECIPE_SHAPE
        .iter()
        .map(|spec| {
            let mismatch = || ReceitarioError::ShapeMismatch {
                field: spec.name,
                expected: spec.ty.ts_name(),
            };
            let value = map.remove(spec.name).ok_or_else(mismatch)?;
            if !spec.ty.accepts(&value) {
                return Err(mismatch());
            }
            let expr = Expr::from_json(&value).ok_or_else(mismatch)?;
            Ok((spec.name.to_string(), expr))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Expr::Object(fields))
}
