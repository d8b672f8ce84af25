//! In-memory tree of the generated TypeScript module.

use serde_json::Value;

/// A literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Str(String),
    /// Already-formatted numeric literal.
    Number(String),
    Array(Vec<Expr>),
    /// Object literal; keys keep their insertion order.
    Object(Vec<(String, Expr)>),
}

impl Expr {
    #[must_use]
    pub fn str(value: impl Into<String>) -> Self {
        Self::Str(value.into())
    }

    #[must_use]
    pub fn int(value: usize) -> Self {
        Self::Number(value.to_string())
    }

    /// Whether this is a string or number (no nested structure).
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Str(_) | Self::Number(_))
    }

    /// Converts a JSON value. `null` and booleans never occur in the recipe
    /// shape and map to `None`.
    #[must_use]
    pub fn from_json(value: &Value) -> Option<Self> {
        Some(match value {
            Value::String(s) => Self::Str(s.clone()),
            Value::Number(n) => Self::Number(n.to_string()),
            Value::Array(items) => {
                Self::Array(items.iter().map(Self::from_json).collect::<Option<_>>()?)
            }
            Value::Object(map) => Self::Object(
                map.iter()
                    .map(|(k, v)| Some((k.clone(), Self::from_json(v)?)))
                    .collect::<Option<_>>()?,
            ),
            Value::Null | Value::Bool(_) => return None,
        })
    }
}

/// A top-level declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    /// `export interface {name} { field: type; … }`
    Interface {
        name: String,
        fields: Vec<(String, &'static str)>,
    },
    /// `export const {name}[: {ty}] = {value};`
    Const {
        name: String,
        ty: Option<String>,
        value: Expr,
    },
    /// Statement that recomputes every registry `count` from the recipe array.
    CountRefresh {
        categories: String,
        recipes: String,
        all_id: String,
    },
}

/// A declaration with an optional line comment above it.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub comment: Option<String>,
    pub item: Item,
}

/// The whole generated module.
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    pub header: Vec<String>,
    pub blocks: Vec<Block>,
}
