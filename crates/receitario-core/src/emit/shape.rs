//! Declared shape of a generated recipe record.
//!
//! The interface declaration and the field order of every emitted record
//! both come from [`RECIPE_SHAPE`].

use serde_json::Value;

/// TypeScript type of a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Number,
    String,
    StringArray,
}

impl FieldType {
    /// The type as written in the interface declaration.
    #[must_use]
    pub fn ts_name(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::String => "string",
            Self::StringArray => "string[]",
        }
    }

    /// Whether a serialized value has this type.
    #[must_use]
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            Self::Number => value.is_number(),
            Self::String => value.is_string(),
            Self::StringArray => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
        }
    }
}

/// One declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub ty: FieldType,
}

const fn field(name: &'static str, ty: FieldType) -> FieldSpec {
    FieldSpec { name, ty }
}

/// Fields of the `Recipe` interface, in emission order.
pub const RECIPE_SHAPE: &[FieldSpec] = &[
    field("id", FieldType::Number),
    field("title", FieldType::String),
    field("category", FieldType::String),
    field("ingredients", FieldType::StringArray),
    field("instructions", FieldType::StringArray),
    field("nutritionalInfo", FieldType::String),
    field("time", FieldType::String),
    field("difficulty", FieldType::String),
    field("carbs", FieldType::String),
    field("calories", FieldType::String),
    field("protein", FieldType::String),
    field("fiber", FieldType::String),
    field("image", FieldType::String),
    field("description", FieldType::String),
    field("tags", FieldType::StringArray),
    field("rating", FieldType::Number),
    field("prepTime", FieldType::String),
    field("cookTime", FieldType::String),
];

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn shape_names_are_unique() {
        for (i, a) in RECIPE_SHAPE.iter().enumerate() {
            assert!(
                RECIPE_SHAPE[i + 1..].iter().all(|b| b.name != a.name),
                "duplicate field {}",
                a.name
            );
        }
    }

    #[test]
    fn field_type_acceptance() {
        assert!(FieldType::Number.accepts(&json!(3)));
        assert!(!FieldType::Number.accepts(&json!("3")));
        assert!(FieldType::String.accepts(&json!("x")));
        assert!(FieldType::StringArray.accepts(&json!([])));
        assert!(FieldType::StringArray.accepts(&json!(["a", "b"])));
        assert!(!FieldType::StringArray.accepts(&json!(["a", 1])));
    }

    #[test]
    fn ts_names() {
        assert_eq!(FieldType::StringArray.ts_name(), "string[]");
        assert_eq!(FieldType::Number.ts_name(), "number");
    }
}
