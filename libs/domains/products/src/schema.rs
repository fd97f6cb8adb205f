//! Field table for the product document.
//!
//! The same table drives request validation ([`check_document`]) and the
//! `$jsonSchema` validator plus unique indexes installed on the collection
//! ([`mongo_json_schema`], [`unique_fields`]).

use mongodb::bson::{doc, Bson, Document};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Number,
    Boolean,
}

impl FieldKind {
    fn label(self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
        }
    }

    /// `bsonType` alias used in `$jsonSchema`
    fn bson_type(self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Number => "number",
            FieldKind::Boolean => "bool",
        }
    }

    fn matches(self, value: &Value) -> bool {
        match self {
            FieldKind::String => value.is_string(),
            FieldKind::Number => value.is_number(),
            FieldKind::Boolean => value.is_boolean(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Name as it appears in JSON and in the stored document
    pub name: &'static str,
    pub kind: FieldKind,
    /// Enforced by a unique index
    pub unique: bool,
    /// Strings only: reject blank values
    pub non_blank: bool,
}

const fn field(name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        name,
        kind,
        unique: false,
        non_blank: false,
    }
}

/// Every field is required.
pub const PRODUCT_SCHEMA: &[FieldSpec] = &[
    FieldSpec {
        unique: true,
        non_blank: true,
        ..field("id", FieldKind::String)
    },
    FieldSpec {
        non_blank: true,
        ..field("name", FieldKind::String)
    },
    field("description", FieldKind::String),
    field("price", FieldKind::Number),
    field("category", FieldKind::String),
    field("inStock", FieldKind::Boolean),
];

/// One failed field check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldViolation {
    pub field: String,
    pub reason: String,
}

impl FieldViolation {
    fn new(field: &str, reason: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Check presence and primitive type of every schema field.
///
/// Does not inspect values beyond their JSON type (and blankness where the
/// field asks for it); unknown extra fields are allowed.
pub fn check_document(value: &Value) -> Result<(), Vec<FieldViolation>> {
    let Some(object) = value.as_object() else {
        return Err(vec![FieldViolation::new("", "not an object")]);
    };

    let violations: Vec<FieldViolation> = PRODUCT_SCHEMA
        .iter()
        .filter_map(|spec| match object.get(spec.name) {
            None | Some(Value::Null) => Some(FieldViolation::new(spec.name, "missing")),
            Some(v) if !spec.kind.matches(v) => Some(FieldViolation::new(
                spec.name,
                format!("expected {}", spec.kind.label()),
            )),
            Some(Value::String(s)) if spec.non_blank && s.trim().is_empty() => {
                Some(FieldViolation::new(spec.name, "must not be blank"))
            }
            Some(_) => None,
        })
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

/// Store-side counterpart of the `trim().is_empty()` check in [`check_document`].
const NON_BLANK_PATTERN: &str = r"\S";

/// `$jsonSchema` validator for the collection.
pub fn mongo_json_schema() -> Document {
    let mut properties = Document::new();
    for spec in PRODUCT_SCHEMA {
        let mut property = doc! { "bsonType": spec.kind.bson_type() };
        if spec.non_blank {
            property.insert("minLength", 1);
            property.insert("pattern", NON_BLANK_PATTERN);
        }
        properties.insert(spec.name, property);
    }

    let required: Vec<Bson> = PRODUCT_SCHEMA
        .iter()
        .map(|spec| Bson::String(spec.name.to_string()))
        .collect();

    doc! {
        "$jsonSchema": {
            "bsonType": "object",
            "required": required,
            "properties": properties,
        }
    }
}

pub fn unique_fields() -> impl Iterator<Item = &'static str> {
    PRODUCT_SCHEMA.iter().filter(|s| s.unique).map(|s| s.name)
}
