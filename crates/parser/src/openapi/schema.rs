//! Type labels for schema fragments

use super::types::{truthy_field, value_label};
use serde_json::{Map, Value};

/// Label used when nothing about a schema's shape is known
pub const UNKNOWN_TYPE: &str = "-";

/// What a schema fragment says about its shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SchemaShape<'a> {
    /// Explicit `type`
    Declared(&'a Value),
    /// No `type`, but `properties`
    Object,
    /// No `type` or `properties`, but `items`
    Array,
    Unknown,
}

impl<'a> SchemaShape<'a> {
    /// Classify a schema fragment; `type` beats `properties` beats `items`
    pub fn of(schema: Option<&'a Value>) -> Self {
        match schema.and_then(Value::as_object) {
            Some(map) => Self::of_object(map),
            None => Self::Unknown,
        }
    }

    fn of_object(map: &'a Map<String, Value>) -> Self {
        if let Some(declared) = truthy_field(map, "type") {
            Self::Declared(declared)
        } else if truthy_field(map, "properties").is_some() {
            Self::Object
        } else if truthy_field(map, "items").is_some() {
            Self::Array
        } else {
            Self::Unknown
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::Declared(declared) => value_label(declared),
            Self::Object => "object".to_string(),
            Self::Array => "array".to_string(),
            Self::Unknown => UNKNOWN_TYPE.to_string(),
        }
    }
}

/// Human-readable type label for a schema fragment
///
/// # Examples
/// ```
/// use apimd_parser::openapi::infer_type;
/// use serde_json::json;
///
/// assert_eq!(infer_type(Some(&json!({ "type": "integer" }))), "integer");
/// assert_eq!(infer_type(Some(&json!({ "properties": {} }))), "object");
/// assert_eq!(infer_type(None), "-");
/// ```
pub fn infer_type(schema: Option<&Value>) -> String {
    SchemaShape::of(schema).label()
}
