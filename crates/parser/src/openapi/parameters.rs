//! Header and parameter extraction
//!
//! OpenAPI keeps headers, query/path parameters, and body fields in different
//! places. The document model only knows two lists per endpoint: headers and
//! parameters. This module folds the OpenAPI shapes into those lists.

use super::schema::infer_type;
use super::types::{
    text_field, value_label, Content, ParameterEntry, ParameterLocation, ParameterObject,
};
use apimd_common::{Header, Parameter, Required};
use serde_json::Value;
use std::collections::HashSet;
use tracing::debug;

/// Media types whose schema describes body fields, in lookup order
pub const BODY_SCHEMA_MEDIA_TYPES: [&str; 3] = [
    "application/json",
    "application/x-www-form-urlencoded",
    "multipart/form-data",
];

/// Headers and parameters collected from `parameters` arrays
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectedParameters {
    pub headers: Vec<Header>,
    pub parameters: Vec<Parameter>,
}

/// Split path-level then operation-level parameter objects into headers and
/// parameters
///
/// Nothing is deduplicated here; an entry declared on both levels appears
/// twice. Entries that are not objects are skipped.
pub fn collect_parameters(path_level: &[Value], operation_level: &[Value]) -> CollectedParameters {
    let mut collected = CollectedParameters::default();

    for raw in path_level.iter().chain(operation_level) {
        match ParameterEntry::from_value(raw) {
            ParameterEntry::Parameter(param) if param.location() == ParameterLocation::Header => {
                collected.headers.push(header_from(&param));
            }
            ParameterEntry::Parameter(param) => {
                collected.parameters.push(parameter_from(&param));
            }
            ParameterEntry::Malformed => {
                debug!(entry = %raw, "skipping parameter entry that is not an object");
            }
        }
    }

    collected
}

fn header_from(param: &ParameterObject<'_>) -> Header {
    Header {
        name: param.name().to_string(),
        value: param.example_value().map(value_label).unwrap_or_default(),
        description: param.description().to_string(),
    }
}

fn parameter_from(param: &ParameterObject<'_>) -> Parameter {
    Parameter::new(
        param.name(),
        infer_type(param.schema()),
        Required::from_flag(param.is_required()),
    )
    .with_description(param.description())
}

/// Body fields declared by a request body schema
///
/// The first of [`BODY_SCHEMA_MEDIA_TYPES`] carrying an object- or
/// array-valued `schema` is used. That schema yields one parameter per property only when
/// it declares `type: object` and has a `properties` map; otherwise there are
/// no body fields.
pub fn schema_parameters(content: Option<Content<'_>>) -> Vec<Parameter> {
    let Some(content) = content else {
        return Vec::new();
    };

    // an array-valued schema still claims the slot, then yields nothing
    let schema = BODY_SCHEMA_MEDIA_TYPES.iter().find_map(|media_type| {
        content
            .get(media_type)
            .and_then(|media| media.get("schema"))
            .filter(|schema| schema.is_object() || schema.is_array())
    });
    let Some(schema) = schema.and_then(Value::as_object) else {
        return Vec::new();
    };

    let declares_object = schema.get("type").and_then(Value::as_str) == Some("object");
    let properties = schema.get("properties").and_then(Value::as_object);
    let (true, Some(properties)) = (declares_object, properties) else {
        return Vec::new();
    };

    let required: HashSet<&str> = schema
        .get("required")
        .and_then(Value::as_array)
        .map(|names| names.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    properties
        .iter()
        .map(|(name, property)| property_parameter(name, property, &required))
        .collect()
}

fn property_parameter(name: &str, property: &Value, required: &HashSet<&str>) -> Parameter {
    let description = property
        .as_object()
        .and_then(|map| text_field(map, "description"))
        .unwrap_or_default();

    Parameter::new(
        name,
        infer_type(Some(property)),
        Required::from_flag(required.contains(name)),
    )
    .with_description(description)
}

/// Concatenate two parameter lists, keeping the first parameter seen for
/// each `(name, type)` pair
///
/// Relative order of the survivors is preserved. Required flags and
/// descriptions do not take part in the comparison.
pub fn merge_parameters(existing: Vec<Parameter>, additional: Vec<Parameter>) -> Vec<Parameter> {
    let mut seen = HashSet::new();
    existing
        .into_iter()
        .chain(additional)
        .filter(|param| seen.insert(format!("{}-{}", param.name, param.param_type)))
        .collect()
}
