//! Typed views over a loosely-shaped OpenAPI document
//!
//! Real-world OpenAPI files vary widely in completeness, so nothing here is
//! deserialized eagerly. Each view borrows a JSON object and exposes the
//! fields the importer needs as optional accessors. Anything that has the
//! wrong shape shows up as a `Malformed` variant (or `None`) for the caller
//! to skip.

use apimd_common::{ApimdError, HttpMethod, Result};
use serde_json::{Map, Value};

/// JSON truthiness as loosely-typed producers use it: `null`, `false`, `0`,
/// `""` are falsy; every array and object is truthy
pub(crate) fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Present and truthy
pub(crate) fn truthy_field<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|value| truthy(value))
}

/// Non-empty string field
pub(crate) fn text_field<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    map.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Text label for a scalar-ish value (type names, header examples)
///
/// Strings are taken verbatim, lists are joined with commas, and anything
/// else uses its compact JSON form.
pub(crate) fn value_label(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Array(items) => items.iter().map(value_label).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}

/// OpenAPI document root
#[derive(Debug, Clone, Copy)]
pub struct OpenApiDocument<'a> {
    root: &'a Map<String, Value>,
}

impl<'a> OpenApiDocument<'a> {
    /// Wrap a parsed document; anything but a JSON object is rejected
    pub fn from_value(value: &'a Value) -> Result<Self> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            Value::Null => Err(ApimdError::InvalidImportInput(
                "document is null".to_string(),
            )),
            other => Err(ApimdError::InvalidImportInput(format!(
                "expected a JSON object, found {}",
                json_kind(other)
            ))),
        }
    }

    fn info(&self) -> Option<&'a Map<String, Value>> {
        self.root.get("info").and_then(Value::as_object)
    }

    /// `info.title`, if it is a non-empty string
    pub fn title(&self) -> Option<&'a str> {
        self.info().and_then(|info| text_field(info, "title"))
    }

    /// `info.description`, if it is a non-empty string
    pub fn description(&self) -> Option<&'a str> {
        self.info().and_then(|info| text_field(info, "description"))
    }

    /// Entries of `paths` in document order
    ///
    /// Yields nothing when `paths` is missing or not an object.
    pub fn paths(&self) -> impl Iterator<Item = (&'a str, PathEntry<'a>)> + 'a {
        self.root
            .get("paths")
            .and_then(Value::as_object)
            .into_iter()
            .flat_map(|paths| paths.iter())
            .map(|(path, item)| {
                let entry = match item.as_object() {
                    Some(map) => PathEntry::Item(PathItem { map }),
                    None => PathEntry::Malformed,
                };
                (path.as_str(), entry)
            })
    }
}

/// One value under `paths`
#[derive(Debug, Clone, Copy)]
pub enum PathEntry<'a> {
    Item(PathItem<'a>),
    Malformed,
}

/// Operations (and shared parameters) for one path
#[derive(Debug, Clone, Copy)]
pub struct PathItem<'a> {
    map: &'a Map<String, Value>,
}

/// One key of a path item, classified
#[derive(Debug, Clone, Copy)]
pub enum PathItemMember<'a> {
    /// Recognized HTTP method with an object body
    Operation(HttpMethod, Operation<'a>),
    /// Recognized HTTP method whose body is not an object
    MalformedOperation(HttpMethod),
    /// Anything else: `parameters`, `summary`, `servers`, extensions, `trace`
    Other(&'a str),
}

impl<'a> PathItem<'a> {
    /// Parameters shared by every operation on this path
    pub fn parameters(&self) -> &'a [Value] {
        parameter_list(self.map)
    }

    /// Keys in document order, classified
    pub fn members(&self) -> impl Iterator<Item = PathItemMember<'a>> + 'a {
        self.map.iter().map(|(key, value)| {
            match (HttpMethod::from_name(key), value.as_object()) {
                (Some(method), Some(map)) => PathItemMember::Operation(method, Operation { map }),
                (Some(method), None) => PathItemMember::MalformedOperation(method),
                (None, _) => PathItemMember::Other(key.as_str()),
            }
        })
    }
}

/// A single HTTP operation
#[derive(Debug, Clone, Copy)]
pub struct Operation<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> Operation<'a> {
    pub fn summary(&self) -> Option<&'a str> {
        text_field(self.map, "summary")
    }

    pub fn operation_id(&self) -> Option<&'a str> {
        text_field(self.map, "operationId")
    }

    pub fn description(&self) -> Option<&'a str> {
        text_field(self.map, "description")
    }

    pub fn parameters(&self) -> &'a [Value] {
        parameter_list(self.map)
    }

    /// `requestBody`, if present and truthy
    pub fn request_body(&self) -> Option<RequestBody<'a>> {
        self.map.get("requestBody").and_then(RequestBody::from_value)
    }

    /// `responses`, if it is an object
    pub fn responses(&self) -> Option<Responses<'a>> {
        self.map.get("responses").and_then(Responses::from_value)
    }
}

fn parameter_list(map: &Map<String, Value>) -> &[Value] {
    map.get("parameters")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Where a parameter is carried
///
/// Only headers are kept apart; path, query, cookie, Swagger 2 `body` and
/// anything unrecognized all become endpoint parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterLocation {
    Header,
    Other,
}

impl ParameterLocation {
    fn from_value(value: Option<&Value>) -> Self {
        match value.and_then(Value::as_str) {
            Some(name) if name.eq_ignore_ascii_case("header") => Self::Header,
            _ => Self::Other,
        }
    }
}

/// One entry of a `parameters` array
#[derive(Debug, Clone, Copy)]
pub enum ParameterEntry<'a> {
    Parameter(ParameterObject<'a>),
    Malformed,
}

impl<'a> ParameterEntry<'a> {
    pub fn from_value(value: &'a Value) -> Self {
        match value.as_object() {
            Some(map) => Self::Parameter(ParameterObject { map }),
            None => Self::Malformed,
        }
    }
}

/// Parameter object (`name`, `in`, `schema`, ...)
#[derive(Debug, Clone, Copy)]
pub struct ParameterObject<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> ParameterObject<'a> {
    pub fn name(&self) -> &'a str {
        self.map.get("name").and_then(Value::as_str).unwrap_or_default()
    }

    pub fn description(&self) -> &'a str {
        self.map
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn location(&self) -> ParameterLocation {
        ParameterLocation::from_value(self.map.get("in"))
    }

    pub fn is_required(&self) -> bool {
        self.map.get("required").is_some_and(truthy)
    }

    pub fn schema(&self) -> Option<&'a Value> {
        self.map.get("schema")
    }

    /// Example header value: `example`, then `schema.example`, then
    /// `schema.default`; `null` counts as absent
    pub fn example_value(&self) -> Option<&'a Value> {
        let present = |value: &&Value| !value.is_null();
        self.map.get("example").filter(present).or_else(|| {
            let schema = self.schema().filter(|s| truthy(s))?;
            schema
                .get("example")
                .filter(present)
                .or_else(|| schema.get("default").filter(present))
        })
    }
}

/// Request body of an operation
#[derive(Debug, Clone, Copy)]
pub struct RequestBody<'a> {
    content: Option<&'a Map<String, Value>>,
}

impl<'a> RequestBody<'a> {
    /// Any truthy value counts as a request body; only objects carry content
    pub fn from_value(value: &'a Value) -> Option<Self> {
        truthy(value).then(|| Self {
            content: value.get("content").and_then(Value::as_object),
        })
    }

    pub fn content(&self) -> Option<Content<'a>> {
        self.content.map(|map| Content { map })
    }
}

/// `responses` map of an operation
#[derive(Debug, Clone, Copy)]
pub struct Responses<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> Responses<'a> {
    pub fn from_value(value: &'a Value) -> Option<Self> {
        value.as_object().map(|map| Self { map })
    }

    /// Content of the first response that is an object or array, in
    /// document order
    ///
    /// The outer `None` means no such response exists at all. An array
    /// response is selected but never has content.
    pub fn first_content(&self) -> Option<Option<Content<'a>>> {
        self.map
            .values()
            .find(|response| response.is_object() || response.is_array())
            .map(|response| {
                response
                    .get("content")
                    .and_then(Value::as_object)
                    .map(|map| Content { map })
            })
    }
}

/// Media type → media type object map
#[derive(Debug, Clone, Copy)]
pub struct Content<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> Content<'a> {
    pub fn from_map(map: &'a Map<String, Value>) -> Self {
        Self { map }
    }

    /// Raw media type object for an exact media type key
    pub fn get(&self, media_type: &str) -> Option<&'a Value> {
        self.map.get(media_type)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a Value)> + 'a {
        self.map.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Media type object (`example`, `examples`, `schema`)
#[derive(Debug, Clone, Copy)]
pub struct MediaType<'a> {
    map: &'a Map<String, Value>,
}

/// Where a media type object keeps its example
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExampleSource<'a> {
    /// `example`
    Inline(&'a Value),
    /// `value` of the first `examples` entry (falsy values give `None`)
    Named(Option<&'a Value>),
    /// `schema.example`
    Schema(&'a Value),
    Absent,
}

impl<'a> MediaType<'a> {
    pub fn from_value(value: &'a Value) -> Option<Self> {
        value.as_object().map(|map| Self { map })
    }

    pub fn schema(&self) -> Option<&'a Value> {
        self.map.get("schema")
    }

    pub fn example_source(&self) -> ExampleSource<'a> {
        if let Some(example) = truthy_field(self.map, "example") {
            return ExampleSource::Inline(example);
        }

        if let Some(examples) = truthy_field(self.map, "examples") {
            let first = match examples {
                Value::Object(named) => named.values().next(),
                Value::Array(list) => list.first(),
                _ => None,
            };
            if let Some(Value::Object(entry)) = first {
                return ExampleSource::Named(truthy_field(entry, "value"));
            }
        }

        self.schema()
            .and_then(Value::as_object)
            .and_then(|schema| truthy_field(schema, "example"))
            .map_or(ExampleSource::Absent, ExampleSource::Schema)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
