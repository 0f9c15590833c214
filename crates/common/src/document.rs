//! In-memory documentation model
//!
//! A [`Document`] is the whole documentation project: a title, a description,
//! and an ordered list of [`Endpoint`]s. Endpoint order is render order.
//! Endpoints are addressed by their [`EndpointId`]; headers and parameters
//! have no identity of their own and are addressed by position.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::ApimdError;

/// Title used when an imported document carries no `info.title`
pub const DEFAULT_DOCUMENT_TITLE: &str = "未命名接口文档";

/// HTTP methods an endpoint can document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Options,
    Head,
}

impl HttpMethod {
    /// All recognized methods, in display order
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Patch,
        HttpMethod::Delete,
        HttpMethod::Options,
        HttpMethod::Head,
    ];

    /// Look up a method by name, ignoring case
    ///
    /// The name must match exactly otherwise; OpenAPI method keys with
    /// surrounding whitespace are not methods.
    ///
    /// # Examples
    /// ```
    /// use apimd_common::HttpMethod;
    ///
    /// assert_eq!(HttpMethod::from_name("get"), Some(HttpMethod::Get));
    /// assert_eq!(HttpMethod::from_name("Delete"), Some(HttpMethod::Delete));
    /// assert_eq!(HttpMethod::from_name(" get "), None);
    /// assert_eq!(HttpMethod::from_name("trace"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(name))
    }

    /// Upper-case wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = ApimdError;

    /// Lenient parse for hand-written definitions: surrounding whitespace is
    /// ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s.trim())
            .ok_or_else(|| ApimdError::InvalidDefinition(format!("unknown HTTP method '{}'", s)))
    }
}

impl Serialize for HttpMethod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for HttpMethod {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// Whether a parameter must be supplied
///
/// Serialized as `"yes"` / `"no"`. Definition files may also use booleans
/// or `"true"` / `"false"`; `null` reads as no.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Required {
    Yes,
    #[default]
    No,
}

impl Required {
    pub fn from_flag(flag: bool) -> Self {
        if flag {
            Required::Yes
        } else {
            Required::No
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(self, Required::Yes)
    }
}

impl<'de> Deserialize<'de> for Required {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Flag(bool),
            Word(String),
        }

        match Option::<Repr>::deserialize(deserializer)? {
            None => Ok(Required::No),
            Some(Repr::Flag(flag)) => Ok(Self::from_flag(flag)),
            Some(Repr::Word(word)) => match word.trim().to_ascii_lowercase().as_str() {
                "yes" | "true" => Ok(Required::Yes),
                "no" | "false" | "" => Ok(Required::No),
                other => Err(serde::de::Error::custom(format!(
                    "unknown required flag '{}', expected yes/no or a boolean",
                    other
                ))),
            },
        }
    }
}

/// Scalars that definition files write as text, numbers or booleans
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Integer(i64),
    Float(f64),
    Flag(bool),
}

impl From<Scalar> for String {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Text(text) => text,
            Scalar::Integer(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
            Scalar::Flag(flag) => flag.to_string(),
        }
    }
}

fn scalar_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<Scalar>::deserialize(deserializer)?
        .map(String::from)
        .unwrap_or_default())
}

fn optional_scalar_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(String::from))
}

fn scalar_text_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(Option::<Vec<Scalar>>::deserialize(deserializer)?
        .unwrap_or_default()
        .into_iter()
        .map(String::from)
        .collect())
}

/// Opaque endpoint handle, displayed as `endpoint-<n>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct EndpointId(u64);

impl fmt::Display for EndpointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "endpoint-{}", self.0)
    }
}

impl Serialize for EndpointId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Hands out endpoint ids for one document
///
/// Ids are never reused until [`IdGenerator::reset`] is called, which only
/// happens when the whole endpoint list is replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    const BASELINE: u64 = 1;

    pub fn new() -> Self {
        Self {
            next: Self::BASELINE,
        }
    }

    pub fn next_id(&mut self) -> EndpointId {
        let id = EndpointId(self.next);
        self.next += 1;
        id
    }

    pub fn reset(&mut self) {
        self.next = Self::BASELINE;
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Request header entry
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Header {
    pub name: String,
    pub value: String,
    pub description: String,
}

impl Header {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Request body or query field
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameter {
    pub name: String,

    /// Free-form type label ("string", "object", "-" when unknown)
    #[serde(rename = "type")]
    pub param_type: String,

    pub required: Required,

    pub description: String,

    /// Default value, shown as `默认值: ...`
    #[serde(
        deserialize_with = "optional_scalar_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub default: Option<String>,

    /// Example value, shown as `示例: ...`
    #[serde(
        deserialize_with = "optional_scalar_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub example: Option<String>,

    /// Allowed values, shown as `可选值: a/b`
    #[serde(
        rename = "enum",
        deserialize_with = "scalar_text_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub allowed_values: Vec<String>,

    /// Extra remarks appended to the description
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, param_type: impl Into<String>, required: Required) -> Self {
        Self {
            name: name.into(),
            param_type: param_type.into(),
            required,
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = Some(example.into());
        self
    }

    pub fn with_allowed_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_values = values.into_iter().map(Into::into).collect();
        self
    }
}

/// Row of an endpoint's error code table
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorCode {
    #[serde(deserialize_with = "scalar_text")]
    pub code: String,
    pub message: String,
    pub description: String,
}

impl ErrorCode {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// One documented HTTP operation
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Endpoint {
    /// Assigned by the owning document; ids in definition files are ignored
    #[serde(skip_deserializing)]
    pub id: EndpointId,
    #[serde(alias = "title")]
    pub name: String,
    /// Lifecycle tag shown after the heading, e.g. `新接口`
    #[serde(skip_serializing_if = "String::is_empty")]
    pub status: String,
    pub method: HttpMethod,
    pub path: String,
    pub summary: String,
    pub headers: Vec<Header>,
    pub parameters: Vec<Parameter>,
    pub request_example: String,
    pub response_example: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ErrorCode>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl Endpoint {
    /// Empty endpoint with the given id and method GET
    pub fn new(id: EndpointId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Append an empty header row and return it for editing
    pub fn add_header(&mut self) -> &mut Header {
        self.headers.push(Header::default());
        let last = self.headers.len() - 1;
        &mut self.headers[last]
    }

    pub fn remove_header(&mut self, index: usize) -> Option<Header> {
        (index < self.headers.len()).then(|| self.headers.remove(index))
    }

    /// Append an empty parameter row (required by default) and return it
    pub fn add_parameter(&mut self) -> &mut Parameter {
        self.parameters
            .push(Parameter::new(String::new(), String::new(), Required::Yes));
        let last = self.parameters.len() - 1;
        &mut self.parameters[last]
    }

    pub fn remove_parameter(&mut self, index: usize) -> Option<Parameter> {
        (index < self.parameters.len()).then(|| self.parameters.remove(index))
    }
}

/// The whole documentation project
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    pub title: String,
    pub description: String,
    pub endpoints: Vec<Endpoint>,
    #[serde(skip)]
    ids: IdGenerator,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Document holding one endpoint with the usual JSON and bearer headers
    pub fn with_starter_endpoint() -> Self {
        let mut document = Self::new();
        let endpoint = document.add_endpoint();
        endpoint
            .headers
            .push(Header::new("Content-type", "application/json"));
        endpoint
            .headers
            .push(Header::new("Authorization", "Bearer {token}"));
        document
    }

    /// Allocate an id without attaching an endpoint
    pub fn next_id(&mut self) -> EndpointId {
        self.ids.next_id()
    }

    /// Restart id allocation from the baseline
    ///
    /// Only meaningful right before the endpoint list is rebuilt.
    pub fn reset_ids(&mut self) {
        self.ids.reset();
    }

    /// Append a fresh endpoint and return it for editing
    pub fn add_endpoint(&mut self) -> &mut Endpoint {
        let id = self.ids.next_id();
        self.endpoints.push(Endpoint::new(id));
        let last = self.endpoints.len() - 1;
        &mut self.endpoints[last]
    }

    pub fn remove_endpoint(&mut self, id: EndpointId) -> Option<Endpoint> {
        let index = self.endpoints.iter().position(|e| e.id == id)?;
        Some(self.endpoints.remove(index))
    }

    pub fn endpoint(&self, id: EndpointId) -> Option<&Endpoint> {
        self.endpoints.iter().find(|e| e.id == id)
    }

    pub fn endpoint_mut(&mut self, id: EndpointId) -> Option<&mut Endpoint> {
        self.endpoints.iter_mut().find(|e| e.id == id)
    }

    /// Give every endpoint a fresh id in list order
    ///
    /// Used after deserializing a definition file, whose ids are not trusted.
    pub fn reassign_ids(&mut self) {
        self.ids.reset();
        for endpoint in &mut self.endpoints {
            endpoint.id = self.ids.next_id();
        }
    }

    /// Replace title, description, endpoints, and id state wholesale
    pub fn replace_with(&mut self, other: Document) {
        *self = other;
    }
}
