//! OpenAPI spec file parser

use apimd_common::{ApimdError, Document, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// OpenAPI document parser
///
/// Holds a parsed OpenAPI 3.x or Swagger 2.x document as raw JSON. The
/// document is not validated; conversion tolerates missing and malformed
/// fields.
#[derive(Debug, Clone)]
pub struct OpenApiParser {
    /// Loaded OpenAPI document
    spec: Value,
}

impl OpenApiParser {
    /// Load an OpenAPI document from a JSON file
    ///
    /// # Example
    /// ```rust,ignore
    /// let parser = OpenApiParser::from_file("petstore.json")?;
    /// let document = parser.parse()?;
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    /// Parse an OpenAPI document from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let spec: Value = serde_json::from_str(json).map_err(ApimdError::MalformedJson)?;
        Ok(Self { spec })
    }

    /// Wrap an already parsed document
    pub fn from_value(spec: Value) -> Self {
        Self { spec }
    }

    /// Convert the OpenAPI document into a [`Document`]
    pub fn parse(&self) -> Result<Document> {
        super::converter::import_openapi(&self.spec)
    }

    /// Get reference to the underlying OpenAPI document
    pub fn spec(&self) -> &Value {
        &self.spec
    }
}
