//! The live document being edited
//!
//! A [`Session`] owns exactly one [`Document`]. Form edits mutate it field by
//! field through [`Session::document_mut`]; an import replaces it wholesale,
//! and only once the import has fully succeeded.

use crate::openapi::import_openapi;
use apimd_common::{ApimdError, Document, Result};
use serde_json::Value;
use tracing::warn;

/// Editing session around a single document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    document: Document,
}

impl Session {
    /// Start with one starter endpoint carrying the usual headers
    pub fn new() -> Self {
        Self {
            document: Document::with_starter_endpoint(),
        }
    }

    pub fn from_document(document: Document) -> Self {
        Self { document }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    /// Replace the document with an imported OpenAPI document
    ///
    /// On error the current document is left exactly as it was.
    pub fn import_value(&mut self, raw: &Value) -> Result<()> {
        let imported = import_openapi(raw).inspect_err(|e| {
            warn!(error = %e, "OpenAPI import rejected, keeping current document");
        })?;
        self.document.replace_with(imported);
        Ok(())
    }

    /// Parse JSON text, then import it
    ///
    /// Text that is not JSON fails with [`ApimdError::MalformedJson`] before
    /// the importer runs.
    pub fn import_json(&mut self, text: &str) -> Result<()> {
        let raw: Value = serde_json::from_str(text).map_err(|e| {
            warn!(error = %e, "OpenAPI file is not valid JSON");
            ApimdError::MalformedJson(e)
        })?;
        self.import_value(&raw)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
