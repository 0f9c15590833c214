//! Document sources for APImd
//!
//! This crate produces [`Document`](apimd_common::Document)s from the two
//! inputs APImd accepts:
//! - OpenAPI / Swagger JSON documents ([`openapi`])
//! - Hand-written document definitions in JSON or YAML ([`DocumentLoader`])
//!
//! It also provides the [`Session`] that owns the document being edited and
//! guarantees a failed import never touches it.

mod document_loader;
pub mod openapi;
mod sectioned_definition;
mod session;

pub use document_loader::{load_document, DefinitionFormat, DocumentLoader};
pub use openapi::{import_openapi, OpenApiParser};
pub use session::Session;

use apimd_common::{Document, Result};
use std::path::Path;

/// Import an OpenAPI JSON file into a [`Document`]
///
/// # Arguments
/// * `path` - Path to the OpenAPI JSON file
///
/// # Returns
/// * `Document` - One endpoint per operation in the file
pub fn import_openapi_file(path: &Path) -> Result<Document> {
    OpenApiParser::from_file(path)?.parse()
}
