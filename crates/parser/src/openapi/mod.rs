//! OpenAPI (Swagger) importer
//!
//! Turns an OpenAPI 3.x or Swagger 2.x JSON document into an APImd
//! [`Document`](apimd_common::Document): one endpoint per `(path, method)`
//! operation, with headers, parameters, and example payloads pulled from the
//! places OpenAPI keeps them.
//!
//! ## Leniency
//! Documents are not validated. Entries with an unexpected shape are skipped
//! or defaulted; only a top-level value that is not an object is an error.
//! `$ref` pointers are not resolved.
//!
//! ## Usage
//! ```rust,ignore
//! use apimd_parser::openapi::OpenApiParser;
//!
//! let parser = OpenApiParser::from_file("petstore.json")?;
//! let document = parser.parse()?;
//! ```

mod converter;
mod examples;
mod parameters;
mod parser;
mod schema;
mod types;

pub use converter::import_openapi;
pub use examples::{extract_body_example, extract_example, extract_response_example};
pub use parameters::{
    collect_parameters, merge_parameters, schema_parameters, CollectedParameters,
    BODY_SCHEMA_MEDIA_TYPES,
};
pub use parser::OpenApiParser;
pub use schema::{infer_type, SchemaShape, UNKNOWN_TYPE};
pub use types::*;
