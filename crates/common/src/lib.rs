//! Common types and utilities for APImd
//!
//! This crate contains the document model, the error type, and the
//! configuration loading shared by the parser, generator, and CLI components.

mod config;
mod document;

pub use config::{Config, OutputConfig, RenderOptions, CONFIG_FILE_NAMES};
pub use document::{
    Document, Endpoint, EndpointId, ErrorCode, Header, HttpMethod, IdGenerator, Parameter,
    Required, DEFAULT_DOCUMENT_TITLE,
};

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while importing, loading, or rendering documents
#[derive(Error, Debug)]
pub enum ApimdError {
    #[error("Invalid import input: {0}")]
    InvalidImportInput(String),

    #[error("Malformed JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Document definition is empty: {}", .0.display())]
    EmptyDefinition(PathBuf),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid document definition: {0}")]
    InvalidDefinition(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for APImd operations
pub type Result<T> = std::result::Result<T, ApimdError>;
