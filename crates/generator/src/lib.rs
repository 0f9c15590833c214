//! Markdown generation for APImd documents
//!
//! Rendering is total: any [`Document`] produces Markdown, with placeholders
//! standing in for blank titles and names. Only writing the result to disk
//! can fail.

mod markdown;

pub use markdown::{detect_language, DEFAULT_ENDPOINT_NAME};

use apimd_common::{ApimdError, Document, RenderOptions, Result, DEFAULT_DOCUMENT_TITLE};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Markdown generator
///
/// Turns a [`Document`] into a single Markdown page:
/// - `# title` and optional description
/// - one `##` section per endpoint, in document order
/// - request headers, a body parameter table and fenced examples
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownGenerator {
    options: RenderOptions,
}

impl MarkdownGenerator {
    /// Create a generator with the given options
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Options this generator renders with
    pub fn options(&self) -> RenderOptions {
        self.options
    }

    /// Render a document to Markdown
    ///
    /// Lines are joined with `\n` and there is no trailing newline.
    pub fn render(&self, document: &Document) -> String {
        let mut lines = Vec::new();

        let title = markdown::non_blank(&document.title).unwrap_or(DEFAULT_DOCUMENT_TITLE);
        lines.push(format!("# {}", title));

        if let Some(description) = markdown::non_blank(&document.description) {
            lines.push(String::new());
            lines.push(description.to_string());
        }

        for (index, endpoint) in document.endpoints.iter().enumerate() {
            let prefix = if self.options.numbering {
                format!("{}. ", index + 1)
            } else {
                String::new()
            };
            markdown::endpoint_section(&mut lines, &prefix, endpoint);
        }

        debug!(
            endpoints = document.endpoints.len(),
            lines = lines.len(),
            "rendered markdown"
        );
        lines.join("\n")
    }

    /// Render a document and write it to `output_path`
    ///
    /// Missing parent directories are created. The file ends with a newline.
    pub fn generate_to_file(&self, document: &Document, output_path: &Path) -> Result<()> {
        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                ApimdError::Generation(format!(
                    "Failed to create output directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let mut rendered = self.render(document);
        rendered.push('\n');

        fs::write(output_path, rendered).map_err(|e| {
            ApimdError::Generation(format!(
                "Failed to write {}: {}",
                output_path.display(),
                e
            ))
        })?;

        info!(path = %output_path.display(), "wrote markdown");
        Ok(())
    }
}

/// Render a document with default options (convenience function)
pub fn render_markdown(document: &Document) -> String {
    MarkdownGenerator::default().render(document)
}

/// Render a document with default options and write it to a file
pub fn generate_markdown(document: &Document, output_path: &Path) -> Result<()> {
    MarkdownGenerator::default().generate_to_file(document, output_path)
}
