//! Sectioned document definitions
//!
//! Older definition files group endpoints into sections and nest request and
//! response details into blocks:
//!
//! ```yaml
//! title: GPU 资源配额接口文档
//! sections:
//!   - endpoints:
//!       - title: 资源配额修改接口
//!         status: 新接口
//!         method: PUT
//!         request:
//!           parameter_groups:
//!             - title: 请求体参数
//!               items:
//!                 - { name: region, type: string, required: true }
//!           examples:
//!             - { title: 请求示例, language: JSON, content: "{}" }
//! ```
//!
//! They are flattened into the regular [`Document`] in section order.

use apimd_common::{Document, ErrorCode, Header, HttpMethod, Parameter};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct SectionedDefinition {
    title: String,
    description: Option<String>,
    sections: Vec<Section>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Section {
    title: String,
    endpoints: Vec<SectionEndpoint>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SectionEndpoint {
    title: String,
    status: Option<String>,
    summary: Option<String>,
    method: HttpMethod,
    path: String,
    headers: Vec<Header>,
    request: Option<Block>,
    response: Option<Block>,
    notes: Vec<String>,
}

/// `request` or `response` block; only responses carry `errors`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Block {
    parameter_groups: Vec<ParameterGroup>,
    examples: Vec<Example>,
    errors: Vec<ErrorGroup>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ParameterGroup {
    items: Vec<Parameter>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Example {
    content: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ErrorGroup {
    items: Vec<ErrorCode>,
}

impl SectionedDefinition {
    pub(crate) fn into_document(self) -> Document {
        let mut document = Document::new();
        document.title = self.title;
        document.description = self.description.unwrap_or_default();

        for section in self.sections {
            if !section.title.is_empty() {
                debug!(section = %section.title, "flattening definition section");
            }
            for source in section.endpoints {
                let endpoint = document.add_endpoint();
                endpoint.name = source.title;
                endpoint.status = source.status.unwrap_or_default();
                endpoint.summary = source.summary.unwrap_or_default();
                endpoint.method = source.method;
                endpoint.path = source.path;
                endpoint.headers = source.headers;
                endpoint.notes = source.notes;

                if let Some(request) = source.request {
                    endpoint.parameters = flatten_parameters(request.parameter_groups);
                    endpoint.request_example = first_example(request.examples);
                }
                if let Some(response) = source.response {
                    if !response.parameter_groups.is_empty() {
                        debug!(
                            endpoint = %endpoint.name,
                            "response parameter groups are not documented, skipping"
                        );
                    }
                    endpoint.response_example = first_example(response.examples);
                    endpoint.errors = response
                        .errors
                        .into_iter()
                        .flat_map(|group| group.items)
                        .collect();
                }
            }
        }

        document
    }
}

fn flatten_parameters(groups: Vec<ParameterGroup>) -> Vec<Parameter> {
    groups.into_iter().flat_map(|group| group.items).collect()
}

fn first_example(examples: Vec<Example>) -> String {
    if examples.len() > 1 {
        debug!(count = examples.len(), "keeping only the first example");
    }
    examples
        .into_iter()
        .next()
        .map(|example| example.content)
        .unwrap_or_default()
}
