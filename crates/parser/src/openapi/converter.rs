//! Converts an OpenAPI document into the APImd document model

use super::examples::{extract_body_example, extract_response_example};
use super::parameters::{collect_parameters, merge_parameters, schema_parameters};
use super::types::{OpenApiDocument, Operation, PathEntry, PathItem, PathItemMember};
use apimd_common::{Document, Endpoint, HttpMethod, Result, DEFAULT_DOCUMENT_TITLE};
use serde_json::Value;
use tracing::{debug, info};

/// Convert a parsed OpenAPI document into a fresh [`Document`]
///
/// One endpoint is produced per recognized `(path, method)` operation, in
/// document order. Endpoint ids start from the baseline, so importing the
/// same input twice yields identical documents. Malformed paths, operations,
/// and parameters are skipped rather than reported.
///
/// Fails only when `raw` is not a JSON object.
pub fn import_openapi(raw: &Value) -> Result<Document> {
    let spec = OpenApiDocument::from_value(raw)?;

    let mut document = Document::new();
    document.title = spec.title().unwrap_or(DEFAULT_DOCUMENT_TITLE).to_string();
    document.description = spec.description().unwrap_or_default().to_string();
    document.reset_ids();

    let mut endpoints = Vec::new();
    for (path, entry) in spec.paths() {
        match entry {
            PathEntry::Item(item) => {
                convert_path_item(&mut document, path, item, &mut endpoints);
            }
            PathEntry::Malformed => {
                debug!(path, "skipping path item that is not an object");
            }
        }
    }

    if endpoints.is_empty() {
        debug!("no operations found, adding a blank endpoint");
        let id = document.next_id();
        endpoints.push(Endpoint::new(id));
    }

    info!(
        title = %document.title,
        endpoints = endpoints.len(),
        "imported OpenAPI document"
    );
    document.endpoints = endpoints;
    Ok(document)
}

fn convert_path_item(
    document: &mut Document,
    path: &str,
    item: PathItem<'_>,
    endpoints: &mut Vec<Endpoint>,
) {
    for member in item.members() {
        match member {
            PathItemMember::Operation(method, operation) => {
                let endpoint = build_endpoint(document, path, method, &item, &operation);
                endpoints.push(endpoint);
            }
            PathItemMember::MalformedOperation(method) => {
                debug!(path, %method, "skipping operation that is not an object");
            }
            PathItemMember::Other(_) => {}
        }
    }
}

fn build_endpoint(
    document: &mut Document,
    path: &str,
    method: HttpMethod,
    item: &PathItem<'_>,
    operation: &Operation<'_>,
) -> Endpoint {
    let mut endpoint = Endpoint::new(document.next_id());
    endpoint.name = operation
        .summary()
        .or_else(|| operation.operation_id())
        .map(str::to_string)
        .unwrap_or_else(|| format!("{} {}", method, path));
    endpoint.method = method;
    endpoint.path = path.to_string();
    endpoint.summary = operation
        .description()
        .or_else(|| operation.summary())
        .unwrap_or_default()
        .to_string();

    let collected = collect_parameters(item.parameters(), operation.parameters());
    endpoint.headers = collected.headers;
    let mut body_fields = Vec::new();

    if let Some(request_body) = operation.request_body() {
        let example = extract_body_example(&request_body);
        if !example.is_empty() {
            endpoint.request_example = example;
        }
        body_fields = schema_parameters(request_body.content());
    }
    endpoint.parameters = merge_parameters(collected.parameters, body_fields);

    if let Some(responses) = operation.responses() {
        let example = extract_response_example(&responses);
        if !example.is_empty() {
            endpoint.response_example = example;
        }
    }

    debug!(
        id = %endpoint.id,
        method = %endpoint.method,
        path = %endpoint.path,
        headers = endpoint.headers.len(),
        parameters = endpoint.parameters.len(),
        "converted operation"
    );
    endpoint
}
