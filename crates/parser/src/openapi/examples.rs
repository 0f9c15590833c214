//! Example payload extraction
//!
//! An OpenAPI example can live in three places on a media type object. The
//! first usable one found wins; the JSON media type keys are preferred over
//! others.

use super::types::{truthy, Content, ExampleSource, MediaType, RequestBody, Responses};
use serde_json::Value;
use tracing::debug;

/// Media type keys looked up before falling back to the first entry
///
/// Keys are matched literally: `application/*+json` is only found under that
/// exact key, never as a pattern over vendor types.
const PREFERRED_MEDIA_TYPES: [&str; 2] = ["application/json", "application/*+json"];

/// Pick the media type object to read examples from
///
/// The first truthy entry among [`PREFERRED_MEDIA_TYPES`], else whatever
/// media type comes first in the map.
fn select_media_type<'a>(content: &Content<'a>) -> Option<&'a Value> {
    PREFERRED_MEDIA_TYPES
        .iter()
        .find_map(|media_type| content.get(media_type).filter(|v| truthy(v)))
        .or_else(|| content.iter().next().map(|(_, value)| value))
        .filter(|value| truthy(value))
}

/// Representative example for a content map, if any
///
/// # Examples
/// ```
/// use apimd_parser::openapi::{extract_example, Content};
/// use serde_json::json;
///
/// let content = json!({ "application/json": { "example": { "ok": true } } });
/// let content = Content::from_map(content.as_object().unwrap());
/// assert_eq!(extract_example(&content), Some(&json!({ "ok": true })));
/// ```
pub fn extract_example<'a>(content: &Content<'a>) -> Option<&'a Value> {
    let media = MediaType::from_value(select_media_type(content)?)?;
    match media.example_source() {
        ExampleSource::Inline(example) | ExampleSource::Schema(example) => Some(example),
        ExampleSource::Named(example) => example,
        ExampleSource::Absent => None,
    }
}

/// Pretty-printed request example of an operation, or empty
pub fn extract_body_example(request_body: &RequestBody<'_>) -> String {
    request_body
        .content()
        .and_then(|content| extract_example(&content))
        .map(pretty_json)
        .unwrap_or_default()
}

/// Pretty-printed example of the first response object, or empty
pub fn extract_response_example(responses: &Responses<'_>) -> String {
    responses
        .first_content()
        .flatten()
        .and_then(|content| extract_example(&content))
        .map(pretty_json)
        .unwrap_or_default()
}

/// Two-space indented JSON text
fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        debug!(error = %e, "falling back to compact example text");
        value.to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn example_of(value: &Value) -> Option<Value> {
        let content = Content::from_map(value.as_object().unwrap());
        extract_example(&content).cloned()
    }

    #[test]
    fn test_prefers_application_json() {
        let content = json!({
            "text/plain": { "example": "plain" },
            "application/json": { "example": { "kind": "json" } }
        });
        assert_eq!(example_of(&content), Some(json!({ "kind": "json" })));
    }

    #[test]
    fn test_vendor_json_does_not_beat_first_entry() {
        let content = json!({
            "text/plain": { "example": "plain" },
            "application/vnd.api+json": { "example": { "kind": "vendor" } }
        });
        assert_eq!(example_of(&content), Some(json!("plain")));

        let literal = json!({
            "text/plain": { "example": "plain" },
            "application/*+json": { "example": [1] }
        });
        assert_eq!(example_of(&literal), Some(json!([1])));
    }

    #[test]
    fn test_vendor_json_body_example_text() {
        let body = json!({
            "content": {
                "text/plain": { "example": "plain" },
                "application/vnd.api+json": { "example": { "kind": "vendor" } }
            }
        });
        let body = RequestBody::from_value(&body).unwrap();
        assert_eq!(extract_body_example(&body), "\"plain\"");
    }

    #[test]
    fn test_falls_back_to_first_media_type() {
        let content = json!({
            "application/xml": { "example": "<a/>" },
            "text/plain": { "example": "plain" }
        });
        assert_eq!(example_of(&content), Some(json!("<a/>")));
    }

    #[test]
    fn test_first_media_type_without_example() {
        let content = json!({
            "application/xml": { "schema": {} },
            "text/plain": { "example": "plain" }
        });
        assert_eq!(example_of(&content), None);
        assert_eq!(example_of(&json!({})), None);
        assert_eq!(example_of(&json!({ "application/json": null })), None);
    }

    #[test]
    fn test_named_and_schema_examples() {
        let named = json!({
            "application/json": {
                "examples": { "minimal": { "value": { "id": 1 } }, "full": { "value": { "id": 2 } } }
            }
        });
        assert_eq!(example_of(&named), Some(json!({ "id": 1 })));

        let schema = json!({
            "application/json": { "schema": { "type": "object", "example": { "id": 3 } } }
        });
        assert_eq!(example_of(&schema), Some(json!({ "id": 3 })));
    }

    #[test]
    fn test_extraction_is_repeatable() {
        let content = json!({ "application/json": { "example": { "a": [1, 2] } } });
        assert_eq!(example_of(&content), example_of(&content));
    }

    #[test]
    fn test_response_example_text() {
        let responses = json!({
            "200": { "content": { "application/json": { "example": { "ok": true } } } }
        });
        let responses = Responses::from_value(&responses).unwrap();
        assert_eq!(extract_response_example(&responses), "{\n  \"ok\": true\n}");
    }

    #[test]
    fn test_response_example_skips_non_objects() {
        let responses = json!({
            "default": "see docs",
            "404": { "content": { "application/json": { "example": { "error": "missing" } } } },
            "200": { "content": { "application/json": { "example": { "ok": true } } } }
        });
        let responses = Responses::from_value(&responses).unwrap();
        assert_eq!(
            extract_response_example(&responses),
            "{\n  \"error\": \"missing\"\n}"
        );

        let no_content = json!({ "204": { "description": "No Content" } });
        let no_content = Responses::from_value(&no_content).unwrap();
        assert_eq!(extract_response_example(&no_content), "");
    }

    #[test]
    fn test_body_example_text() {
        let body = json!({
            "content": { "application/json": { "examples": { "a": { "value": [1, 2] } } } }
        });
        let body = RequestBody::from_value(&body).unwrap();
        assert_eq!(extract_body_example(&body), "[\n  1,\n  2\n]");

        let bare = json!(true);
        let bare = RequestBody::from_value(&bare).unwrap();
        assert_eq!(extract_body_example(&bare), "");
        assert!(RequestBody::from_value(&json!(null)).is_none());
    }

    #[test]
    fn test_array_response_is_selected_without_content() {
        let responses = json!({
            "200": [],
            "201": { "content": { "application/json": { "example": { "id": 1 } } } }
        });
        let responses = Responses::from_value(&responses).unwrap();
        assert_eq!(extract_response_example(&responses), "");
    }
}
