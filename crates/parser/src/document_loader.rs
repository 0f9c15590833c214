//! Document definition loader
//!
//! Loads a hand-written [`Document`] definition from JSON or YAML. The file
//! uses the same shape the document model serializes to:
//!
//! ```yaml
//! title: Quota API
//! endpoints:
//!   - name: Update quota
//!     method: PUT
//!     path: /api/v1/quotas/{tenant}
//!     parameters:
//!       - { name: region, type: string, required: "yes" }
//! ```
//!
//! Files with a top-level `sections` list use the sectioned layout instead
//! (see [`SectionedDefinition`]).

use crate::sectioned_definition::SectionedDefinition;
use apimd_common::{ApimdError, Document, Result};
use std::path::Path;
use tracing::debug;

/// Definition file formats, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionFormat {
    Json,
    Yaml,
}

impl DefinitionFormat {
    /// Detect the format from a file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "" => Err(ApimdError::UnsupportedFormat(format!(
                "{} has no file extension",
                path.display()
            ))),
            other => Err(ApimdError::UnsupportedFormat(format!(".{}", other))),
        }
    }
}

/// Loads document definitions from disk or strings
pub struct DocumentLoader;

impl DocumentLoader {
    /// Load a definition file, picking the parser by extension
    pub fn load_from_file(path: &Path) -> Result<Document> {
        let format = DefinitionFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;

        if content.trim().is_empty() {
            return Err(ApimdError::EmptyDefinition(path.to_path_buf()));
        }

        debug!(path = %path.display(), ?format, "loading document definition");
        Self::load_from_str(&content, format)
    }

    /// Parse definition text in the given format
    pub fn load_from_str(content: &str, format: DefinitionFormat) -> Result<Document> {
        let mut document = match format {
            DefinitionFormat::Json => {
                let value: serde_json::Value = serde_json::from_str(content)?;
                if !value.is_object() {
                    return Err(not_a_mapping());
                }
                let decoded = if value.get("sections").is_some() {
                    serde_json::from_value::<SectionedDefinition>(value)
                        .map(SectionedDefinition::into_document)
                } else {
                    serde_json::from_value::<Document>(value)
                };
                decoded.map_err(|e| ApimdError::InvalidDefinition(e.to_string()))?
            }
            DefinitionFormat::Yaml => {
                let value: serde_yaml::Value = serde_yaml::from_str(content)?;
                if !value.is_mapping() {
                    return Err(not_a_mapping());
                }
                let decoded = if value.get("sections").is_some() {
                    serde_yaml::from_value::<SectionedDefinition>(value)
                        .map(SectionedDefinition::into_document)
                } else {
                    serde_yaml::from_value::<Document>(value)
                };
                decoded.map_err(|e| ApimdError::InvalidDefinition(e.to_string()))?
            }
        };

        document.reassign_ids();
        Ok(document)
    }
}

fn not_a_mapping() -> ApimdError {
    ApimdError::InvalidDefinition("document definition must be a mapping".to_string())
}

/// Load a document definition file (convenience function)
pub fn load_document(path: &Path) -> Result<Document> {
    DocumentLoader::load_from_file(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use apimd_common::{HttpMethod, Required};

    #[test]
    fn test_format_detection() {
        assert_eq!(
            DefinitionFormat::from_path(Path::new("api.JSON")).unwrap(),
            DefinitionFormat::Json
        );
        assert_eq!(
            DefinitionFormat::from_path(Path::new("api.yml")).unwrap(),
            DefinitionFormat::Yaml
        );
        assert!(matches!(
            DefinitionFormat::from_path(Path::new("api.toml")),
            Err(ApimdError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            DefinitionFormat::from_path(Path::new("Makefile")),
            Err(ApimdError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_load_yaml_definition() {
        let yaml = r#"
title: GPU 资源配额接口文档
endpoints:
  - name: 资源配额修改接口
    method: put
    path: /api/v1/quotas/:tenant
    headers:
      - name: Content-type
        value: application/json
    parameters:
      - name: region
        type: string
        required: "yes"
        description: 资源选区
"#;
        let document = DocumentLoader::load_from_str(yaml, DefinitionFormat::Yaml).unwrap();
        assert_eq!(document.title, "GPU 资源配额接口文档");
        let endpoint = &document.endpoints[0];
        assert_eq!(endpoint.id.to_string(), "endpoint-1");
        assert_eq!(endpoint.method, HttpMethod::Put);
        assert_eq!(endpoint.headers[0].value, "application/json");
        assert!(endpoint.headers[0].description.is_empty());
        assert_eq!(endpoint.parameters[0].required, Required::Yes);
    }

    #[test]
    fn test_load_yaml_with_boolean_required() {
        let yaml = r#"
title: Quota
endpoints:
  - title: Update quota
    status: 新接口
    method: PUT
    parameters:
      - name: region
        type: string
        required: true
      - name: quota_source
        type: string
        required: false
        enum: [purchase, assign]
    notes:
      - 仅管理员可调用
"#;
        let document = DocumentLoader::load_from_str(yaml, DefinitionFormat::Yaml).unwrap();
        let endpoint = &document.endpoints[0];
        assert_eq!(endpoint.name, "Update quota");
        assert_eq!(endpoint.status, "新接口");
        assert_eq!(endpoint.parameters[0].required, Required::Yes);
        assert_eq!(endpoint.parameters[1].required, Required::No);
        assert_eq!(endpoint.parameters[1].allowed_values, vec!["purchase", "assign"]);
        assert_eq!(endpoint.notes, vec!["仅管理员可调用"]);
    }

    #[test]
    fn test_load_sectioned_yaml_definition() {
        let yaml = r#"
title: GPU 资源配额接口文档
sections:
  - endpoints:
      - title: 资源配额修改接口
        status: 新接口
        summary: 用于修改某配额
        method: PUT
        path: /api/v1/quotas/:tenant
        headers:
          - { name: Content-type, value: application/json }
        request:
          parameter_groups:
            - title: 请求体参数
              items:
                - { name: region, type: string, required: true, description: 资源选区 }
                - name: quota_source
                  type: string
                  required: true
                  enum: [purchase, assign]
          examples:
            - title: 请求示例
              language: JSON
              content: "{"region": "TW"}"
        response:
          examples:
            - { title: 响应示例, language: JSON, content: "{"code": 0}" }
"#;
        let document = DocumentLoader::load_from_str(yaml, DefinitionFormat::Yaml).unwrap();
        assert_eq!(document.title, "GPU 资源配额接口文档");

        let endpoint = &document.endpoints[0];
        assert_eq!(endpoint.id.to_string(), "endpoint-1");
        assert_eq!(endpoint.name, "资源配额修改接口");
        assert_eq!(endpoint.status, "新接口");
        assert_eq!(endpoint.method, HttpMethod::Put);
        assert_eq!(endpoint.headers.len(), 1);
        assert_eq!(endpoint.parameters.len(), 2);
        assert_eq!(endpoint.parameters[1].required, Required::Yes);
        assert_eq!(endpoint.parameters[1].allowed_values, vec!["purchase", "assign"]);
        assert_eq!(endpoint.request_example, "{\"region\": \"TW\"}");
        assert_eq!(endpoint.response_example, "{\"code\": 0}");
    }

    #[test]
    fn test_non_mapping_is_rejected() {
        let err = DocumentLoader::load_from_str("[1, 2]", DefinitionFormat::Json).unwrap_err();
        assert!(matches!(err, ApimdError::InvalidDefinition(_)));

        let err = DocumentLoader::load_from_str("- a\n- b\n", DefinitionFormat::Yaml).unwrap_err();
        assert!(matches!(err, ApimdError::InvalidDefinition(_)));
    }

    #[test]
    fn test_bad_method_is_invalid_definition() {
        let err = DocumentLoader::load_from_str(
            r#"{ "endpoints": [ { "method": "FETCH" } ] }"#,
            DefinitionFormat::Json,
        )
        .unwrap_err();
        assert!(matches!(err, ApimdError::InvalidDefinition(_)));
    }

    #[test]
    fn test_malformed_json_definition() {
        let err = DocumentLoader::load_from_str("{", DefinitionFormat::Json).unwrap_err();
        assert!(matches!(err, ApimdError::MalformedJson(_)));
    }
}
