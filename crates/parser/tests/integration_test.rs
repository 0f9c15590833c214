//! Integration tests for loading documents from disk

use apimd_common::{ApimdError, ErrorCode, HttpMethod, Required};
use apimd_parser::{import_openapi_file, load_document};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_json_definition_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("api.json");
    fs::write(
        &path,
        r#"{
            "title": "Billing",
            "description": "Invoices and payments",
            "endpoints": [
                {
                    "name": "List invoices",
                    "method": "GET",
                    "path": "/invoices",
                    "responseExample": "[]"
                },
                {
                    "name": "Pay invoice",
                    "method": "post",
                    "path": "/invoices/{id}/pay",
                    "requestExample": "curl -X POST https://api.example.com/invoices/1/pay"
                }
            ]
        }"#,
    )
    .unwrap();

    let document = load_document(&path).unwrap();
    assert_eq!(document.title, "Billing");
    assert_eq!(document.endpoints.len(), 2);
    assert_eq!(document.endpoints[1].method, HttpMethod::Post);
    assert_eq!(document.endpoints[1].id.to_string(), "endpoint-2");
    assert_eq!(document.endpoints[0].response_example, "[]");
}

#[test]
fn test_load_sectioned_yaml_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("quota.yml");
    fs::write(
        &path,
        r#"title: GPU 资源配额接口文档
sections:
  - title: 配额
    endpoints:
      - title: 资源配额修改接口
        status: 新接口
        method: put
        path: /api/v1/quotas/:tenant
        request:
          parameter_groups:
            - title: 请求体参数
              items:
                - name: region
                  type: string
                  required: true
                  description: 资源选区
                - name: quota_source
                  type: string
                  required: false
                  default: purchase
                  enum: [purchase, assign]
        response:
          examples:
            - title: 响应示例
              language: JSON
              content: |
                {"code": 0}
          errors:
            - title: 错误码
              items:
                - { code: 40001, message: quota exceeded, description: 超出可用配额 }
        notes:
          - 仅管理员可调用
  - endpoints:
      - title: 配额查询接口
        path: /api/v1/quotas
"#,
    )
    .unwrap();

    let document = load_document(&path).unwrap();
    assert_eq!(document.title, "GPU 资源配额接口文档");
    assert_eq!(document.endpoints.len(), 2);

    let update = &document.endpoints[0];
    assert_eq!(update.status, "新接口");
    assert_eq!(update.method, HttpMethod::Put);
    assert_eq!(update.parameters[0].required, Required::Yes);
    assert_eq!(update.parameters[1].required, Required::No);
    assert_eq!(update.parameters[1].default.as_deref(), Some("purchase"));
    assert_eq!(update.parameters[1].allowed_values, vec!["purchase", "assign"]);
    assert_eq!(update.response_example, "{\"code\": 0}\n");
    assert_eq!(
        update.errors,
        vec![ErrorCode::new("40001", "quota exceeded").with_description("超出可用配额")]
    );
    assert_eq!(update.notes, vec!["仅管理员可调用"]);

    let list = &document.endpoints[1];
    assert_eq!(list.id.to_string(), "endpoint-2");
    assert_eq!(list.method, HttpMethod::Get);
    assert!(list.status.is_empty());
}

#[test]
fn test_empty_definition_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("api.yaml");
    fs::write(&path, "   \n").unwrap();

    let err = load_document(&path).unwrap_err();
    assert!(matches!(err, ApimdError::EmptyDefinition(_)));
}

#[test]
fn test_missing_definition_file() {
    let dir = TempDir::new().unwrap();
    let err = load_document(&dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, ApimdError::Io(_)));
}

#[test]
fn test_import_openapi_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("openapi.json");
    fs::write(
        &path,
        r#"{ "openapi": "3.0.0", "info": { "title": "Ping" }, "paths": { "/ping": { "get": {} } } }"#,
    )
    .unwrap();

    let document = import_openapi_file(&path).unwrap();
    assert_eq!(document.title, "Ping");
    assert_eq!(document.endpoints[0].name, "GET /ping");
}

#[test]
fn test_import_openapi_file_with_invalid_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("openapi.json");
    fs::write(&path, "openapi: 3.0.0").unwrap();

    let err = import_openapi_file(&path).unwrap_err();
    assert!(matches!(err, ApimdError::MalformedJson(_)));
}
