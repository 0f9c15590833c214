//! Integration test for the OpenAPI importer

use apimd_common::{ApimdError, Header, HttpMethod, Parameter, Required};
use apimd_parser::openapi::OpenApiParser;
use apimd_parser::Session;
use pretty_assertions::assert_eq;

const QUOTA_API: &str = r##"{
    "openapi": "3.0.1",
    "info": {
        "title": "GPU 资源配额接口文档",
        "description": "配额管理相关接口",
        "version": "1.0.0"
    },
    "paths": {
        "/api/v1/quotas/{tenant}": {
            "parameters": [
                {
                    "name": "tenant",
                    "in": "path",
                    "required": true,
                    "description": "租户 ID",
                    "schema": { "type": "string" }
                },
                {
                    "name": "Authorization",
                    "in": "header",
                    "required": true,
                    "schema": { "type": "string", "example": "Bearer {token}" }
                }
            ],
            "get": {
                "operationId": "getQuota",
                "responses": {
                    "200": {
                        "description": "OK",
                        "content": {
                            "application/json": {
                                "examples": {
                                    "default": { "value": { "code": 0, "data": { "gpu": 8 } } }
                                }
                            }
                        }
                    }
                }
            },
            "put": {
                "summary": "资源配额修改接口",
                "description": "用于修改某配额",
                "parameters": [
                    {
                        "name": "Content-Type",
                        "in": "header",
                        "schema": { "type": "string", "default": "application/json" }
                    },
                    {
                        "name": "dry_run",
                        "in": "query",
                        "schema": { "type": "boolean" }
                    }
                ],
                "requestBody": {
                    "required": true,
                    "content": {
                        "application/json": {
                            "schema": {
                                "type": "object",
                                "required": ["region", "quota_source"],
                                "properties": {
                                    "region": { "type": "string", "description": "资源选区" },
                                    "quota_source": { "type": "string", "description": "配额来源" },
                                    "limits": { "type": "array", "items": { "type": "integer" } }
                                },
                                "example": { "region": "TW", "quota_source": "purchase" }
                            }
                        }
                    }
                },
                "responses": {
                    "200": {
                        "description": "OK",
                        "content": {
                            "application/json": { "example": { "code": 0 } }
                        }
                    }
                }
            }
        },
        "/healthz": {
            "head": {}
        }
    }
}"##;

#[test]
fn test_import_quota_api() {
    let parser = OpenApiParser::from_json(QUOTA_API).unwrap();
    let document = parser.parse().unwrap();

    assert_eq!(document.title, "GPU 资源配额接口文档");
    assert_eq!(document.description, "配额管理相关接口");
    assert_eq!(document.endpoints.len(), 3);

    let get = &document.endpoints[0];
    assert_eq!(get.id.to_string(), "endpoint-1");
    assert_eq!(get.name, "getQuota");
    assert_eq!(get.method, HttpMethod::Get);
    assert_eq!(get.path, "/api/v1/quotas/{tenant}");
    assert_eq!(get.summary, "");
    assert_eq!(
        get.headers,
        vec![Header::new("Authorization", "Bearer {token}")]
    );
    assert_eq!(
        get.parameters,
        vec![Parameter::new("tenant", "string", Required::Yes).with_description("租户 ID")]
    );
    assert_eq!(
        get.response_example,
        "{\n  \"code\": 0,\n  \"data\": {\n    \"gpu\": 8\n  }\n}"
    );
    assert!(get.request_example.is_empty());

    let put = &document.endpoints[1];
    assert_eq!(put.name, "资源配额修改接口");
    assert_eq!(put.summary, "用于修改某配额");
    assert_eq!(
        put.headers,
        vec![
            Header::new("Authorization", "Bearer {token}"),
            Header::new("Content-Type", "application/json"),
        ]
    );
    assert_eq!(
        put.parameters,
        vec![
            Parameter::new("tenant", "string", Required::Yes).with_description("租户 ID"),
            Parameter::new("dry_run", "boolean", Required::No),
            Parameter::new("region", "string", Required::Yes).with_description("资源选区"),
            Parameter::new("quota_source", "string", Required::Yes).with_description("配额来源"),
            Parameter::new("limits", "array", Required::No),
        ]
    );
    assert_eq!(
        put.request_example,
        "{\n  \"region\": \"TW\",\n  \"quota_source\": \"purchase\"\n}"
    );
    assert_eq!(put.response_example, "{\n  \"code\": 0\n}");

    let head = &document.endpoints[2];
    assert_eq!(head.name, "HEAD /healthz");
    assert_eq!(head.method, HttpMethod::Head);
    assert_eq!(head.id.to_string(), "endpoint-3");
}

#[test]
fn test_import_swagger_2_document() {
    let swagger = r#"{
        "swagger": "2.0",
        "info": { "title": "Petstore" },
        "paths": {
            "/pets": {
                "post": {
                    "summary": "Add a pet",
                    "parameters": [
                        { "name": "body", "in": "body", "required": true, "schema": { "properties": { "name": {} } } },
                        { "name": "X-Api-Key", "in": "header", "type": "string" }
                    ]
                }
            }
        }
    }"#;

    let document = OpenApiParser::from_json(swagger).unwrap().parse().unwrap();
    let endpoint = &document.endpoints[0];
    assert_eq!(endpoint.name, "Add a pet");
    assert_eq!(endpoint.headers, vec![Header::new("X-Api-Key", "")]);
    assert_eq!(
        endpoint.parameters,
        vec![Parameter::new("body", "object", Required::Yes)]
    );
}

#[test]
fn test_duplicate_parameters_collapse() {
    let spec = r#"{
        "paths": {
            "/items/{id}": {
                "parameters": [
                    { "name": "id", "in": "path", "required": true, "schema": { "type": "string" } }
                ],
                "delete": {
                    "parameters": [
                        { "name": "id", "in": "path", "description": "again", "schema": { "type": "string" } }
                    ]
                }
            }
        }
    }"#;

    let document = OpenApiParser::from_json(spec).unwrap().parse().unwrap();
    assert_eq!(
        document.endpoints[0].parameters,
        vec![Parameter::new("id", "string", Required::Yes)]
    );
}

#[test]
fn test_session_import_failure_keeps_previous_document() {
    let mut session = Session::new();
    session.import_json(QUOTA_API).unwrap();
    let loaded = session.document().clone();

    for bad in ["null", "42", "\"text\"", "{ broken"] {
        let err = session.import_json(bad).unwrap_err();
        assert!(
            matches!(
                err,
                ApimdError::InvalidImportInput(_) | ApimdError::MalformedJson(_)
            ),
            "unexpected error for {}: {:?}",
            bad,
            err
        );
        assert_eq!(session.document(), &loaded);
    }
}
