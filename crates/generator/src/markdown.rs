//! Markdown building blocks
//!
//! Every function appends finished lines to a buffer; the caller joins them
//! with `\n`. Blank fields are omitted rather than rendered empty.

use apimd_common::{Endpoint, ErrorCode, Header, Parameter};

/// Heading text for endpoints without a name
pub const DEFAULT_ENDPOINT_NAME: &str = "未命名接口";

const PARAMETER_TABLE_HEADER: &str = "| 字段名 | 类型 | 必填 | 说明 |";
const PARAMETER_TABLE_RULE: &str = "| ------ | ---- | ---- | ---- |";
const ERROR_TABLE_HEADER: &str = "| 错误码 | 错误信息 | 说明 |";
const ERROR_TABLE_RULE: &str = "| ------ | -------- | ---- |";
const FENCE: &str = "```";

/// Trimmed text, or `None` when nothing but whitespace is left
pub(crate) fn non_blank(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Language tag for a fenced code block
///
/// # Examples
/// ```
/// use apimd_generator::detect_language;
///
/// assert_eq!(detect_language(" {\"a\": 1}"), "JSON");
/// assert_eq!(detect_language("CURL -X GET http://localhost"), "bash");
/// assert_eq!(detect_language("<note/>"), "xml");
/// assert_eq!(detect_language("plain text"), "");
/// ```
pub fn detect_language(content: &str) -> &'static str {
    let trimmed = content.trim();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        "JSON"
    } else if is_curl_command(trimmed) {
        "bash"
    } else if trimmed.starts_with('<') {
        "xml"
    } else {
        ""
    }
}

/// `curl` (any case) followed by whitespace
fn is_curl_command(text: &str) -> bool {
    let Some(command) = text.get(..4) else {
        return false;
    };
    command.eq_ignore_ascii_case("curl")
        && text[4..].starts_with(char::is_whitespace)
}

/// Fenced code block around the trimmed content
pub fn code_block(lines: &mut Vec<String>, content: &str) {
    lines.push(format!("{}{}", FENCE, detect_language(content)));
    lines.push(content.trim().to_string());
    lines.push(FENCE.to_string());
}

/// One endpoint section, starting with the blank line that separates it
/// from whatever precedes it
pub fn endpoint_section(lines: &mut Vec<String>, heading_prefix: &str, endpoint: &Endpoint) {
    let name = non_blank(&endpoint.name).unwrap_or(DEFAULT_ENDPOINT_NAME);
    lines.push(String::new());
    match non_blank(&endpoint.status) {
        Some(status) => lines.push(format!("## {}{}（{}）", heading_prefix, name, status)),
        None => lines.push(format!("## {}{}", heading_prefix, name)),
    }

    if let Some(summary) = non_blank(&endpoint.summary) {
        lines.push(String::new());
        lines.push(summary.to_string());
    }

    lines.push(String::new());
    lines.push(format!("- **请求方式**: `{}`", endpoint.method));
    if let Some(path) = non_blank(&endpoint.path) {
        lines.push(format!("- **请求路径**: `{}`", path));
    }

    header_list(lines, &endpoint.headers);
    parameter_table(lines, &endpoint.parameters);

    if non_blank(&endpoint.request_example).is_some() {
        example_block(lines, "请求示例", &endpoint.request_example);
    }
    if non_blank(&endpoint.response_example).is_some() {
        example_block(lines, "响应示例", &endpoint.response_example);
    }

    error_table(lines, &endpoint.errors);
    note_list(lines, &endpoint.notes);
}

fn header_list(lines: &mut Vec<String>, headers: &[Header]) {
    let mut visible = headers.iter().filter(|header| {
        [&header.name, &header.value, &header.description]
            .iter()
            .any(|field| non_blank(field).is_some())
    });

    let Some(first) = visible.next() else {
        return;
    };

    lines.push("- **请求头**:".to_string());
    for header in std::iter::once(first).chain(visible) {
        let mut line = format!("  - `{}`", non_blank(&header.name).unwrap_or("Header"));
        if let Some(value) = non_blank(&header.value) {
            line.push_str(&format!(": {}", value));
        }
        if let Some(description) = non_blank(&header.description) {
            line.push_str(&format!(" - {}", description));
        }
        lines.push(line);
    }
}

fn parameter_table(lines: &mut Vec<String>, parameters: &[Parameter]) {
    let rows: Vec<(&Parameter, String)> = parameters
        .iter()
        .map(|param| (param, description_cell(param)))
        .filter(|(param, description)| {
            !description.is_empty()
                || non_blank(&param.name).is_some()
                || non_blank(&param.param_type).is_some()
        })
        .collect();

    if rows.is_empty() {
        return;
    }

    lines.push(String::new());
    lines.push("#### 请求体参数".to_string());
    lines.push(String::new());
    lines.push(PARAMETER_TABLE_HEADER.to_string());
    lines.push(PARAMETER_TABLE_RULE.to_string());
    for (param, description) in rows {
        let required = if param.required.is_required() { "是" } else { "否" };
        lines.push(format!(
            "| `{}` | `{}` | {} | {} |",
            non_blank(&param.name).unwrap_or("-"),
            non_blank(&param.param_type).unwrap_or("-"),
            required,
            if description.is_empty() { "-" } else { description.as_str() },
        ));
    }
}

/// Description followed by default, example, allowed values and notes,
/// joined with `<br>`
fn description_cell(param: &Parameter) -> String {
    let mut parts: Vec<String> = Vec::new();
    if let Some(description) = non_blank(&param.description) {
        parts.push(description.to_string());
    }
    if let Some(default) = param.default.as_deref().and_then(non_blank) {
        parts.push(format!("默认值: {}", default));
    }
    if let Some(example) = param.example.as_deref().and_then(non_blank) {
        parts.push(format!("示例: {}", example));
    }
    let allowed: Vec<&str> = param.allowed_values.iter().filter_map(|v| non_blank(v)).collect();
    if !allowed.is_empty() {
        parts.push(format!("可选值: {}", allowed.join("/")));
    }
    parts.extend(param.notes.iter().filter_map(|note| non_blank(note)).map(str::to_string));
    parts.join("<br>")
}

fn error_table(lines: &mut Vec<String>, errors: &[ErrorCode]) {
    let visible: Vec<&ErrorCode> = errors
        .iter()
        .filter(|error| {
            [&error.code, &error.message, &error.description]
                .iter()
                .any(|field| non_blank(field).is_some())
        })
        .collect();

    if visible.is_empty() {
        return;
    }

    lines.push(String::new());
    lines.push("#### 错误码".to_string());
    lines.push(String::new());
    lines.push(ERROR_TABLE_HEADER.to_string());
    lines.push(ERROR_TABLE_RULE.to_string());
    for error in visible {
        lines.push(format!(
            "| {} | {} | {} |",
            non_blank(&error.code).unwrap_or("-"),
            non_blank(&error.message).unwrap_or("-"),
            non_blank(&error.description).unwrap_or("-"),
        ));
    }
}

fn note_list(lines: &mut Vec<String>, notes: &[String]) {
    let mut visible = notes.iter().filter_map(|note| non_blank(note)).peekable();
    if visible.peek().is_none() {
        return;
    }

    lines.push(String::new());
    lines.push("#### 备注".to_string());
    lines.push(String::new());
    lines.extend(visible.map(|note| format!("- {}", note)));
}

fn example_block(lines: &mut Vec<String>, title: &str, content: &str) {
    lines.push(String::new());
    lines.push(format!("#### {}", title));
    lines.push(String::new());
    code_block(lines, content);
}
