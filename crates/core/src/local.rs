use crate::models::FormatKind;

pub fn format_local(text: &str, kind: FormatKind) -> String {
    match kind {
        FormatKind::Json => format_json(text).unwrap_or_else(|| text.to_string()),
        FormatKind::Xml => format_xml(text),
        FormatKind::Yaml => format_yaml(text).unwrap_or_else(|| text.to_string()),
        FormatKind::Text => text.trim().to_string(),
    }
}

// serde_json's map is ordered by key, so object keys come out sorted.
fn format_json(text: &str) -> Option<String> {
    let value = serde_json::from_str::<serde_json::Value>(text).ok()?;
    serde_json::to_string_pretty(&value).ok()
}

const YAML_NULL_FORMS: [&str; 4] = ["null", "Null", "NULL", "~"];

// A document with no content parses as null; keep such input as written.
fn format_yaml(text: &str) -> Option<String> {
    let value = serde_yaml::from_str::<serde_yaml::Value>(text).ok()?;
    if value.is_null() && !YAML_NULL_FORMS.contains(&text.trim()) {
        return None;
    }
    serde_yaml::to_string(&value).ok()
}

// One line per tag boundary, no nesting-aware indentation.
fn format_xml(text: &str) -> String {
    text.replace("><", ">\n<").trim().to_string()
}
