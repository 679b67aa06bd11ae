use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ValidationError;
use crate::models::{FormatKind, FormatRequest};

static XML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<(/?[^>]+)>").expect("valid xml tag regex"));

pub fn validate(request: &FormatRequest) -> Result<(), ValidationError> {
    if request.text().is_empty() {
        return Err(ValidationError::EmptyText);
    }

    match request.kind() {
        FormatKind::Json => validate_json(request.text()),
        FormatKind::Xml => validate_xml(request.text()),
        FormatKind::Yaml => validate_yaml(request.text()),
        FormatKind::Text => Ok(()),
    }
}

// Nesting deeper than 128 levels is rejected by the parser's recursion limit.
fn validate_json(text: &str) -> Result<(), ValidationError> {
    serde_json::from_str::<serde_json::Value>(text)
        .map(|_| ())
        .map_err(|err| ValidationError::InvalidJson(err.to_string()))
}

// Tag presence only. Unbalanced or unclosed tags still pass.
fn validate_xml(text: &str) -> Result<(), ValidationError> {
    if XML_TAG.is_match(text) {
        Ok(())
    } else {
        Err(ValidationError::InvalidXml)
    }
}

fn validate_yaml(text: &str) -> Result<(), ValidationError> {
    serde_yaml::from_str::<serde_yaml::Value>(text)
        .map(|_| ())
        .map_err(|err| ValidationError::InvalidYaml(err.to_string()))
}
