use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatKind {
    Json,
    Xml,
    Yaml,
    #[default]
    Text,
}

impl FormatKind {
    pub const ALL: [FormatKind; 4] = [Self::Json, Self::Xml, Self::Yaml, Self::Text];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "xml" => Some(Self::Xml),
            "yaml" => Some(Self::Yaml),
            "text" => Some(Self::Text),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Xml => "xml",
            Self::Yaml => "yaml",
            Self::Text => "text",
        }
    }

    pub fn valid_list() -> String {
        Self::ALL
            .iter()
            .map(|kind| kind.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormatKind {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value).ok_or_else(|| ValidationError::UnknownKind {
            given: value.to_string(),
            valid: Self::valid_list(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    Local,
    Remote,
}

impl Origin {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Remote => "remote",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatRequest {
    text: String,
    kind: FormatKind,
    credential: Option<String>,
}

impl FormatRequest {
    pub fn new(text: impl Into<String>, kind: FormatKind, credential: Option<String>) -> Self {
        Self {
            text: text.into(),
            kind,
            credential: credential.filter(|value| !value.is_empty()),
        }
    }

    // Empty text is reported before an unknown kind.
    pub fn parse(
        text: &str,
        kind: &str,
        credential: Option<&str>,
    ) -> Result<Self, ValidationError> {
        if text.is_empty() {
            return Err(ValidationError::EmptyText);
        }
        let kind = kind.parse::<FormatKind>()?;
        Ok(Self::new(text, kind, credential.map(ToString::to_string)))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> FormatKind {
        self.kind
    }

    pub fn credential(&self) -> Option<&str> {
        self.credential.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatResult {
    pub content: String,
    pub kind: FormatKind,
    pub origin: Origin,
}
