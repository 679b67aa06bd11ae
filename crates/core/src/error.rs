use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("text must be a non-empty string")]
    EmptyText,
    #[error("format kind must be one of: {valid} (got `{given}`)")]
    UnknownKind { given: String, valid: String },
    #[error("invalid JSON: {0}")]
    InvalidJson(String),
    #[error("invalid YAML: {0}")]
    InvalidYaml(String),
    #[error("invalid XML: no tag found")]
    InvalidXml,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    #[error("remote request failed: {0}")]
    Transport(String),
    #[error("remote service returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("remote response malformed: {0}")]
    MalformedResponse(String),
    #[error("remote response contained no completion text")]
    EmptyCompletion,
}
