use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),
    #[error("document has no `{0}` field")]
    MissingField(&'static str),
    #[error("expected a {expected} document, found {found}")]
    KindMismatch { expected: &'static str, found: String },
    #[error("unknown animal kind: {0}")]
    UnknownKind(String),
    #[error("encode error: {0}")]
    Encode(String),
    #[error("decode error: {0}")]
    Decode(String),
}
