use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("unknown component kind: {0}")]
    UnknownKind(String),

    #[error("field group must name at least one field")]
    EmptyFieldGroup,
}
