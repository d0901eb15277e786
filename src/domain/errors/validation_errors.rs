use thiserror::Error;

/// Validation errors for domain value objects
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Trash prefix cannot be empty")]
    EmptyTrashPrefix,

    #[error("Trash prefix cannot contain '/': {0}")]
    TrashPrefixContainsSlash(String),

    #[error("Invalid character in trash prefix: {0:?}")]
    InvalidTrashPrefixCharacter(char),
}
