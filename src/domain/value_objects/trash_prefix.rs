use crate::domain::errors::ValidationError;

/// Prefix used when no `trash_prefix` is configured
pub const DEFAULT_TRASH_PREFIX: &str = ".trash-";

/// A validated trash prefix.
///
/// Only URI-unreserved characters (ASCII letters, digits, `-`, `.`, `_`,
/// `~`) are allowed, so a trash container name reads the same encoded or
/// decoded and clients can address it without escaping.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrashPrefix(String);

impl TrashPrefix {
    /// Create a new TrashPrefix with validation
    pub fn new(value: String) -> Result<Self, ValidationError> {
        if value.is_empty() {
            return Err(ValidationError::EmptyTrashPrefix);
        }

        if value.contains('/') {
            return Err(ValidationError::TrashPrefixContainsSlash(value));
        }

        if let Some(c) = value.chars().find(|c| !is_unreserved(*c)) {
            return Err(ValidationError::InvalidTrashPrefixCharacter(c));
        }

        Ok(Self(value))
    }

    /// Get the prefix as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_unreserved(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~')
}

impl Default for TrashPrefix {
    fn default() -> Self {
        Self(DEFAULT_TRASH_PREFIX.to_string())
    }
}

impl std::fmt::Display for TrashPrefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
