use crate::types::DbId;

/// Domain-level failure shared by every layer above `core`.
///
/// The HTTP layer maps each variant onto a status code and a stable
/// machine-readable `code` string.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Lookup by a natural key (slug, username) rather than an id.
    #[error("{entity} '{key}' not found")]
    NotFoundByKey { entity: &'static str, key: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for the common `Validation` construction from a validator message.
    pub fn validation(msg: impl Into<String>) -> Self {
        CoreError::Validation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity_and_id() {
        let err = CoreError::NotFound {
            entity: "Movie",
            id: 42,
        };
        assert_eq!(err.to_string(), "Movie with id 42 not found");
    }

    #[test]
    fn not_found_by_key_message_quotes_key() {
        let err = CoreError::NotFoundByKey {
            entity: "NewsArticle",
            key: "oscars-2026".into(),
        };
        assert_eq!(err.to_string(), "NewsArticle 'oscars-2026' not found");
    }
}
