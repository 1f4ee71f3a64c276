//! Comment content rules and threading.

use crate::types::DbId;

/// Maximum length of a comment body in characters.
pub const MAX_COMMENT_LENGTH: usize = 2_000;

/// Sort orders for a movie's comment list.
pub const SORT_NEWEST: &str = "newest";
pub const SORT_OLDEST: &str = "oldest";
pub const SORT_TOP: &str = "top";

pub const VALID_COMMENT_SORTS: &[&str] = &[SORT_NEWEST, SORT_OLDEST, SORT_TOP];

/// Validate and normalize a comment body.
///
/// Returns the trimmed content that should be stored.
pub fn validate_comment_content(content: &str) -> Result<String, String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err("Comment content cannot be empty".to_string());
    }
    let len = trimmed.chars().count();
    if len > MAX_COMMENT_LENGTH {
        return Err(format!(
            "Comment content exceeds maximum length of {MAX_COMMENT_LENGTH} characters (got {len})"
        ));
    }
    Ok(trimmed.to_string())
}

/// Resolve the sort key for a comment listing, defaulting to newest first.
pub fn resolve_comment_sort(sort: Option<&str>) -> Result<&'static str, String> {
    match sort {
        None => Ok(SORT_NEWEST),
        Some(s) => VALID_COMMENT_SORTS
            .iter()
            .find(|v| **v == s)
            .copied()
            .ok_or_else(|| {
                format!(
                    "Invalid sort '{s}'. Must be one of: {}",
                    VALID_COMMENT_SORTS.join(", ")
                )
            }),
    }
}

/// The minimal view of a would-be parent comment needed to place a reply.
#[derive(Debug, Clone, Copy)]
pub struct ParentRef {
    pub id: DbId,
    pub movie_id: DbId,
    pub parent_id: Option<DbId>,
}

/// Decide which comment a reply actually attaches to.
///
/// Threads are two levels deep: replying to a reply attaches to the root of
/// that thread. The parent must belong to the same movie.
pub fn thread_root(movie_id: DbId, parent: ParentRef) -> Result<DbId, String> {
    if parent.movie_id != movie_id {
        return Err("Parent comment belongs to a different movie".to_string());
    }
    Ok(parent.parent_id.unwrap_or(parent.id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_is_trimmed() {
        assert_eq!(
            validate_comment_content("  great film \n").unwrap(),
            "great film"
        );
    }

    #[test]
    fn blank_content_rejected() {
        let err = validate_comment_content(" \t ").unwrap_err();
        assert!(err.contains("cannot be empty"));
    }

    #[test]
    fn content_at_max_length_accepted() {
        let body = "a".repeat(MAX_COMMENT_LENGTH);
        assert!(validate_comment_content(&body).is_ok());
    }

    #[test]
    fn content_over_max_length_rejected() {
        let body = "é".repeat(MAX_COMMENT_LENGTH + 1);
        let err = validate_comment_content(&body).unwrap_err();
        assert!(err.contains("exceeds maximum length"));
    }

    #[test]
    fn sort_defaults_to_newest() {
        assert_eq!(resolve_comment_sort(None), Ok(SORT_NEWEST));
        assert_eq!(resolve_comment_sort(Some("top")), Ok(SORT_TOP));
        assert!(resolve_comment_sort(Some("random")).is_err());
    }

    #[test]
    fn reply_to_root_attaches_to_root() {
        let parent = ParentRef {
            id: 10,
            movie_id: 1,
            parent_id: None,
        };
        assert_eq!(thread_root(1, parent), Ok(10));
    }

    #[test]
    fn reply_to_reply_attaches_to_thread_root() {
        let parent = ParentRef {
            id: 11,
            movie_id: 1,
            parent_id: Some(10),
        };
        assert_eq!(thread_root(1, parent), Ok(10));
    }

    #[test]
    fn reply_across_movies_rejected() {
        let parent = ParentRef {
            id: 10,
            movie_id: 2,
            parent_id: None,
        };
        assert!(thread_root(1, parent).is_err());
    }
}
