//! URL slugs for genres, news articles and recommendation sections.

pub const MAX_SLUG_LENGTH: usize = 120;

/// Derive a slug from a human title.
///
/// Lowercases ASCII alphanumerics and collapses every other run of
/// characters into a single `-`. Leading and trailing separators are dropped.
///
/// # Examples
///
/// ```
/// use marquee_core::slug::slugify;
/// assert_eq!(slugify("Oscars 2026: The Winners!"), "oscars-2026-the-winners");
/// assert_eq!(slugify("  Sci-Fi  "), "sci-fi");
/// ```
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    if slug.len() > MAX_SLUG_LENGTH {
        slug.truncate(MAX_SLUG_LENGTH);
        while slug.ends_with('-') {
            slug.pop();
        }
    }
    slug
}

/// Validate a caller-supplied slug.
pub fn validate_slug(slug: &str) -> Result<(), String> {
    if slug.is_empty() {
        return Err("Slug cannot be empty".to_string());
    }
    if slug.len() > MAX_SLUG_LENGTH {
        return Err(format!("Slug exceeds maximum length of {MAX_SLUG_LENGTH}"));
    }
    let well_formed = slug.split('-').all(|part| {
        !part.is_empty()
            && part
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
    });
    if !well_formed {
        return Err(format!(
            "Invalid slug '{slug}': use lowercase letters, digits and single dashes"
        ));
    }
    Ok(())
}

/// Use the supplied slug if any, otherwise derive one from `title`.
pub fn resolve_slug(explicit: Option<&str>, title: &str) -> Result<String, String> {
    let slug = match explicit {
        Some(s) => s.trim().to_string(),
        None => slugify(title),
    };
    validate_slug(&slug)?;
    Ok(slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_punctuation_runs() {
        assert_eq!(slugify("Top -- 10 // Picks"), "top-10-picks");
    }

    #[test]
    fn non_ascii_becomes_separator() {
        assert_eq!(slugify("Amélie"), "am-lie");
    }

    #[test]
    fn long_titles_truncated_without_trailing_dash() {
        let title = "a ".repeat(200);
        let slug = slugify(&title);
        assert!(slug.len() <= MAX_SLUG_LENGTH);
        assert!(!slug.ends_with('-'));
    }

    #[test]
    fn validate_accepts_derived_slugs() {
        assert!(validate_slug(&slugify("New & Noteworthy")).is_ok());
    }

    #[test]
    fn validate_rejects_malformed() {
        assert!(validate_slug("").is_err());
        assert!(validate_slug("Upper").is_err());
        assert!(validate_slug("double--dash").is_err());
        assert!(validate_slug("-leading").is_err());
        assert!(validate_slug("with space").is_err());
    }

    #[test]
    fn resolve_prefers_explicit() {
        assert_eq!(resolve_slug(Some("latest"), "Whatever").unwrap(), "latest");
        assert_eq!(resolve_slug(None, "Latest Picks").unwrap(), "latest-picks");
        assert!(resolve_slug(None, "!!!").is_err());
    }
}
