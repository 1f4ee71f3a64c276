//! Catalog constants and validation (movies, persons, genres).

use chrono::{Duration, NaiveDate};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const MAX_TITLE_LENGTH: usize = 300;
pub const MAX_PERSON_NAME_LENGTH: usize = 200;
pub const MAX_GENRE_NAME_LENGTH: usize = 60;
pub const MAX_OVERVIEW_LENGTH: usize = 5_000;

/// Movies released within this many days (and not in the future) are new releases.
pub const NEW_RELEASE_WINDOW_DAYS: i64 = 90;

// ---------------------------------------------------------------------------
// Credit types
// ---------------------------------------------------------------------------

pub const CREDIT_ACTOR: &str = "actor";
pub const CREDIT_DIRECTOR: &str = "director";
pub const CREDIT_WRITER: &str = "writer";
pub const CREDIT_PRODUCER: &str = "producer";

pub const VALID_CREDIT_TYPES: &[&str] =
    &[CREDIT_ACTOR, CREDIT_DIRECTOR, CREDIT_WRITER, CREDIT_PRODUCER];

pub fn validate_credit_type(credit_type: &str) -> Result<(), String> {
    if VALID_CREDIT_TYPES.contains(&credit_type) {
        Ok(())
    } else {
        Err(format!(
            "Invalid credit type '{credit_type}'. Must be one of: {}",
            VALID_CREDIT_TYPES.join(", ")
        ))
    }
}

// ---------------------------------------------------------------------------
// Movie list sorting
// ---------------------------------------------------------------------------

/// Sort keys accepted by the movie listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovieSort {
    #[default]
    Newest,
    Oldest,
    Title,
    Rating,
    Popular,
}

impl MovieSort {
    pub fn parse(input: Option<&str>) -> Result<Self, String> {
        match input.map(str::trim) {
            None | Some("") | Some("newest") => Ok(MovieSort::Newest),
            Some("oldest") => Ok(MovieSort::Oldest),
            Some("title") => Ok(MovieSort::Title),
            Some("rating") => Ok(MovieSort::Rating),
            Some("popular") => Ok(MovieSort::Popular),
            Some(other) => Err(format!(
                "Invalid sort '{other}'. Must be one of: newest, oldest, title, rating, popular"
            )),
        }
    }

    /// SQL `ORDER BY` fragment over the listing query's aliases.
    ///
    /// Only ever produced from the fixed set above, never from user text.
    pub fn order_by(self) -> &'static str {
        match self {
            MovieSort::Newest => "m.release_date DESC NULLS LAST, m.id DESC",
            MovieSort::Oldest => "m.release_date ASC NULLS LAST, m.id ASC",
            MovieSort::Title => "m.title ASC, m.id ASC",
            MovieSort::Rating => "average_rating DESC NULLS LAST, rating_count DESC, m.id DESC",
            MovieSort::Popular => "popularity DESC, m.id DESC",
        }
    }
}

// ---------------------------------------------------------------------------
// Field validation
// ---------------------------------------------------------------------------

/// Validate a required display name (movie title, person name, genre name).
///
/// Returns the trimmed value.
pub fn validate_name(field: &str, value: &str, max_len: usize) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(format!("{field} cannot be blank"));
    }
    if trimmed.chars().count() > max_len {
        return Err(format!("{field} exceeds maximum length of {max_len} characters"));
    }
    Ok(trimmed.to_string())
}

/// Validate an optional absolute URL (posters, trailers, avatars).
pub fn validate_optional_url(field: &str, value: Option<&str>) -> Result<(), String> {
    match value {
        None => Ok(()),
        Some(url) if url.starts_with("http://") || url.starts_with("https://") => Ok(()),
        Some(_) => Err(format!("{field} must be an http(s) URL")),
    }
}

pub fn validate_runtime(runtime_minutes: Option<i32>) -> Result<(), String> {
    match runtime_minutes {
        Some(m) if m <= 0 => Err("Runtime must be a positive number of minutes".to_string()),
        _ => Ok(()),
    }
}

pub fn validate_overview(overview: Option<&str>) -> Result<(), String> {
    match overview {
        Some(o) if o.chars().count() > MAX_OVERVIEW_LENGTH => Err(format!(
            "Overview exceeds maximum length of {MAX_OVERVIEW_LENGTH} characters"
        )),
        _ => Ok(()),
    }
}

/// Earliest release date still counted as a new release on `today`.
pub fn new_release_cutoff(today: NaiveDate) -> NaiveDate {
    today - Duration::days(NEW_RELEASE_WINDOW_DAYS)
}
