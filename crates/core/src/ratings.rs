//! Movie rating rules.

pub const MIN_SCORE: i16 = 1;
pub const MAX_SCORE: i16 = 10;

/// Default vote floor for the top-rated listing, so a single 10/10 vote does
/// not outrank an established classic.
pub const DEFAULT_TOP_RATED_MIN_VOTES: i64 = 3;

pub fn validate_score(score: i16) -> Result<(), String> {
    if (MIN_SCORE..=MAX_SCORE).contains(&score) {
        Ok(())
    } else {
        Err(format!(
            "Rating must be between {MIN_SCORE} and {MAX_SCORE} (got {score})"
        ))
    }
}

/// Round an average score to one decimal place for display.
pub fn round_average(avg: f64) -> f64 {
    (avg * 10.0).round() / 10.0
}
