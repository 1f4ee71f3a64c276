//! Recommendation section ordering rules.
//!
//! A section's movies carry a dense `display_order` of `1..=n`. Additions
//! append, removals compact, and a reorder must name every current member
//! exactly once.

use std::collections::HashSet;

use crate::types::DbId;

pub const MAX_SECTION_NAME_LENGTH: usize = 100;

/// Maximum number of movies a single section may hold.
pub const MAX_SECTION_MOVIES: usize = 100;

/// Display order for a movie appended after the current maximum.
pub fn next_display_order(current_max: Option<i32>) -> i32 {
    current_max.unwrap_or(0) + 1
}

/// Check that `requested` is a permutation of `current`.
pub fn validate_reorder(current: &[DbId], requested: &[DbId]) -> Result<(), String> {
    let mut seen = HashSet::with_capacity(requested.len());
    for id in requested {
        if !seen.insert(*id) {
            return Err(format!("Movie {id} appears more than once"));
        }
    }

    let current_set: HashSet<DbId> = current.iter().copied().collect();

    if let Some(unknown) = requested.iter().find(|id| !current_set.contains(id)) {
        return Err(format!("Movie {unknown} is not in this section"));
    }

    if requested.len() != current_set.len() {
        return Err(format!(
            "Reorder must list all {} movies in the section (got {})",
            current_set.len(),
            requested.len()
        ));
    }

    Ok(())
}

/// Pair each movie with its new dense display order.
pub fn assign_display_orders(ordered: &[DbId]) -> Vec<(DbId, i32)> {
    ordered
        .iter()
        .enumerate()
        .map(|(idx, id)| (*id, idx as i32 + 1))
        .collect()
}

pub fn validate_section_capacity(current_len: usize) -> Result<(), String> {
    if current_len >= MAX_SECTION_MOVIES {
        Err(format!(
            "A recommendation section holds at most {MAX_SECTION_MOVIES} movies"
        ))
    } else {
        Ok(())
    }
}
