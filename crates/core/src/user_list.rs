//! Per-user movie lists (favorites, watchlist, watched).

use serde::{Deserialize, Serialize};

/// Which personal list a movie association belongs to.
///
/// Serialized as the upper-case name used by the front ends; stored in the
/// database as the lower-case form returned by [`ListType::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ListType {
    Favorites,
    Watchlist,
    Watched,
}

impl ListType {
    pub const ALL: [ListType; 3] = [ListType::Favorites, ListType::Watchlist, ListType::Watched];

    /// Database representation.
    pub fn as_str(self) -> &'static str {
        match self {
            ListType::Favorites => "favorites",
            ListType::Watchlist => "watchlist",
            ListType::Watched => "watched",
        }
    }

    /// Parse from a path segment or stored value, case-insensitively.
    pub fn parse(input: &str) -> Result<Self, String> {
        match input.trim().to_ascii_lowercase().as_str() {
            "favorites" => Ok(ListType::Favorites),
            "watchlist" => Ok(ListType::Watchlist),
            "watched" => Ok(ListType::Watched),
            _ => Err(format!(
                "Invalid list type '{input}'. Must be one of: FAVORITES, WATCHLIST, WATCHED"
            )),
        }
    }

    /// The list an addition to `self` removes the movie from, if any.
    ///
    /// Marking a movie as watched takes it off the watchlist.
    pub fn displaces(self) -> Option<ListType> {
        match self {
            ListType::Watched => Some(ListType::Watchlist),
            _ => None,
        }
    }
}
