//! Comment censorship reason codes and state transitions.
//!
//! A comment is either visible or censored. A censored comment always
//! carries exactly one reason code; the database enforces the same pairing
//! with a `CHECK` constraint.

use serde::{Deserialize, Serialize};

/// Why a moderator hid a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CensorReason {
    Spoiler,
    OffensiveLanguage,
    HateSpeech,
    Harassment,
    Spam,
    OffTopic,
    Other,
}

impl CensorReason {
    pub const ALL: [CensorReason; 7] = [
        CensorReason::Spoiler,
        CensorReason::OffensiveLanguage,
        CensorReason::HateSpeech,
        CensorReason::Harassment,
        CensorReason::Spam,
        CensorReason::OffTopic,
        CensorReason::Other,
    ];

    /// Stored and wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            CensorReason::Spoiler => "SPOILER",
            CensorReason::OffensiveLanguage => "OFFENSIVE_LANGUAGE",
            CensorReason::HateSpeech => "HATE_SPEECH",
            CensorReason::Harassment => "HARASSMENT",
            CensorReason::Spam => "SPAM",
            CensorReason::OffTopic => "OFF_TOPIC",
            CensorReason::Other => "OTHER",
        }
    }

    pub fn parse(input: &str) -> Result<Self, String> {
        let wanted = input.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == wanted)
            .ok_or_else(|| {
                let codes: Vec<&str> = Self::ALL.iter().map(|r| r.as_str()).collect();
                format!(
                    "Invalid censor reason '{input}'. Must be one of: {}",
                    codes.join(", ")
                )
            })
    }
}

/// Validate a censor request against the comment's current state.
///
/// A missing or blank reason is rejected. Re-censoring with the same reason
/// is a no-op the caller may short-circuit; a different reason replaces the
/// old one.
pub fn validate_censor(reason: Option<&str>) -> Result<CensorReason, String> {
    match reason {
        Some(r) if !r.trim().is_empty() => CensorReason::parse(r),
        _ => Err("A reason code is required to censor a comment".to_string()),
    }
}

/// Validate an uncensor request against the comment's current state.
pub fn validate_uncensor(is_censored: bool) -> Result<(), String> {
    if is_censored {
        Ok(())
    } else {
        Err("Comment is not censored".to_string())
    }
}
