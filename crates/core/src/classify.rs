//! Heuristic spam classification for contact submissions.
//!
//! Runs exactly once, when a submission is first created. Edits and status
//! changes never re-trigger it, so a stored record keeps the score it was
//! born with.

use serde::{Deserialize, Serialize};

/// Denylisted keywords; each match adds [`KEYWORD_SCORE`].
const SPAM_KEYWORDS: [&str; 6] = [
    "viagra",
    "casino",
    "lottery",
    "winner",
    "click here",
    "buy now",
];

/// Score added per denylist keyword present in the text.
const KEYWORD_SCORE: u32 = 25;

/// Score added when the text carries more than [`LINK_THRESHOLD`] links.
const LINK_SCORE: u32 = 30;

/// "http" occurrences above this count the text as link-heavy.
const LINK_THRESHOLD: usize = 3;

/// Score added when more than half the characters are uppercase letters.
const UPPERCASE_SCORE: u32 = 20;

/// Uppercase-to-total ratio above which the text counts as shouting.
const UPPERCASE_RATIO_THRESHOLD: f64 = 0.5;

/// Scores at or above this mark a submission as spam.
pub const SPAM_THRESHOLD: u8 = 50;

/// Submission priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
    Urgent,
}

/// Classifier output, written to the record before its first store call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// Spam score, clamped to 0..=100.
    pub score: u8,
    /// True iff `score >= SPAM_THRESHOLD`. No other path sets this.
    pub is_spam: bool,
    /// Normal, or High when the text carries urgency keywords.
    pub priority: Priority,
}

impl Classification {
    /// Classification of empty input: zero baseline, not an error.
    pub fn clean() -> Self {
        Self {
            score: 0,
            is_spam: false,
            priority: Priority::Normal,
        }
    }
}

/// Score a submission's free-text fields.
///
/// Concatenates message, subject, and services description; matches the
/// denylist and link count against the lowercased text, and measures the
/// uppercase ratio on the text as submitted. Deterministic, no I/O.
pub fn classify(message: &str, subject: &str, services: &str) -> Classification {
    let raw = format!("{} {} {}", message, subject, services);
    let content = raw.to_lowercase();

    let mut score: u32 = 0;

    for keyword in SPAM_KEYWORDS {
        if content.contains(keyword) {
            score += KEYWORD_SCORE;
        }
    }

    let link_count = content.matches("http").count();
    if link_count > LINK_THRESHOLD {
        score += LINK_SCORE;
    }

    if uppercase_ratio(&raw) > UPPERCASE_RATIO_THRESHOLD {
        score += UPPERCASE_SCORE;
    }

    let score = score.min(100) as u8;

    let priority = if content.contains("urgent") || content.contains("asap") {
        Priority::High
    } else {
        Priority::Normal
    };

    Classification {
        score,
        is_spam: score >= SPAM_THRESHOLD,
        priority,
    }
}

/// Ratio of uppercase letters to total characters; 0 on empty input.
fn uppercase_ratio(text: &str) -> f64 {
    let total = text.chars().count();
    if total == 0 {
        return 0.0;
    }
    let upper = text.chars().filter(|c| c.is_uppercase()).count();
    upper as f64 / total as f64
}
