//! The review unit.

use serde::{Deserialize, Serialize};

/// One piece of customer feedback.
///
/// Always non-empty and trimmed of surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Review(String);

impl Review {
    /// Trim `raw` and wrap it, or `None` if nothing is left.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_string()))
    }

    /// The review text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Review {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Review {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trim every raw string and drop the ones that end up empty.
pub fn retain_non_empty<I, S>(raw: I) -> Vec<Review>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw.into_iter()
        .filter_map(|s| Review::new(s.as_ref()))
        .collect()
}

/// Split pasted text into reviews, one per line.
pub fn split_lines(text: &str) -> Vec<Review> {
    retain_non_empty(text.split('\n'))
}
