//! Sentiment classification.
//!
//! A [`PolarityScorer`] produces a compound polarity score in `[-1, 1]`;
//! the [`Classifier`] buckets it into a [`SentimentLabel`] using fixed
//! thresholds. The default scorer is VADER (lexicon valence plus rules for
//! negation, intensifiers, punctuation emphasis and capitalization).

use std::panic::{self, AssertUnwindSafe};

use serde::{Deserialize, Serialize};
use vader_sentiment::SentimentIntensityAnalyzer;

use crate::error::ScoreError;

/// Default lower bound (inclusive) for a positive compound score.
pub const DEFAULT_POSITIVE_THRESHOLD: f64 = 0.05;

/// Default upper bound (inclusive) for a negative compound score.
pub const DEFAULT_NEGATIVE_THRESHOLD: f64 = -0.05;

/// Discrete sentiment of one review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    /// Compound score at or above the positive threshold.
    Positive,
    /// Compound score at or below the negative threshold.
    Negative,
    /// Everything in between, and any review the scorer failed on.
    Neutral,
}

impl SentimentLabel {
    /// Returns the label as a capitalized string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Negative => "Negative",
            Self::Neutral => "Neutral",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Something that can score a text's overall polarity.
pub trait PolarityScorer {
    /// Compound polarity score in `[-1, 1]`.
    fn compound(&self, text: &str) -> Result<f64, ScoreError>;
}

/// VADER lexicon/rule-based scorer.
pub struct VaderScorer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl std::fmt::Debug for VaderScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaderScorer").finish_non_exhaustive()
    }
}

impl Default for VaderScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl VaderScorer {
    /// Create a scorer backed by the bundled VADER lexicon.
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }
}

impl PolarityScorer for VaderScorer {
    fn compound(&self, text: &str) -> Result<f64, ScoreError> {
        // The analyzer indexes into token windows and can panic on odd input.
        let scores = panic::catch_unwind(AssertUnwindSafe(|| {
            let scores = self.analyzer.polarity_scores(text);
            let get = |key: &str| scores.get(key).copied();
            (get("compound"), get("pos"), get("neg"))
        }))
        .map_err(|_| ScoreError::new("analyzer panicked"))?;

        match scores {
            // No valence at all: `!` and `?` only amplify existing polarity.
            (Some(_), Some(pos), Some(neg)) if pos == 0.0 && neg == 0.0 => Ok(0.0),
            (Some(score), _, _) if score.is_finite() => Ok(score),
            (Some(score), _, _) => Err(ScoreError::new(format!("non-finite compound score {score}"))),
            (None, _, _) => Err(ScoreError::new("no compound score produced")),
        }
    }
}

/// Compound-score cut-offs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// `score >= positive` is Positive.
    pub positive: f64,
    /// `score <= negative` is Negative.
    pub negative: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            positive: DEFAULT_POSITIVE_THRESHOLD,
            negative: DEFAULT_NEGATIVE_THRESHOLD,
        }
    }
}

impl Thresholds {
    /// Map a compound score to a label.
    pub fn label(&self, compound: f64) -> SentimentLabel {
        if compound >= self.positive {
            SentimentLabel::Positive
        } else if compound <= self.negative {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

/// Scores reviews and buckets them into labels.
pub struct Classifier {
    scorer: Box<dyn PolarityScorer + Send + Sync>,
    thresholds: Thresholds,
}

impl std::fmt::Debug for Classifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Classifier")
            .field("thresholds", &self.thresholds)
            .finish_non_exhaustive()
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(VaderScorer::new(), Thresholds::default())
    }
}

impl Classifier {
    /// Create a classifier from a scorer and thresholds.
    pub fn new<S>(scorer: S, thresholds: Thresholds) -> Self
    where
        S: PolarityScorer + Send + Sync + 'static,
    {
        Self {
            scorer: Box::new(scorer),
            thresholds,
        }
    }

    /// Classify one review. Scoring failures degrade to Neutral.
    pub fn classify(&self, text: &str) -> SentimentLabel {
        match self.scorer.compound(text) {
            Ok(score) => self.thresholds.label(score),
            Err(err) => {
                tracing::warn!(error = %err, text_len = text.len(), "scoring failed, treating as neutral");
                SentimentLabel::Neutral
            }
        }
    }
}
