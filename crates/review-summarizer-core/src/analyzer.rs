//! The per-run analysis context.
//!
//! [`Analyzer`] bundles the classifier and normalizer, built once from
//! [`AnalysisSettings`] and passed by reference to everything that needs them.

use tracing::{debug, instrument};

use crate::aggregate::{self, DEFAULT_TOP_TERMS, Digest, SentimentSummary};
use crate::error::{ConfigError, ConfigResult};
use crate::normalize::Normalizer;
use crate::review::Review;
use crate::sentiment::{
    Classifier, DEFAULT_NEGATIVE_THRESHOLD, DEFAULT_POSITIVE_THRESHOLD, PolarityScorer,
    SentimentLabel, Thresholds, VaderScorer,
};

/// Tunables for an [`Analyzer`].
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSettings {
    /// Compound score at or above which a review is Positive.
    pub positive_threshold: f64,
    /// Compound score at or below which a review is Negative.
    pub negative_threshold: f64,
    /// Key points kept per label.
    pub top_terms: usize,
    /// Words filtered in addition to the English stopword list.
    pub extra_stopwords: Vec<String>,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            positive_threshold: DEFAULT_POSITIVE_THRESHOLD,
            negative_threshold: DEFAULT_NEGATIVE_THRESHOLD,
            top_terms: DEFAULT_TOP_TERMS,
            extra_stopwords: Vec::new(),
        }
    }
}

/// Immutable classifier + normalizer pair.
#[derive(Debug)]
pub struct Analyzer {
    classifier: Classifier,
    normalizer: Normalizer,
    top_terms: usize,
}

impl Analyzer {
    /// Build an analyzer backed by the VADER scorer.
    pub fn new(settings: &AnalysisSettings) -> ConfigResult<Self> {
        Self::with_scorer(settings, VaderScorer::new())
    }

    /// Build an analyzer around a custom scorer.
    pub fn with_scorer<S>(settings: &AnalysisSettings, scorer: S) -> ConfigResult<Self>
    where
        S: PolarityScorer + Send + Sync + 'static,
    {
        let thresholds = Thresholds {
            positive: settings.positive_threshold,
            negative: settings.negative_threshold,
        };
        if thresholds.positive.is_nan()
            || thresholds.negative.is_nan()
            || thresholds.positive < thresholds.negative
        {
            return Err(ConfigError::InvalidThresholds {
                positive: thresholds.positive,
                negative: thresholds.negative,
            });
        }
        debug!(
            positive = thresholds.positive,
            negative = thresholds.negative,
            top_terms = settings.top_terms,
            extra_stopwords = settings.extra_stopwords.len(),
            "analyzer initialized"
        );
        Ok(Self {
            classifier: Classifier::new(scorer, thresholds),
            normalizer: Normalizer::new(&settings.extra_stopwords),
            top_terms: settings.top_terms,
        })
    }

    /// Classify one review.
    pub fn classify(&self, review: &Review) -> SentimentLabel {
        self.classifier.classify(review.as_str())
    }

    /// Classify every review once and build the full report from those labels.
    #[instrument(skip_all, fields(reviews = reviews.len()))]
    pub fn analyze(&self, reviews: &[Review]) -> Digest {
        let labels: Vec<SentimentLabel> = reviews.iter().map(|r| self.classify(r)).collect();
        let summary = SentimentSummary::from_labels(labels.iter().copied());
        let key_points = |wanted| {
            aggregate::key_points_for(reviews, &labels, wanted, &self.normalizer, self.top_terms)
        };
        let digest = Digest {
            total: reviews.len(),
            positive_key_points: key_points(SentimentLabel::Positive),
            negative_key_points: key_points(SentimentLabel::Negative),
            summary,
        };
        debug!(
            positive = digest.summary.count(SentimentLabel::Positive),
            negative = digest.summary.count(SentimentLabel::Negative),
            neutral = digest.summary.count(SentimentLabel::Neutral),
            "analysis complete"
        );
        digest
    }
}
