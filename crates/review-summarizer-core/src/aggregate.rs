//! Sentiment counts and key point extraction.

use std::collections::HashMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::normalize::Normalizer;
use crate::review::Review;
use crate::sentiment::{Classifier, SentimentLabel};

/// Default number of key points kept per label.
pub const DEFAULT_TOP_TERMS: usize = 10;

/// Review counts per label, in first-encountered order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SentimentSummary {
    counts: Vec<(SentimentLabel, usize)>,
}

impl SentimentSummary {
    /// Count labels, keeping the order in which each first appears.
    pub fn from_labels<I>(labels: I) -> Self
    where
        I: IntoIterator<Item = SentimentLabel>,
    {
        let mut summary = Self::default();
        for label in labels {
            match summary.counts.iter_mut().find(|(l, _)| *l == label) {
                Some((_, count)) => *count += 1,
                None => summary.counts.push((label, 1)),
            }
        }
        summary
    }

    /// Count for one label (zero when absent).
    pub fn count(&self, label: SentimentLabel) -> usize {
        self.counts
            .iter()
            .find(|(l, _)| *l == label)
            .map_or(0, |(_, c)| *c)
    }

    /// Labels that occurred, with their counts.
    pub fn iter(&self) -> impl Iterator<Item = (SentimentLabel, usize)> + '_ {
        self.counts.iter().copied()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, c)| c).sum()
    }
}

impl Serialize for SentimentSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.counts.len()))?;
        for (label, count) in &self.counts {
            map.serialize_entry(label.as_str(), count)?;
        }
        map.end()
    }
}

/// A frequent term among reviews of one label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPoint {
    /// The normalized token.
    pub term: String,
    /// How many times it occurs.
    pub count: usize,
}

/// Most frequent terms, ties broken by first appearance.
pub fn top_terms<I, S>(tokens: I, limit: usize) -> Vec<KeyPoint>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counted: Vec<KeyPoint> = Vec::new();

    for token in tokens {
        let token = token.into();
        match index.get(&token) {
            Some(&i) => counted[i].count += 1,
            None => {
                index.insert(token.clone(), counted.len());
                counted.push(KeyPoint {
                    term: token,
                    count: 1,
                });
            }
        }
    }

    // Stable sort keeps first-seen order among equal counts.
    counted.sort_by(|a, b| b.count.cmp(&a.count));
    counted.truncate(limit);
    counted
}

/// Count reviews per label, classifying each independently.
#[tracing::instrument(skip_all, fields(reviews = reviews.len()))]
pub fn summarize(reviews: &[Review], classifier: &Classifier) -> SentimentSummary {
    SentimentSummary::from_labels(reviews.iter().map(|r| classifier.classify(r.as_str())))
}

/// Top terms for positive and negative reviews.
///
/// Classifies every review, so prefer [`key_points_for`] when labels are
/// already known.
#[tracing::instrument(skip_all, fields(reviews = reviews.len()))]
pub fn extract_key_points(
    reviews: &[Review],
    classifier: &Classifier,
    normalizer: &Normalizer,
    limit: usize,
) -> (Vec<KeyPoint>, Vec<KeyPoint>) {
    let labels: Vec<SentimentLabel> = reviews
        .iter()
        .map(|r| classifier.classify(r.as_str()))
        .collect();
    (
        key_points_for(reviews, &labels, SentimentLabel::Positive, normalizer, limit),
        key_points_for(reviews, &labels, SentimentLabel::Negative, normalizer, limit),
    )
}

/// Top terms among the reviews whose label is `wanted`.
///
/// `labels[i]` is the label of `reviews[i]`.
pub fn key_points_for(
    reviews: &[Review],
    labels: &[SentimentLabel],
    wanted: SentimentLabel,
    normalizer: &Normalizer,
    limit: usize,
) -> Vec<KeyPoint> {
    let tokens = reviews
        .iter()
        .zip(labels)
        .filter(|(_, label)| **label == wanted)
        .flat_map(|(review, _)| normalizer.tokens(review.as_str()));
    top_terms(tokens, limit)
}

/// Everything reported for one run.
#[derive(Debug, Clone, Serialize)]
pub struct Digest {
    /// Number of reviews analyzed.
    pub total: usize,
    /// Counts per label.
    pub summary: SentimentSummary,
    /// Top terms among positive reviews.
    pub positive_key_points: Vec<KeyPoint>,
    /// Top terms among negative reviews.
    pub negative_key_points: Vec<KeyPoint>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::split_lines;

    #[test]
    fn summary_counts_in_first_seen_order() {
        use SentimentLabel::*;
        let s = SentimentSummary::from_labels([Negative, Positive, Negative, Neutral]);
        let entries: Vec<_> = s.iter().collect();
        assert_eq!(entries, [(Negative, 2), (Positive, 1), (Neutral, 1)]);
        assert_eq!(s.total(), 4);
        assert_eq!(s.count(Positive), 1);
    }

    #[test]
    fn absent_labels_count_zero() {
        let s = SentimentSummary::from_labels([SentimentLabel::Positive]);
        assert_eq!(s.count(SentimentLabel::Negative), 0);
        assert_eq!(s.iter().count(), 1);
    }

    #[test]
    fn summary_serializes_as_map() {
        use SentimentLabel::*;
        let s = SentimentSummary::from_labels([Positive, Neutral, Positive]);
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(json, r#"{"Positive":2,"Neutral":1}"#);
    }

    #[test]
    fn top_terms_orders_by_count_then_first_seen() {
        let tokens = ["b", "a", "c", "a", "b", "d"];
        let top = top_terms(tokens, 10);
        let terms: Vec<_> = top.iter().map(|k| (k.term.as_str(), k.count)).collect();
        assert_eq!(terms, [("b", 2), ("a", 2), ("c", 1), ("d", 1)]);
    }

    #[test]
    fn top_terms_truncates() {
        let tokens: Vec<String> = (0..25).map(|i| format!("w{i}")).collect();
        let top = top_terms(tokens, 10);
        assert_eq!(top.len(), 10);
        assert_eq!(top[0].term, "w0");
        assert!(top.windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn summary_total_matches_review_count() {
        let reviews = split_lines("Great product, loved it!\nTerrible, broke in a day.\n\nMeh");
        let summary = summarize(&reviews, &Classifier::default());
        assert_eq!(summary.total(), reviews.len());
    }

    #[test]
    fn key_points_from_example_reviews() {
        let reviews = split_lines(
            "Great product, loved it!\nTerrible, broke in a day.\nThe box arrived on Tuesday.",
        );
        let (pos, neg) = extract_key_points(
            &reviews,
            &Classifier::default(),
            &Normalizer::default(),
            DEFAULT_TOP_TERMS,
        );
        let has = |points: &[KeyPoint], term: &str| {
            points.iter().any(|k| k.term == term && k.count == 1)
        };
        assert!(has(&pos, "great"));
        assert!(has(&pos, "loved"));
        assert!(has(&neg, "terrible"));
        assert!(has(&neg, "broke"));
        assert!(!has(&pos, "tuesday") && !has(&neg, "tuesday"));
    }

    #[test]
    fn neutral_reviews_contribute_no_key_points() {
        use SentimentLabel::*;
        let reviews = split_lines("alpha beta\ngamma\ndelta");
        let labels = [Neutral, Positive, Negative];
        let n = Normalizer::default();
        let pos = key_points_for(&reviews, &labels, Positive, &n, 10);
        let neg = key_points_for(&reviews, &labels, Negative, &n, 10);
        assert_eq!(pos, [KeyPoint { term: "gamma".into(), count: 1 }]);
        assert_eq!(neg, [KeyPoint { term: "delta".into(), count: 1 }]);
    }
}
