//! Error types for review-summarizer-core.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Sentiment thresholds overlap.
    #[error(
        "positive_threshold ({positive}) must not be lower than negative_threshold ({negative})"
    )]
    InvalidThresholds {
        /// Configured positive threshold.
        positive: f64,
        /// Configured negative threshold.
        negative: f64,
    },
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while turning an input into reviews.
#[derive(Error, Debug)]
pub enum ReviewError {
    /// The file extension is not one of the supported formats.
    #[error("Unsupported file type. Please upload a CSV, TXT, PDF, JSON, or JSONL file.")]
    UnsupportedFormat {
        /// The rejected path.
        path: Utf8PathBuf,
    },

    /// A CSV file has no `review` header.
    #[error("CSV file must contain a 'review' column")]
    MissingColumn,

    /// Nothing was left after trimming and dropping blank reviews.
    #[error("The file is empty or contains no valid reviews.")]
    EmptyInput,

    /// The CSV reader rejected the file.
    #[error("invalid CSV: {0}")]
    InvalidCsv(#[from] csv::Error),

    /// A JSON document (or one JSONL line) failed to parse.
    #[error("invalid JSON on line {line}: {source}")]
    InvalidJson {
        /// 1-based line number (always 1 for `.json`).
        line: usize,
        /// Parser error.
        source: serde_json::Error,
    },

    /// A text file is not valid UTF-8.
    #[error("{path} is not valid UTF-8 text")]
    InvalidEncoding {
        /// The offending file.
        path: Utf8PathBuf,
    },

    /// A `review` field holds something other than a string.
    #[error("'review' field must be a string (found {found})")]
    InvalidReviewField {
        /// JSON type name of the value found.
        found: &'static str,
    },

    /// The file exceeds the configured size limit.
    #[error("input too large: {path} is {size} bytes (limit: {limit} bytes)")]
    InputTooLarge {
        /// The oversized file.
        path: Utf8PathBuf,
        /// Actual size in bytes.
        size: u64,
        /// Configured limit in bytes.
        limit: usize,
    },

    /// Reading the file (or standard input) failed.
    #[error("failed to read {path}")]
    Io {
        /// What was being read.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The PDF engine could not load the document or extract a page.
    #[error("failed to extract text from {path}: {source}")]
    Pdf {
        /// The PDF file.
        path: Utf8PathBuf,
        /// Underlying PDF error.
        source: lopdf::Error,
    },
}

impl ReviewError {
    /// Whether this error describes a problem with the user's input.
    ///
    /// Format errors are reported as a plain message and end the run cleanly.
    /// Everything else is an unexpected failure.
    pub const fn is_format_error(&self) -> bool {
        !matches!(self, Self::Io { .. } | Self::Pdf { .. })
    }
}

/// Result type alias using [`ReviewError`].
pub type ReviewResult<T> = Result<T, ReviewError>;

/// A sentiment scorer failed on one review.
#[derive(Error, Debug)]
#[error("sentiment scoring failed: {reason}")]
pub struct ScoreError {
    /// What went wrong.
    pub reason: String,
}

impl ScoreError {
    /// Create a scoring error with the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_problems_are_format_errors() {
        assert!(ReviewError::MissingColumn.is_format_error());
        assert!(ReviewError::EmptyInput.is_format_error());
        assert!(
            ReviewError::UnsupportedFormat {
                path: "reviews.xlsx".into()
            }
            .is_format_error()
        );
    }

    #[test]
    fn io_failures_are_unexpected() {
        let err = ReviewError::Io {
            path: "missing.txt".into(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(!err.is_format_error());
    }

    #[test]
    fn unsupported_format_message_names_allowed_formats() {
        let msg = ReviewError::UnsupportedFormat {
            path: "a.doc".into(),
        }
        .to_string();
        for ext in ["CSV", "TXT", "PDF", "JSON", "JSONL"] {
            assert!(msg.contains(ext), "missing {ext} in {msg}");
        }
    }
}
