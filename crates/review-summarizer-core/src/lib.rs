//! Core library for review-summarizer.
//!
//! Reads customer reviews from text or files, labels each one Positive,
//! Negative or Neutral, and finds the most frequent terms per label.
//!
//! # Modules
//!
//! - [`reader`] - Format-specific review extraction (CSV, TXT, PDF, JSON, JSONL)
//! - [`normalize`] - Lowercasing, punctuation stripping, stopword removal
//! - [`sentiment`] - Compound polarity scoring and labeling
//! - [`aggregate`] - Sentiment counts and key points
//! - [`analyzer`] - The per-run analysis context
//! - [`input`] - Input resolution and orchestration
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```no_run
//! use review_summarizer_core::{AnalysisSettings, Analyzer, review};
//!
//! let analyzer = Analyzer::new(&AnalysisSettings::default()).expect("valid settings");
//! let reviews = review::split_lines("Great product, loved it!\nTerrible, broke in a day.");
//! let digest = analyzer.analyze(&reviews);
//! for (label, count) in digest.summary.iter() {
//!     println!("{label}: {count}");
//! }
//! ```
#![deny(unsafe_code)]

pub mod aggregate;
pub mod analyzer;
pub mod config;
pub mod error;
pub mod input;
pub mod normalize;
pub mod reader;
pub mod review;
pub mod sentiment;
pub mod stopwords;

pub use aggregate::{Digest, KeyPoint, SentimentSummary};
pub use analyzer::{AnalysisSettings, Analyzer};
pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};
pub use error::{ConfigError, ConfigResult, ReviewError, ReviewResult};
pub use input::{FilePicker, InputType, NoDialog, Orchestrator, Outcome};
pub use reader::{DEFAULT_MAX_INPUT_BYTES, InputFormat};
pub use review::Review;
pub use sentiment::SentimentLabel;
