//! Format-specific review extraction.
//!
//! Dispatches on the file extension:
//!
//! | extension | one review per |
//! |---|---|
//! | `.csv`   | row, taken from the `review` column |
//! | `.txt`   | line |
//! | `.pdf`   | page |
//! | `.json`  | array element's `review` field, or the root object's `review` field |
//! | `.jsonl` | line's `review` field |
//!
//! Every extracted string is trimmed and blank ones are discarded. An input
//! that yields nothing is an error, never an empty review list.

use camino::Utf8Path;
use lopdf::Document;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::error::{ReviewError, ReviewResult};
use crate::review::{Review, retain_non_empty};

/// Default maximum input size: 5 MiB.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;

/// Column (and JSON field) holding the review text.
pub const REVIEW_FIELD: &str = "review";

/// Supported input file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Comma-separated values with a `review` header.
    Csv,
    /// Plain text, one review per line.
    Txt,
    /// PDF, one review per page.
    Pdf,
    /// A JSON object or array of objects.
    Json,
    /// One JSON object per line.
    Jsonl,
}

impl InputFormat {
    /// Every supported format, in display order.
    pub const ALL: [Self; 5] = [Self::Csv, Self::Txt, Self::Pdf, Self::Json, Self::Jsonl];

    /// Detect the format from a path's extension (case-insensitive).
    pub fn from_path(path: &Utf8Path) -> Option<Self> {
        let ext = path.extension()?.to_ascii_lowercase();
        Self::ALL.into_iter().find(|f| f.extension() == ext)
    }

    /// File extension without the dot.
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Txt => "txt",
            Self::Pdf => "pdf",
            Self::Json => "json",
            Self::Jsonl => "jsonl",
        }
    }

    /// Human-readable label used in file dialogs.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Csv => "CSV files",
            Self::Txt => "Text files",
            Self::Pdf => "PDF files",
            Self::Json => "JSON files",
            Self::Jsonl => "JSONL files",
        }
    }
}

/// Read reviews from `path`, enforcing an optional size limit.
#[instrument(skip_all, fields(path = %path))]
pub fn read_reviews(path: &Utf8Path, max_bytes: Option<usize>) -> ReviewResult<Vec<Review>> {
    let format = InputFormat::from_path(path).ok_or_else(|| ReviewError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    debug!(format = format.extension(), "reading reviews");

    let bytes = read_bytes(path, max_bytes)?;
    let raw = match format {
        InputFormat::Pdf => extract_pdf_pages(path, &bytes)?,
        text_format => {
            let content = decode_utf8(path, bytes)?;
            match text_format {
                InputFormat::Csv => parse_csv(&content)?,
                InputFormat::Json => parse_json(&content)?,
                InputFormat::Jsonl => parse_jsonl(&content)?,
                _ => parse_txt(&content),
            }
        }
    };

    let extracted = raw.len();
    let reviews = retain_non_empty(raw);
    debug!(extracted, kept = reviews.len(), "reviews extracted");
    if reviews.is_empty() {
        return Err(ReviewError::EmptyInput);
    }
    Ok(reviews)
}

/// Read a file after checking its size against the limit.
fn read_bytes(path: &Utf8Path, max_bytes: Option<usize>) -> ReviewResult<Vec<u8>> {
    let io_err = |source| ReviewError::Io {
        path: path.to_path_buf(),
        source,
    };
    // Preflight: check file size via metadata before reading into memory.
    let metadata = std::fs::metadata(path.as_std_path()).map_err(io_err)?;
    if let Some(limit) = max_bytes
        && metadata.len() > limit as u64
    {
        return Err(ReviewError::InputTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            limit,
        });
    }
    std::fs::read(path.as_std_path()).map_err(io_err)
}

fn decode_utf8(path: &Utf8Path, bytes: Vec<u8>) -> ReviewResult<String> {
    let mut content = String::from_utf8(bytes).map_err(|_| ReviewError::InvalidEncoding {
        path: path.to_path_buf(),
    })?;
    if content.starts_with('\u{feff}') {
        content.remove(0);
    }
    Ok(content)
}

/// One raw review per line.
pub fn parse_txt(content: &str) -> Vec<String> {
    content.lines().map(str::to_string).collect()
}

/// One raw review per row, from the `review` column.
pub fn parse_csv(content: &str) -> ReviewResult<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(content.as_bytes());

    let column = reader
        .headers()?
        .iter()
        .position(|h| h == REVIEW_FIELD)
        .ok_or(ReviewError::MissingColumn)?;

    let mut reviews = Vec::new();
    for record in reader.records() {
        let record = record?;
        if let Some(value) = record.get(column) {
            reviews.push(value.to_string());
        }
    }
    Ok(reviews)
}

/// Reviews from a JSON array of objects, or a single object.
///
/// Elements without a `review` field are skipped. Any other root value
/// yields no reviews.
pub fn parse_json(content: &str) -> ReviewResult<Vec<String>> {
    let root: Value = serde_json::from_str(content).map_err(|source| ReviewError::InvalidJson {
        line: source.line(),
        source,
    })?;

    match &root {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| review_field(item).transpose())
            .collect(),
        Value::Object(_) => Ok(review_field(&root)?.into_iter().collect()),
        _ => Ok(Vec::new()),
    }
}

/// Reviews from newline-delimited JSON objects. Blank lines are skipped.
pub fn parse_jsonl(content: &str) -> ReviewResult<Vec<String>> {
    let mut reviews = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let value: Value =
            serde_json::from_str(line).map_err(|source| ReviewError::InvalidJson {
                line: idx + 1,
                source,
            })?;
        if let Some(review) = review_field(&value)? {
            reviews.push(review);
        }
    }
    Ok(reviews)
}

/// The `review` string of an object, `None` when absent or not an object.
fn review_field(value: &Value) -> ReviewResult<Option<String>> {
    match value.as_object().and_then(|obj| obj.get(REVIEW_FIELD)) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(ReviewError::InvalidReviewField {
            found: json_type_name(other),
        }),
    }
}

const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Extracted text of every page, in page order.
fn extract_pdf_pages(path: &Utf8Path, bytes: &[u8]) -> ReviewResult<Vec<String>> {
    let pdf_err = |source| ReviewError::Pdf {
        path: path.to_path_buf(),
        source,
    };
    let doc = Document::load_mem(bytes).map_err(pdf_err)?;
    let pages = doc.get_pages();
    debug!(pages = pages.len(), "extracting PDF text");
    pages
        .keys()
        .map(|&number| doc.extract_text(&[number]).map_err(pdf_err))
        .collect()
}

/// Display list of supported extensions, e.g. `csv, txt, pdf, json, jsonl`.
pub fn supported_extensions() -> String {
    InputFormat::ALL
        .iter()
        .map(InputFormat::extension)
        .collect::<Vec<_>>()
        .join(", ")
}
