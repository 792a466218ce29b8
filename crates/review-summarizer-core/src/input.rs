//! Input resolution: pasted text or a review file.
//!
//! Decides where reviews come from, reads them, and hands them to the
//! [`Analyzer`]. Problems with the user's input come back as
//! [`Outcome::Message`]; only unexpected failures are errors.

use std::io::{BufRead, Read, Write};

use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, info, instrument, warn};

use crate::aggregate::Digest;
use crate::analyzer::Analyzer;
use crate::error::{ReviewError, ReviewResult};
use crate::reader;
use crate::review::{Review, split_lines};

/// Shown when the file dialog is cancelled.
pub const NO_FILE_SELECTED: &str = "No file selected";

/// Shown when pasted text has no non-blank line.
pub const NO_VALID_REVIEWS: &str = "No valid reviews found";

/// Shown when the interactive input type answer is not recognized.
pub const SPECIFY_INPUT_TYPE: &str = "Please specify how you want to summarize (text or file)";

/// Prompt for the input type.
pub const INPUT_TYPE_PROMPT: &str = "Enter input type (text/file): ";

/// Prompt for pasted review text.
pub const TEXT_PROMPT: &str = "Enter your review text (press Ctrl+D on Unix/Linux or Ctrl+Z on Windows and then Enter to finish):";

const STDIN: &str = "<stdin>";

/// Where reviews come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum InputType {
    /// Free-form text, one review per line.
    Text,
    /// A review file in one of the supported formats.
    File,
}

impl InputType {
    /// Parse an interactive answer (case-insensitive, surrounding space ignored).
    pub fn parse(answer: &str) -> Option<Self> {
        match answer.trim().to_ascii_lowercase().as_str() {
            "text" => Some(Self::Text),
            "file" => Some(Self::File),
            _ => None,
        }
    }

    /// Returns the input type as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::File => "file",
        }
    }
}

/// Something that can ask the user for a file.
pub trait FilePicker {
    /// The chosen file, or `None` if the user cancelled.
    fn pick_file(&self) -> Option<Utf8PathBuf>;
}

/// A picker for non-interactive environments; never selects anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDialog;

impl FilePicker for NoDialog {
    fn pick_file(&self) -> Option<Utf8PathBuf> {
        warn!("file dialog unavailable; pass --input_data with a file path");
        None
    }
}

/// Result of processing one input.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// A status or input problem to show instead of a report.
    Message(String),
    /// The full analysis.
    Digest(Digest),
}

/// Ask for the input type on `prompt` and read the answer from `input`.
///
/// Returns `None` when the answer is not recognized (or input is closed).
pub fn prompt_input_type<R: BufRead, W: Write>(
    mut input: R,
    mut prompt: W,
) -> std::io::Result<Option<InputType>> {
    write!(prompt, "{INPUT_TYPE_PROMPT}")?;
    prompt.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(InputType::parse(&answer))
}

/// Drives one run from input selection to analysis.
pub struct Orchestrator<'a> {
    analyzer: &'a Analyzer,
    picker: &'a dyn FilePicker,
    max_input_bytes: Option<usize>,
}

impl std::fmt::Debug for Orchestrator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("max_input_bytes", &self.max_input_bytes)
            .finish_non_exhaustive()
    }
}

impl<'a> Orchestrator<'a> {
    /// Create an orchestrator.
    pub fn new(
        analyzer: &'a Analyzer,
        picker: &'a dyn FilePicker,
        max_input_bytes: Option<usize>,
    ) -> Self {
        Self {
            analyzer,
            picker,
            max_input_bytes,
        }
    }

    /// Resolve the input, read reviews, and analyze them.
    ///
    /// `stdin` is read only in text mode without `input_data`; `prompt`
    /// receives the instructions shown before that read.
    #[instrument(skip_all, fields(input_type = input_type.as_str(), has_data = input_data.is_some()))]
    pub fn process<R: Read, W: Write>(
        &self,
        input_type: InputType,
        input_data: Option<&str>,
        stdin: R,
        prompt: W,
    ) -> ReviewResult<Outcome> {
        let input_data = input_data.filter(|d| !d.is_empty());
        let reviews = match input_type {
            InputType::Text => {
                let text = match input_data {
                    Some(text) => text.to_string(),
                    None => read_pasted_text(stdin, prompt)?,
                };
                let reviews = split_lines(&text);
                if reviews.is_empty() {
                    return Ok(Outcome::Message(NO_VALID_REVIEWS.to_string()));
                }
                reviews
            }
            InputType::File => {
                let path = match input_data {
                    Some(path) => Utf8PathBuf::from(path),
                    None => match self.picker.pick_file() {
                        Some(path) => path,
                        None => {
                            info!("no file selected");
                            return Ok(Outcome::Message(NO_FILE_SELECTED.to_string()));
                        }
                    },
                };
                match self.read_file(&path) {
                    Ok(reviews) => reviews,
                    Err(err) if err.is_format_error() => {
                        debug!(error = %err, "input rejected");
                        return Ok(Outcome::Message(err.to_string()));
                    }
                    Err(err) => return Err(err),
                }
            }
        };

        Ok(Outcome::Digest(self.analyzer.analyze(&reviews)))
    }

    fn read_file(&self, path: &Utf8Path) -> ReviewResult<Vec<Review>> {
        reader::read_reviews(path, self.max_input_bytes)
    }
}

fn read_pasted_text<R: Read, W: Write>(mut stdin: R, mut prompt: W) -> ReviewResult<String> {
    let stdin_err = |source| ReviewError::Io {
        path: Utf8PathBuf::from(STDIN),
        source,
    };
    writeln!(prompt, "{TEXT_PROMPT}").map_err(stdin_err)?;
    prompt.flush().map_err(stdin_err)?;

    let mut text = String::new();
    match stdin.read_to_string(&mut text) {
        Ok(_) => Ok(text.trim().to_string()),
        Err(err) if err.kind() == std::io::ErrorKind::InvalidData => {
            Err(ReviewError::InvalidEncoding {
                path: Utf8PathBuf::from(STDIN),
            })
        }
        Err(err) => Err(stdin_err(err)),
    }
}
