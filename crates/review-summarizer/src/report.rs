//! Console rendering of results.

use std::io::{self, Write};

use owo_colors::{OwoColorize, Stream};
use serde::Serialize;

use review_summarizer_core::{Digest, KeyPoint, Outcome};

#[derive(Serialize)]
struct MessageJson<'a> {
    message: &'a str,
}

/// Write an outcome as human-readable text.
///
/// A message is printed alone. A digest prints the summary, then positive
/// and negative key points, separated by blank lines.
pub fn write_text<W: Write>(out: &mut W, outcome: &Outcome) -> io::Result<()> {
    match outcome {
        Outcome::Message(message) => writeln!(out, "{message}"),
        Outcome::Digest(digest) => write_digest(out, digest),
    }
}

fn write_digest<W: Write>(out: &mut W, digest: &Digest) -> io::Result<()> {
    heading(out, "Summary of Sentiments:")?;
    for (label, count) in digest.summary.iter() {
        writeln!(out, "{label}: {count}")?;
    }

    writeln!(out)?;
    heading(out, "Top Positive Key Points:")?;
    write_points(out, &digest.positive_key_points)?;

    writeln!(out)?;
    heading(out, "Top Negative Key Points:")?;
    write_points(out, &digest.negative_key_points)
}

fn heading<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(
        out,
        "{}",
        title.if_supports_color(Stream::Stdout, |t| t.bold())
    )
}

fn write_points<W: Write>(out: &mut W, points: &[KeyPoint]) -> io::Result<()> {
    for point in points {
        writeln!(out, "{}: {}", point.term, point.count)?;
    }
    Ok(())
}

/// Write an outcome as pretty JSON.
pub fn write_json<W: Write>(out: &mut W, outcome: &Outcome) -> anyhow::Result<()> {
    let json = match outcome {
        Outcome::Message(message) => serde_json::to_string_pretty(&MessageJson { message })?,
        Outcome::Digest(digest) => serde_json::to_string_pretty(digest)?,
    };
    writeln!(out, "{json}")?;
    Ok(())
}
