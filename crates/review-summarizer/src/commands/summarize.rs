//! Summarize command, the default action when no subcommand is given.

use std::io::{self, BufRead, Write};

use anyhow::Context;
use tracing::{debug, instrument};

use review_summarizer_core::input::{self, SPECIFY_INPUT_TYPE};
use review_summarizer_core::{Analyzer, Config, InputType, Orchestrator, Outcome};

use crate::picker::select_picker;
use crate::report;

/// Inputs for one summarize run, taken from the top-level CLI flags.
#[derive(Debug, Clone, Default)]
pub struct SummarizeArgs {
    /// `--input_type`; prompted for when `None`.
    pub input_type: Option<InputType>,
    /// `--input_data`; text or a file path.
    pub input_data: Option<String>,
}

/// Resolve the input, analyze it, and print the result.
///
/// Input problems print a single message and succeed. Unexpected failures
/// are returned; `main` logs them once.
#[instrument(name = "cmd_summarize", skip_all)]
pub fn cmd_summarize(args: SummarizeArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    debug!(
        input_type = ?args.input_type,
        has_data = args.input_data.is_some(),
        "executing summarize command"
    );

    let stdin = io::stdin();
    let mut stdin = stdin.lock();

    let outcome = run(args, config, &mut stdin).context("error processing input")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if global_json {
        report::write_json(&mut out, &outcome)?;
    } else {
        report::write_text(&mut out, &outcome)?;
    }
    out.flush()?;
    Ok(())
}

fn run<R: BufRead>(args: SummarizeArgs, config: &Config, stdin: &mut R) -> anyhow::Result<Outcome> {
    let input_type = match args.input_type {
        Some(t) => t,
        None => match input::prompt_input_type(&mut *stdin, io::stderr())
            .context("failed to read input type")?
        {
            Some(t) => t,
            None => return Ok(Outcome::Message(SPECIFY_INPUT_TYPE.to_string())),
        },
    };

    let analyzer = Analyzer::new(&config.analysis_settings())
        .context("failed to initialize sentiment analyzer")?;
    let picker = select_picker(config.file_dialog);
    let orchestrator = Orchestrator::new(&analyzer, picker.as_ref(), config.input_limit());

    let outcome = orchestrator.process(
        input_type,
        args.input_data.as_deref(),
        stdin,
        io::stderr(),
    )?;
    Ok(outcome)
}
