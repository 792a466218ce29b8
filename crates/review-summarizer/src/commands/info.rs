//! Info command implementation

use clap::Args;
use owo_colors::{OwoColorize, Stream};
use review_summarizer_core::config::{Config, ConfigSources};
use review_summarizer_core::reader::supported_extensions;
use serde::Serialize;
use tracing::{debug, instrument};

/// Arguments for the `info` subcommand.
#[derive(Args, Debug, Default)]
pub struct InfoArgs {
    // No subcommand-specific arguments; uses global --json flag
}

#[derive(Serialize)]
struct PackageInfo {
    name: &'static str,
    version: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    license: &'static str,
    formats: String,
}

impl PackageInfo {
    fn new() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            description: env!("CARGO_PKG_DESCRIPTION"),
            license: env!("CARGO_PKG_LICENSE"),
            formats: supported_extensions(),
        }
    }
}

#[derive(Serialize)]
struct ConfigInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    config_file: Option<String>,
    log_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_dir: Option<String>,
    positive_threshold: f64,
    negative_threshold: f64,
    top_terms: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    extra_stopwords: Vec<String>,
    file_dialog: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_input_bytes: Option<usize>,
}

impl ConfigInfo {
    fn from_config(config: &Config, sources: &ConfigSources) -> Self {
        Self {
            config_file: sources.primary_file().map(|p| p.to_string()),
            log_level: config.log_level.as_str().to_string(),
            log_dir: config.log_dir.as_ref().map(|p| p.to_string()),
            positive_threshold: config.positive_threshold,
            negative_threshold: config.negative_threshold,
            top_terms: config.top_terms,
            extra_stopwords: config.extra_stopwords.clone(),
            file_dialog: config.file_dialog,
            max_input_bytes: config.input_limit(),
        }
    }
}

#[derive(Serialize)]
struct FullInfo {
    #[serde(flatten)]
    package: PackageInfo,
    config: ConfigInfo,
}

/// Print package information and the effective configuration.
#[instrument(name = "cmd_info", skip_all, fields(json_output))]
pub fn cmd_info(
    _args: InfoArgs,
    global_json: bool,
    config: &Config,
    sources: &ConfigSources,
) -> anyhow::Result<()> {
    debug!(json_output = global_json, "executing info command");

    let info = FullInfo {
        package: PackageInfo::new(),
        config: ConfigInfo::from_config(config, sources),
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!(
        "{} {}",
        info.package
            .name
            .if_supports_color(Stream::Stdout, |t| t.bold()),
        info.package
            .version
            .if_supports_color(Stream::Stdout, |t| t.green())
    );
    if !info.package.description.is_empty() {
        println!("{}", info.package.description);
    }
    print_field("License", &info.package.license);
    print_field("Formats", &info.package.formats);

    println!();
    println!(
        "{}",
        "Configuration".if_supports_color(Stream::Stdout, |t| t.bold())
    );
    match info.config.config_file {
        Some(ref path) => print_field("Config file", path),
        None => print_field("Config file", &"none loaded"),
    }
    print_field("Log level", &info.config.log_level);
    if let Some(ref dir) = info.config.log_dir {
        print_field("Log directory", dir);
    }
    print_field("Positive threshold", &info.config.positive_threshold);
    print_field("Negative threshold", &info.config.negative_threshold);
    print_field("Top terms", &info.config.top_terms);
    if !info.config.extra_stopwords.is_empty() {
        print_field("Extra stopwords", &info.config.extra_stopwords.join(", "));
    }
    print_field("File dialog", &info.config.file_dialog);
    match info.config.max_input_bytes {
        Some(max) => print_field("Max input bytes", &max),
        None => print_field("Max input bytes", &"unlimited"),
    }

    Ok(())
}

fn print_field<T: std::fmt::Display + ?Sized>(label: &str, value: &T) {
    println!(
        "{}: {}",
        label.if_supports_color(Stream::Stdout, |t| t.dimmed()),
        value
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cmd_info_text_succeeds() {
        assert!(cmd_info(InfoArgs::default(), false, &Config::default(), &ConfigSources::default()).is_ok());
    }

    #[test]
    fn test_cmd_info_json_via_global() {
        assert!(cmd_info(InfoArgs::default(), true, &Config::default(), &ConfigSources::default()).is_ok());
    }

    #[test]
    fn test_config_info_no_file() {
        let info = ConfigInfo::from_config(&Config::default(), &ConfigSources::default());
        assert!(info.config_file.is_none());
        assert_eq!(info.log_level, "warn");
        assert_eq!(info.top_terms, 10);
        assert!(info.file_dialog);
    }
}
