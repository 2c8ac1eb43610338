//! blattwerk CLI - layout analysis for scientific PDFs.
//!
//! Reads a character dump (the JSON a character producer emits for a PDF:
//! pages with positioned characters, figures, shapes, and the font/color
//! registries), runs the layout pipeline, and writes the serialized
//! structure as XML, JSON, or plain text.
//!
//! # Configuration
//!
//! Tokenizer constants load from a config file in TOML, YAML, or JSON:
//! - Explicit: `--config path/to/blattwerk.toml`
//! - Auto-discovery: searches for `blattwerk.{toml,yaml,json}` in the
//!   current and parent directories
//!
//! # Exit codes
//!
//! - 0: success
//! - 1: usage or configuration error
//! - 2: input cannot be parsed
//! - 3: I/O error
//! - 4: cancelled
//!
//! # Examples
//!
//! ```bash
//! # Paragraphs of every role, XML to stdout
//! blattwerk paper.chars.json
//!
//! # Body text and headings only, as plain text
//! blattwerk paper.chars.json --format txt --roles body-text,heading
//!
//! # Words and characters, JSON to a file
//! blattwerk paper.chars.json --units word,character --format json -o out.json
//! ```

#![deny(unsafe_code)]

use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use blattwerk::{
    Document, ExtractionError, ExtractionUnit, JsonSerializer, LayoutConfig, Pipeline, SemanticRole,
    SerializeOptions, Serializer, TxtSerializer, XmlSerializer,
};

/// blattwerk layout-analysis CLI
#[derive(Parser)]
#[command(name = "blattwerk")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the character dump (JSON) produced for the PDF
    input: PathBuf,

    /// Output path; stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Serialization format (xml, json, or txt)
    #[arg(short, long, default_value = "xml")]
    format: String,

    /// Extraction units to emit, comma-separated
    /// (character, word, paragraph, figure, shape, page)
    #[arg(long, value_delimiter = ',', default_value = "paragraph")]
    units: Vec<String>,

    /// Semantic roles to include, comma-separated; all roles when omitted
    #[arg(long, value_delimiter = ',')]
    roles: Vec<String>,

    /// Path to config file (TOML, YAML, or JSON). If not specified,
    /// searches for blattwerk.{toml,yaml,json} in current and parent
    /// directories.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .try_init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() { 1 } else { 0 };
            let _ = err.print();
            std::process::exit(code);
        }
    };

    if let Err(err) = run(cli) {
        eprintln!("Error: {}", err);
        std::process::exit(exit_code(&err));
    }
}

fn run(cli: Cli) -> Result<(), ExtractionError> {
    let config = load_config(cli.config.as_deref())?;
    let options = build_options(&cli.units, &cli.roles)?;
    let serializer = build_serializer(&cli.format, options)?;

    let input = std::fs::read_to_string(&cli.input)?;
    let doc: Document = serde_json::from_str(&input).map_err(|e| ExtractionError::Parse {
        reason: format!("'{}' is not a valid character dump: {}", cli.input.display(), e),
    })?;

    let doc = Pipeline::new(config).run(doc)?;
    tracing::debug!(
        "Analyzed {} page(s) into {} paragraph(s)",
        doc.pages.len(),
        doc.paragraphs.len()
    );
    let bytes = serializer.serialize(&doc)?;

    match &cli.output {
        Some(path) => std::fs::write(path, bytes)?,
        None => std::io::stdout().write_all(&bytes)?,
    }
    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> Result<LayoutConfig, ExtractionError> {
    match path {
        Some(path) => LayoutConfig::from_file(path),
        None => Ok(LayoutConfig::discover()?.unwrap_or_default()),
    }
}

fn build_options(units: &[String], roles: &[String]) -> Result<SerializeOptions, ExtractionError> {
    let mut options = SerializeOptions::default();

    options.units = units
        .iter()
        .map(|u| u.parse::<ExtractionUnit>().map_err(ExtractionError::Config))
        .collect::<Result<_, _>>()?;

    if !roles.is_empty() {
        options.roles = roles
            .iter()
            .map(|r| r.parse::<SemanticRole>().map_err(ExtractionError::Config))
            .collect::<Result<_, _>>()?;
    }
    Ok(options)
}

fn build_serializer(format: &str, options: SerializeOptions) -> Result<Box<dyn Serializer>, ExtractionError> {
    match format.to_lowercase().as_str() {
        "xml" => Ok(Box::new(XmlSerializer::with_options(options))),
        "json" => Ok(Box::new(JsonSerializer::with_options(options))),
        "txt" => Ok(Box::new(TxtSerializer::with_options(options))),
        other => Err(ExtractionError::Config(format!(
            "Invalid format: '{}'. Use 'xml', 'json', or 'txt'",
            other
        ))),
    }
}

fn exit_code(err: &ExtractionError) -> i32 {
    match err {
        ExtractionError::Parse { .. } | ExtractionError::UnsupportedFeature { .. } => 2,
        ExtractionError::Io(_) => 3,
        ExtractionError::Cancelled => 4,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_options_defaults_to_all_roles() {
        let options = build_options(&["paragraph".to_string()], &[]).unwrap();
        assert!(options.includes_unit(ExtractionUnit::Paragraph));
        assert!(!options.includes_unit(ExtractionUnit::Word));
        assert!(options.includes_role(SemanticRole::Footnote));
    }

    #[test]
    fn test_build_options_rejects_unknown_unit() {
        let err = build_options(&["chapter".to_string()], &[]).unwrap_err();
        assert_eq!(exit_code(&err), 1);
    }

    #[test]
    fn test_build_serializer_rejects_unknown_format() {
        let err = build_serializer("pdf", SerializeOptions::default()).err().unwrap();
        assert!(matches!(err, ExtractionError::Config(_)));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            exit_code(&ExtractionError::Parse {
                reason: "bad".to_string()
            }),
            2
        );
        assert_eq!(
            exit_code(&ExtractionError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "x"))),
            3
        );
        assert_eq!(exit_code(&ExtractionError::Cancelled), 4);
        assert_eq!(exit_code(&ExtractionError::Config("bad".to_string())), 1);
    }
}
