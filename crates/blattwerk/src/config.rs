//! Layout analysis configuration.
//!
//! All tunable constants of the tokenizers live here with their contractual
//! defaults. Configuration loads from TOML, YAML, or JSON files, either
//! explicitly or by discovery of `blattwerk.{toml,yaml,json}` in the current
//! and parent directories.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ExtractionError, Result};

/// Top-level configuration for the layout pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutConfig {
    #[serde(default)]
    pub line: LineConfig,
    #[serde(default)]
    pub block: BlockConfig,
    #[serde(default)]
    pub paragraph: ParagraphConfig,
    #[serde(default)]
    pub semantic: SemanticConfig,
}

/// Line tokenizer knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct LineConfig {
    /// Baseline clustering tolerance as a fraction of the page's most
    /// common font size.
    pub baseline_tolerance_factor: f64,
    /// Baseline offsets below this fraction of the line height attach to
    /// the dominant baseline (superscripts and subscripts).
    pub superscript_factor: f64,
    /// Word-gap threshold as a fraction of the font size, used when a line
    /// contains no measurable whitespace.
    pub word_gap_factor: f64,
}

impl Default for LineConfig {
    fn default() -> Self {
        LineConfig {
            baseline_tolerance_factor: 0.2,
            superscript_factor: 0.3,
            word_gap_factor: 0.25,
        }
    }
}

/// Block tokenizer knobs. The defaults are contractual; changing them
/// changes which lines open new blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct BlockConfig {
    /// A pitch may exceed the face's expected pitch by this much before it
    /// opens a new block.
    pub pitch_slack: f64,
    /// Fallback: a pitch larger than this multiple of the line height opens
    /// a new block even without an expectation for the face.
    pub pitch_height_factor: f64,
    /// Tolerance for indentation and pitch-difference comparisons.
    pub offset_tolerance: f64,
    /// A font size jump beyond this counts as a face change.
    pub font_size_change: f32,
    /// Tolerance when comparing a line's left edge against a neighbor in
    /// reference-start detection.
    pub anchor_offset_tolerance: f64,
}

impl Default for BlockConfig {
    fn default() -> Self {
        BlockConfig {
            pitch_slack: 1.5,
            pitch_height_factor: 3.0,
            offset_tolerance: 1.0,
            font_size_change: 0.5,
            anchor_offset_tolerance: 0.5,
        }
    }
}

/// Paragraph assembler knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ParagraphConfig {
    /// Merge hyphenated tokens across block boundaries.
    pub dehyphenate: bool,
}

impl Default for ParagraphConfig {
    fn default() -> Self {
        ParagraphConfig { dehyphenate: true }
    }
}

/// Semanticizer knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct SemanticConfig {
    /// Fraction of the page height treated as header/footer zone at the
    /// top and bottom edges.
    pub margin_zone_factor: f64,
    /// Maximum vertical gap between a figure or shape and a block for the
    /// block to count as its caption.
    pub caption_gap: f64,
}

impl Default for SemanticConfig {
    fn default() -> Self {
        SemanticConfig {
            margin_zone_factor: 0.1,
            caption_gap: 30.0,
        }
    }
}

impl LayoutConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<LayoutConfig> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| ExtractionError::Config(e.to_string()))
    }

    /// Load configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<LayoutConfig> {
        let content = std::fs::read_to_string(path)?;
        serde_yaml_ng::from_str(&content).map_err(|e| ExtractionError::Config(e.to_string()))
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<LayoutConfig> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| ExtractionError::Config(e.to_string()))
    }

    /// Load configuration from a file, dispatching on its extension
    /// (case-insensitive; `.toml`, `.yaml`, `.yml`, or `.json`).
    pub fn from_file(path: impl AsRef<Path>) -> Result<LayoutConfig> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "toml" => LayoutConfig::from_toml_file(path),
            "yaml" | "yml" => LayoutConfig::from_yaml_file(path),
            "json" => LayoutConfig::from_json_file(path),
            other => Err(ExtractionError::Config(format!(
                "Unsupported config extension '{}': use .toml, .yaml, .yml, or .json",
                other
            ))),
        }
    }

    /// Search for `blattwerk.{toml,yaml,json}` in the current directory and
    /// its ancestors. Returns `Ok(None)` when no config file exists.
    pub fn discover() -> Result<Option<LayoutConfig>> {
        let cwd = std::env::current_dir()?;
        Ok(match Self::discover_from(&cwd) {
            Some(path) => Some(LayoutConfig::from_file(path)?),
            None => None,
        })
    }

    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut dir = Some(start);
        while let Some(d) = dir {
            for name in ["blattwerk.toml", "blattwerk.yaml", "blattwerk.json"] {
                let candidate = d.join(name);
                if candidate.is_file() {
                    return Some(candidate);
                }
            }
            dir = d.parent();
        }
        None
    }
}
