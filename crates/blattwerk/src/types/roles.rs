//! Semantic roles and extraction granularities.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The logical function of a text block within the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SemanticRole {
    Abstract,
    Acknowledgments,
    BodyText,
    Caption,
    Categories,
    Footnote,
    GeneralTerms,
    Heading,
    ItemizeItem,
    Keywords,
    PageHeader,
    PageFooter,
    Reference,
    Table,
    Title,
    Formula,
    Other,
}

impl SemanticRole {
    /// Stable wire name used by all serializers and the CLI.
    pub fn as_str(&self) -> &'static str {
        match self {
            SemanticRole::Abstract => "abstract",
            SemanticRole::Acknowledgments => "acknowledgments",
            SemanticRole::BodyText => "body-text",
            SemanticRole::Caption => "caption",
            SemanticRole::Categories => "categories",
            SemanticRole::Footnote => "footnote",
            SemanticRole::GeneralTerms => "general-terms",
            SemanticRole::Heading => "heading",
            SemanticRole::ItemizeItem => "itemize-item",
            SemanticRole::Keywords => "keywords",
            SemanticRole::PageHeader => "page-header",
            SemanticRole::PageFooter => "page-footer",
            SemanticRole::Reference => "reference",
            SemanticRole::Table => "table",
            SemanticRole::Title => "title",
            SemanticRole::Formula => "formula",
            SemanticRole::Other => "other",
        }
    }

    /// All roles, in declaration order.
    pub fn all() -> &'static [SemanticRole] {
        &[
            SemanticRole::Abstract,
            SemanticRole::Acknowledgments,
            SemanticRole::BodyText,
            SemanticRole::Caption,
            SemanticRole::Categories,
            SemanticRole::Footnote,
            SemanticRole::GeneralTerms,
            SemanticRole::Heading,
            SemanticRole::ItemizeItem,
            SemanticRole::Keywords,
            SemanticRole::PageHeader,
            SemanticRole::PageFooter,
            SemanticRole::Reference,
            SemanticRole::Table,
            SemanticRole::Title,
            SemanticRole::Formula,
            SemanticRole::Other,
        ]
    }
}

impl fmt::Display for SemanticRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SemanticRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SemanticRole::all()
            .iter()
            .find(|r| r.as_str() == s.to_lowercase())
            .copied()
            .ok_or_else(|| format!("Unknown semantic role: '{}'", s))
    }
}

/// The granularity at which callers receive serialized output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtractionUnit {
    Character,
    Word,
    Paragraph,
    Figure,
    Shape,
    Page,
}

impl ExtractionUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionUnit::Character => "character",
            ExtractionUnit::Word => "word",
            ExtractionUnit::Paragraph => "paragraph",
            ExtractionUnit::Figure => "figure",
            ExtractionUnit::Shape => "shape",
            ExtractionUnit::Page => "page",
        }
    }

    pub fn all() -> &'static [ExtractionUnit] {
        &[
            ExtractionUnit::Character,
            ExtractionUnit::Word,
            ExtractionUnit::Paragraph,
            ExtractionUnit::Figure,
            ExtractionUnit::Shape,
            ExtractionUnit::Page,
        ]
    }
}

impl fmt::Display for ExtractionUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExtractionUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExtractionUnit::all()
            .iter()
            .find(|u| u.as_str() == s.to_lowercase())
            .copied()
            .ok_or_else(|| format!("Unknown extraction unit: '{}'", s))
    }
}
