//! Secondary-role hinting.
//!
//! Before the module registry runs, blocks whose text matches a known
//! section title receive the matching role as a secondary-role hint. The
//! heading module later promotes hinted blocks to HEADING, and the
//! section-range modules key off the (HEADING, hint) pair to open their
//! sections.

use regex::Regex;
use std::sync::OnceLock;

use crate::semantic::ledger::RoleLedger;
use crate::types::content::Document;
use crate::types::roles::SemanticRole;

/// Section titles longer than this many lines are body text that happens
/// to start with a keyword, not headings.
const MAX_HINT_LINES: usize = 2;

const ABSTRACT_TITLES: &[&str] = &["abstract"];
const CATEGORIES_TITLES: &[&str] = &["categories and subject descriptors", "categories"];
const KEYWORDS_TITLES: &[&str] = &["keywords", "key words", "index terms"];
const GENERAL_TERMS_TITLES: &[&str] = &["general terms"];
const ACKNOWLEDGMENTS_TITLES: &[&str] = &[
    "acknowledgments",
    "acknowledgements",
    "acknowledgment",
    "acknowledgement",
];
const REFERENCES_TITLES: &[&str] = &["references", "bibliography", "references and notes"];

static NUMBERING_RE: OnceLock<Regex> = OnceLock::new();

/// Leading section numbering such as "7." or "2.1.3" before a title.
fn numbering_regex() -> &'static Regex {
    NUMBERING_RE.get_or_init(|| Regex::new(r"^\d+(\.\d+)*\.?\s+").expect("numbering regex compiles"))
}

/// Match a block's text against the section-title tables and set the
/// secondary-role hint through the ledger.
pub fn apply_hints(doc: &mut Document, ledger: &mut RoleLedger) {
    ledger.begin_module("hints");

    let mut hinted: Vec<(usize, usize, SemanticRole)> = Vec::new();
    for (page_idx, page) in doc.pages.iter().enumerate() {
        for (block_idx, block) in page.blocks.iter().enumerate() {
            if !block.lines.is_empty() && block.lines.len() > MAX_HINT_LINES {
                continue;
            }
            if let Some(role) = section_role_for(&block.text) {
                hinted.push((page_idx, block_idx, role));
            }
        }
    }
    for (page, block, role) in hinted {
        ledger.assign_secondary(doc, page, block, role);
    }
}

/// The section role whose title table matches the given block text, if any.
pub(crate) fn section_role_for(text: &str) -> Option<SemanticRole> {
    let normalized = normalize_title(text);
    let tables: &[(&[&str], SemanticRole)] = &[
        (ABSTRACT_TITLES, SemanticRole::Abstract),
        (CATEGORIES_TITLES, SemanticRole::Categories),
        (KEYWORDS_TITLES, SemanticRole::Keywords),
        (GENERAL_TERMS_TITLES, SemanticRole::GeneralTerms),
        (ACKNOWLEDGMENTS_TITLES, SemanticRole::Acknowledgments),
        (REFERENCES_TITLES, SemanticRole::Reference),
    ];
    tables
        .iter()
        .find(|(titles, _)| titles.contains(&normalized.as_str()))
        .map(|&(_, role)| role)
}

/// Lowercase, strip leading numbering and trailing punctuation, collapse
/// inner whitespace.
fn normalize_title(text: &str) -> String {
    let lower = text.to_lowercase();
    let stripped = numbering_regex().replace(lower.trim(), "");
    stripped
        .trim_end_matches([':', '.', ' '])
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
