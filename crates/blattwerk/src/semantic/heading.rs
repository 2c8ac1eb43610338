//! Heading detection.

use crate::error::Result;
use crate::semantic::SemanticModule;
use crate::semantic::hints;
use crate::semantic::ledger::RoleLedger;
use crate::types::content::Document;
use crate::types::roles::SemanticRole;

/// A heading face exceeds the document's dominant size by at least this.
const MIN_SIZE_DELTA: f32 = 0.5;
/// Headings are short; anything longer is emphasized body text.
const MAX_LINES: usize = 3;

/// Tags blocks set in a larger or bolder face than the document's dominant
/// one as HEADING. Blocks whose text matches a section title are headings
/// regardless of face; the section-range modules key off them.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadingModule;

impl SemanticModule for HeadingModule {
    fn name(&self) -> &'static str {
        "heading"
    }

    fn semanticize(&self, doc: &mut Document, ledger: &mut RoleLedger) -> Result<()> {
        let document_face = doc.stats.chars.most_common_face();
        let document_bold = document_face
            .map(|f| doc.fonts.get(f.font.0).map(|font| font.is_bold).unwrap_or(false))
            .unwrap_or(false);

        let mut headings: Vec<(usize, usize)> = Vec::new();
        for (page_idx, page) in doc.pages.iter().enumerate() {
            for (block_idx, block) in page.blocks.iter().enumerate() {
                let eligible = block.role.is_none() || block.role == Some(SemanticRole::Heading);
                if !eligible {
                    continue;
                }
                if !block.lines.is_empty() && block.lines.len() > MAX_LINES {
                    continue;
                }
                if hints::section_role_for(&block.text).is_some() {
                    headings.push((page_idx, block_idx));
                    continue;
                }
                let Some(document_face) = document_face else {
                    continue;
                };
                let Some(face) = block.stat.most_common_face() else {
                    continue;
                };
                let larger = face.size() - document_face.size() >= MIN_SIZE_DELTA;
                let bolder = !document_bold
                    && doc.fonts.get(face.font.0).map(|f| f.is_bold).unwrap_or(false)
                    && face.size() >= document_face.size();
                if larger || bolder {
                    headings.push((page_idx, block_idx));
                }
            }
        }

        for (page, block) in headings {
            ledger.assign(doc, page, block, SemanticRole::Heading);
        }
        Ok(())
    }
}
