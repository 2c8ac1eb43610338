//! Footnote detection.

use crate::error::Result;
use crate::semantic::SemanticModule;
use crate::semantic::ledger::RoleLedger;
use crate::types::content::Document;
use crate::types::roles::SemanticRole;

/// Footnotes live in the lower part of the page.
const FOOTNOTE_ZONE: f64 = 1.0 / 3.0;
/// A footnote face is noticeably smaller than the document face.
const MIN_SIZE_DELTA: f32 = 0.5;

/// Tags unassigned small-faced blocks in the bottom zone of a page as
/// FOOTNOTE.
#[derive(Debug, Clone, Copy, Default)]
pub struct FootnoteModule;

impl SemanticModule for FootnoteModule {
    fn name(&self) -> &'static str {
        "footnote"
    }

    fn semanticize(&self, doc: &mut Document, ledger: &mut RoleLedger) -> Result<()> {
        let Some(document_face) = doc.stats.chars.most_common_face() else {
            return Ok(());
        };

        let mut footnotes: Vec<(usize, usize)> = Vec::new();
        for (page_idx, page) in doc.pages.iter().enumerate() {
            let zone_ceiling = page.height * FOOTNOTE_ZONE;
            for (block_idx, block) in page.blocks.iter().enumerate() {
                if block.role.is_some() {
                    continue;
                }
                if block.rect.max_y > zone_ceiling {
                    continue;
                }
                let Some(face) = block.stat.most_common_face() else {
                    continue;
                };
                if document_face.size() - face.size() >= MIN_SIZE_DELTA {
                    footnotes.push((page_idx, block_idx));
                }
            }
        }
        for (page, block) in footnotes {
            ledger.assign(doc, page, block, SemanticRole::Footnote);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::tests::{block_with_face, doc_with_stats};

    #[test]
    fn test_small_face_at_page_bottom_is_footnote() {
        let mut doc = doc_with_stats(vec![
            block_with_face("Body text dominating the document face counts.", 10.0, 500.0),
            block_with_face("1 See the extended version.", 8.0, 60.0),
        ]);
        FootnoteModule
            .semanticize(&mut doc, &mut RoleLedger::new())
            .unwrap();
        assert_eq!(doc.pages[0].blocks[1].role, Some(SemanticRole::Footnote));
        assert_eq!(doc.pages[0].blocks[0].role, None);
    }

    #[test]
    fn test_body_sized_block_at_bottom_is_not_footnote() {
        let mut doc = doc_with_stats(vec![
            block_with_face("Body text dominating the document face counts.", 10.0, 500.0),
            block_with_face("Last paragraph of the page.", 10.0, 60.0),
        ]);
        FootnoteModule
            .semanticize(&mut doc, &mut RoleLedger::new())
            .unwrap();
        assert_eq!(doc.pages[0].blocks[1].role, None);
    }
}
