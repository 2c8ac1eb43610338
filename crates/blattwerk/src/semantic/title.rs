//! Title detection.

use crate::error::Result;
use crate::semantic::SemanticModule;
use crate::semantic::ledger::RoleLedger;
use crate::types::content::Document;
use crate::types::roles::SemanticRole;

/// The title must exceed the document's dominant font size by at least
/// this many points; otherwise nothing on the first page is a title.
const MIN_SIZE_DELTA: f32 = 0.5;
/// The title sits in the upper part of the first page.
const TITLE_ZONE: f64 = 0.5;

/// Tags the largest-faced block in the upper half of the first page as
/// TITLE, when it is meaningfully larger than the document's body face.
#[derive(Debug, Clone, Copy, Default)]
pub struct TitleModule;

impl SemanticModule for TitleModule {
    fn name(&self) -> &'static str {
        "title"
    }

    fn semanticize(&self, doc: &mut Document, ledger: &mut RoleLedger) -> Result<()> {
        let Some(document_face) = doc.stats.chars.most_common_face() else {
            return Ok(());
        };
        let Some(page) = doc.pages.first() else {
            return Ok(());
        };

        let zone_floor = page.height * (1.0 - TITLE_ZONE);
        let mut best: Option<(usize, f32)> = None;
        for (block_idx, block) in page.blocks.iter().enumerate() {
            if block.role.is_some() && block.role != Some(SemanticRole::Title) {
                continue;
            }
            // A hinted section heading ("Abstract" in large type) is never
            // the title, however big its face.
            if block.secondary_role.is_some() {
                continue;
            }
            if block.rect.min_y < zone_floor || block.text.is_empty() {
                continue;
            }
            let Some(face) = block.stat.most_common_face() else {
                continue;
            };
            let size = face.size();
            if size - document_face.size() < MIN_SIZE_DELTA {
                continue;
            }
            match best {
                Some((_, best_size)) if best_size >= size => {}
                _ => best = Some((block_idx, size)),
            }
        }

        if let Some((block_idx, _)) = best {
            ledger.assign(doc, 0, block_idx, SemanticRole::Title);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::tests::{block_with_face, doc_with_stats};

    #[test]
    fn test_largest_face_in_upper_half_wins() {
        let mut doc = doc_with_stats(vec![
            block_with_face("A Grand Title", 18.0, 700.0),
            block_with_face("author line", 10.0, 660.0),
            block_with_face("body body body", 10.0, 600.0),
        ]);
        TitleModule
            .semanticize(&mut doc, &mut RoleLedger::new())
            .unwrap();
        assert_eq!(doc.pages[0].blocks[0].role, Some(SemanticRole::Title));
        assert_eq!(doc.pages[0].blocks[1].role, None);
    }

    #[test]
    fn test_uniform_face_produces_no_title() {
        let mut doc = doc_with_stats(vec![
            block_with_face("first block", 10.0, 700.0),
            block_with_face("second block", 10.0, 660.0),
        ]);
        TitleModule
            .semanticize(&mut doc, &mut RoleLedger::new())
            .unwrap();
        assert!(doc.pages[0].blocks.iter().all(|b| b.role.is_none()));
    }

    #[test]
    fn test_lower_half_is_ignored() {
        let mut doc = doc_with_stats(vec![
            block_with_face("body text", 10.0, 700.0),
            block_with_face("big footer banner", 20.0, 50.0),
        ]);
        TitleModule
            .semanticize(&mut doc, &mut RoleLedger::new())
            .unwrap();
        assert!(doc.pages[0].blocks.iter().all(|b| b.role.is_none()));
    }
}
