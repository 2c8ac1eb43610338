//! Body fallback: whatever no other module claimed is body text.

use crate::error::Result;
use crate::semantic::SemanticModule;
use crate::semantic::ledger::RoleLedger;
use crate::types::content::Document;
use crate::types::roles::SemanticRole;

#[derive(Debug, Clone, Copy, Default)]
pub struct BodyModule;

impl SemanticModule for BodyModule {
    fn name(&self) -> &'static str {
        "body"
    }

    fn semanticize(&self, doc: &mut Document, ledger: &mut RoleLedger) -> Result<()> {
        let mut unassigned: Vec<(usize, usize)> = Vec::new();
        for (page_idx, page) in doc.pages.iter().enumerate() {
            for (block_idx, block) in page.blocks.iter().enumerate() {
                if block.role.is_none() {
                    unassigned.push((page_idx, block_idx));
                }
            }
        }
        for (page, block) in unassigned {
            ledger.assign(doc, page, block, SemanticRole::BodyText);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::tests::{block_with_face, doc_with_stats};

    #[test]
    fn test_unassigned_blocks_become_body_text() {
        let mut doc = doc_with_stats(vec![
            block_with_face("some text", 10.0, 500.0),
            block_with_face("more text", 10.0, 400.0),
        ]);
        doc.pages[0].blocks[0].role = Some(SemanticRole::Heading);
        BodyModule.semanticize(&mut doc, &mut RoleLedger::new()).unwrap();
        assert_eq!(doc.pages[0].blocks[0].role, Some(SemanticRole::Heading));
        assert_eq!(doc.pages[0].blocks[1].role, Some(SemanticRole::BodyText));
    }
}
