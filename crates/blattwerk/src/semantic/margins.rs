//! Page header and footer detection.

use crate::error::Result;
use crate::semantic::SemanticModule;
use crate::semantic::ledger::RoleLedger;
use crate::types::content::Document;
use crate::types::roles::SemanticRole;

/// Tags unassigned blocks confined to the top margin zone as PAGE_HEADER
/// and those confined to the bottom margin zone as PAGE_FOOTER.
#[derive(Debug, Clone, Copy)]
pub struct MarginModule {
    /// Fraction of the page height forming each margin zone.
    pub zone: f64,
}

impl SemanticModule for MarginModule {
    fn name(&self) -> &'static str {
        "page-margins"
    }

    fn semanticize(&self, doc: &mut Document, ledger: &mut RoleLedger) -> Result<()> {
        let mut assignments: Vec<(usize, usize, SemanticRole)> = Vec::new();
        for (page_idx, page) in doc.pages.iter().enumerate() {
            let header_floor = page.height * (1.0 - self.zone);
            let footer_ceiling = page.height * self.zone;
            for (block_idx, block) in page.blocks.iter().enumerate() {
                if block.role.is_some() {
                    continue;
                }
                if block.rect.min_y >= header_floor {
                    assignments.push((page_idx, block_idx, SemanticRole::PageHeader));
                } else if block.rect.max_y <= footer_ceiling {
                    assignments.push((page_idx, block_idx, SemanticRole::PageFooter));
                }
            }
        }
        for (page, block, role) in assignments {
            ledger.assign(doc, page, block, role);
        }
        Ok(())
    }
}
