//! The shared state machine behind all section-range modules.
//!
//! Abstract, categories, keywords, general terms, acknowledgments, and
//! references are each "everything between my heading and the next
//! heading". One module type covers all six; registration supplies the
//! role.

use crate::error::Result;
use crate::semantic::SemanticModule;
use crate::semantic::ledger::RoleLedger;
use crate::types::content::Document;
use crate::types::roles::SemanticRole;

/// Assigns `role` to every block between a heading hinted with `role` and
/// the next heading, walking blocks in page order, then document order.
#[derive(Debug, Clone, Copy)]
pub struct SectionModule {
    name: &'static str,
    role: SemanticRole,
}

impl SectionModule {
    pub const fn new(name: &'static str, role: SemanticRole) -> SectionModule {
        SectionModule { name, role }
    }
}

impl SemanticModule for SectionModule {
    fn name(&self) -> &'static str {
        self.name
    }

    fn semanticize(&self, doc: &mut Document, ledger: &mut RoleLedger) -> Result<()> {
        let mut in_section = false;

        for page_idx in 0..doc.pages.len() {
            for block_idx in 0..doc.pages[page_idx].blocks.len() {
                let (role, secondary) = {
                    let block = &doc.pages[page_idx].blocks[block_idx];
                    (block.role, block.secondary_role)
                };

                // The end-of-section check runs before the start-of-section
                // check: a heading both terminates the running section and
                // may open its own, and it keeps the HEADING role itself.
                if in_section {
                    if role == Some(SemanticRole::Heading) {
                        in_section = false;
                    } else {
                        ledger.assign(doc, page_idx, block_idx, self.role);
                    }
                }
                if role == Some(SemanticRole::Heading) && secondary == Some(self.role) {
                    in_section = true;
                }
            }
        }
        Ok(())
    }
}
