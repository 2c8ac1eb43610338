//! The one sanctioned mutation path for block roles.
//!
//! Every role write goes through the ledger, which records the previous
//! value. When a module fails, its writes are undone in reverse order and
//! the document is back in the state the module found it in.

use crate::types::content::Document;
use crate::types::roles::SemanticRole;

/// One recorded role write.
#[derive(Debug, Clone)]
pub struct RoleAssignment {
    pub page: usize,
    pub block: usize,
    pub module: &'static str,
    old_role: Option<SemanticRole>,
    old_secondary: Option<SemanticRole>,
}

/// Records role writes per module and can undo them.
#[derive(Debug, Default)]
pub struct RoleLedger {
    entries: Vec<RoleAssignment>,
    module: &'static str,
}

impl RoleLedger {
    pub fn new() -> RoleLedger {
        RoleLedger::default()
    }

    /// Mark the start of a module's writes. Returns a checkpoint for
    /// [`RoleLedger::rollback_to`].
    pub fn begin_module(&mut self, module: &'static str) -> usize {
        self.module = module;
        self.entries.len()
    }

    /// Set a block's primary role, recording the previous state.
    pub fn assign(&mut self, doc: &mut Document, page: usize, block: usize, role: SemanticRole) {
        let target = &mut doc.pages[page].blocks[block];
        if target.role == Some(role) {
            return;
        }
        self.entries.push(RoleAssignment {
            page,
            block,
            module: self.module,
            old_role: target.role,
            old_secondary: target.secondary_role,
        });
        target.role = Some(role);
    }

    /// Set a block's secondary role, recording the previous state.
    pub fn assign_secondary(&mut self, doc: &mut Document, page: usize, block: usize, role: SemanticRole) {
        let target = &mut doc.pages[page].blocks[block];
        if target.secondary_role == Some(role) {
            return;
        }
        self.entries.push(RoleAssignment {
            page,
            block,
            module: self.module,
            old_role: target.role,
            old_secondary: target.secondary_role,
        });
        target.secondary_role = Some(role);
    }

    /// Undo every write recorded after `checkpoint`, most recent first.
    /// Returns the number of reverted writes.
    pub fn rollback_to(&mut self, doc: &mut Document, checkpoint: usize) -> usize {
        let reverted = self.entries.len() - checkpoint;
        for entry in self.entries.drain(checkpoint..).rev().collect::<Vec<_>>() {
            let target = &mut doc.pages[entry.page].blocks[entry.block];
            target.role = entry.old_role;
            target.secondary_role = entry.old_secondary;
        }
        reverted
    }

    pub fn assignments(&self) -> &[RoleAssignment] {
        &self.entries
    }
}
