//! The semanticizer: an ordered registry of rule modules that assign
//! semantic roles to text blocks.
//!
//! Modules communicate only through the document and mutate roles only
//! through the [`RoleLedger`], so a failing module rolls back cleanly and
//! the pipeline continues with the next one. Registration order is the
//! policy: title and heading detection run first, the section-range
//! modules consume the heading hints, the positional classifiers follow,
//! and the body fallback closes every gap.

mod body;
mod caption;
mod footnote;
mod heading;
mod hints;
mod ledger;
mod margins;
mod section;
mod title;

pub use body::BodyModule;
pub use caption::CaptionModule;
pub use footnote::FootnoteModule;
pub use heading::HeadingModule;
pub use ledger::{RoleAssignment, RoleLedger};
pub use margins::MarginModule;
pub use section::SectionModule;
pub use title::TitleModule;

use crate::cancel::CancelToken;
use crate::config::SemanticConfig;
use crate::error::{ExtractionError, Result};
use crate::observer::{Diagnostic, DiagnosticObserver};
use crate::types::content::Document;
use crate::types::roles::SemanticRole;

/// A pluggable rule object that assigns semantic roles to text blocks.
pub trait SemanticModule: Send + Sync {
    fn name(&self) -> &'static str;

    /// Read the document, write roles through the ledger. Returning an
    /// error rolls back everything this invocation wrote.
    fn semanticize(&self, doc: &mut Document, ledger: &mut RoleLedger) -> Result<()>;
}

/// The module registry in invocation order. A new section type is one
/// more [`SectionModule`] entry.
pub fn registry(config: &SemanticConfig) -> Vec<Box<dyn SemanticModule>> {
    vec![
        Box::new(TitleModule),
        Box::new(HeadingModule),
        Box::new(SectionModule::new("abstract", SemanticRole::Abstract)),
        Box::new(SectionModule::new("categories", SemanticRole::Categories)),
        Box::new(SectionModule::new("keywords", SemanticRole::Keywords)),
        Box::new(SectionModule::new("general-terms", SemanticRole::GeneralTerms)),
        Box::new(SectionModule::new("acknowledgments", SemanticRole::Acknowledgments)),
        Box::new(SectionModule::new("references", SemanticRole::Reference)),
        Box::new(CaptionModule { gap: config.caption_gap }),
        Box::new(FootnoteModule),
        Box::new(MarginModule {
            zone: config.margin_zone_factor,
        }),
        Box::new(BodyModule),
    ]
}

/// Run the hint pass and every registered module in order.
///
/// Only cancellation aborts. A failing module has its writes rolled back
/// and reported to the observer; the remaining modules still run.
pub fn semanticize(
    doc: &mut Document,
    config: &SemanticConfig,
    cancel: &CancelToken,
    observer: &dyn DiagnosticObserver,
) -> Result<()> {
    let mut ledger = RoleLedger::new();
    hints::apply_hints(doc, &mut ledger);

    for module in registry(config) {
        cancel.check()?;
        let checkpoint = ledger.begin_module(module.name());
        if let Err(err) = module.semanticize(doc, &mut ledger) {
            if matches!(err, ExtractionError::Cancelled) {
                return Err(err);
            }
            let reverted = ledger.rollback_to(doc, checkpoint);
            let failure = ExtractionError::ModuleFailure {
                module: module.name(),
                detail: err.to_string(),
            };
            observer.observe(Diagnostic::ModuleRolledBack {
                module: module.name(),
                error: &failure,
                reverted_assignments: reverted,
            });
        }
    }
    Ok(())
}
