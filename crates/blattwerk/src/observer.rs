//! Structured diagnostics for recoverable degradations.
//!
//! The pipeline never logs through process-global state; callers inject an
//! observer. The default forwards to `tracing`, so embedding applications
//! get diagnostics on their existing subscriber without extra wiring.

use crate::error::ExtractionError;

/// A recoverable event the pipeline wants the host to know about.
#[derive(Debug)]
pub enum Diagnostic<'a> {
    /// A line or block was dropped for unusable geometry.
    GeometryDropped { error: &'a ExtractionError },
    /// A semantic module failed and its assignments were rolled back.
    ModuleRolledBack {
        module: &'static str,
        error: &'a ExtractionError,
        reverted_assignments: usize,
    },
    /// The producer yielded an empty document.
    EmptyDocument,
}

/// Receives [`Diagnostic`]s as the pipeline degrades gracefully.
pub trait DiagnosticObserver: Send + Sync {
    fn observe(&self, diagnostic: Diagnostic<'_>);
}

/// Default observer: forwards everything to `tracing` at warn level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl DiagnosticObserver for TracingObserver {
    fn observe(&self, diagnostic: Diagnostic<'_>) {
        match diagnostic {
            Diagnostic::GeometryDropped { error } => {
                tracing::warn!("Dropped element: {}", error);
            }
            Diagnostic::ModuleRolledBack {
                module,
                error,
                reverted_assignments,
            } => {
                tracing::warn!(
                    "Rolled back {} role assignment(s) from module '{}': {}",
                    reverted_assignments,
                    module,
                    error
                );
            }
            Diagnostic::EmptyDocument => {
                tracing::debug!("Producer yielded an empty document");
            }
        }
    }
}

/// Observer that drops everything. Useful in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl DiagnosticObserver for NullObserver {
    fn observe(&self, _diagnostic: Diagnostic<'_>) {}
}
