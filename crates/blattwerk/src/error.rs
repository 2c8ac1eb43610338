//! Crate-level error type and result alias.
//!
//! Only `Parse`, `Io`, and `Cancelled` abort a run. Everything else is
//! recovered from inside the pipeline: degraded pages and failed semantic
//! modules produce diagnostics, not errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The producer could not decode the PDF. No document is produced.
    #[error("Failed to parse PDF: {reason}")]
    Parse { reason: String },

    /// The producer hit a feature it cannot handle (e.g. encryption).
    #[error("Unsupported PDF feature: {what}")]
    UnsupportedFeature { what: String },

    /// The producer succeeded but yielded zero characters. Callers that
    /// reach the pipeline never see this: it degrades to an empty document.
    #[error("Input contains no extractable characters")]
    EmptyInput,

    /// A line or block carried unusable geometry and was dropped.
    /// Surfaced through the observer, never returned from the pipeline.
    #[error("Inconsistent geometry on page {page}: {detail}")]
    InconsistentGeometry { page: u32, detail: String },

    /// A semantic module failed; its role assignments were rolled back.
    /// Surfaced through the observer, never returned from the pipeline.
    #[error("Semantic module '{module}' failed: {detail}")]
    ModuleFailure { module: &'static str, detail: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The cancellation token fired. The document under construction is
    /// discarded; no partial output is written.
    #[error("Extraction cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, ExtractionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ExtractionError::Parse {
            reason: "bad xref table".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to parse PDF: bad xref table");
    }

    #[test]
    fn test_unsupported_feature_display() {
        let err = ExtractionError::UnsupportedFeature {
            what: "AES-256 encryption".to_string(),
        };
        assert_eq!(err.to_string(), "Unsupported PDF feature: AES-256 encryption");
    }

    #[test]
    fn test_module_failure_display() {
        let err = ExtractionError::ModuleFailure {
            module: "abstract",
            detail: "missing statistics".to_string(),
        };
        assert_eq!(err.to_string(), "Semantic module 'abstract' failed: missing statistics");
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ExtractionError = io.into();
        assert!(matches!(err, ExtractionError::Io(_)));
    }

    #[test]
    fn test_cancelled_display() {
        assert_eq!(ExtractionError::Cancelled.to_string(), "Extraction cancelled");
    }
}
