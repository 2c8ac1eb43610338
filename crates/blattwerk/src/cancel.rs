//! Cooperative cancellation.
//!
//! The pipeline checks the token at page boundaries and between semantic
//! modules. Cancellation discards the document under construction; no
//! partial output is written.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{ExtractionError, Result};

/// A cloneable cancellation handle. Cancelling any clone cancels all.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> CancelToken {
        CancelToken::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    /// Returns `Err(Cancelled)` once the token has fired.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(ExtractionError::Cancelled)
        } else {
            Ok(())
        }
    }
}
