//! Cooperative cancellation
//!
//! Parsers check the token between top-level elements (each CSV record,
//! each top-level JSON array element, each YAML block entry) and abort
//! cleanly: accumulated diagnostics are returned, no partial tree is
//! exposed as if complete.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A cloneable cancellation flag. Cancelling any clone cancels them all,
/// so a host may hand the token to another thread or a timer.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
