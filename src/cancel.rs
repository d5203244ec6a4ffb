//! Cooperative cancellation of a running search.
//!
//! The solver polls the token once per extension, so a cancelled search stops after at most one more
//! step and reports [`SolverFailure::Aborted`](crate::SolverFailure::Aborted).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A flag shared between a running search and whoever may want to stop it.
///
/// Clones share state, so a clone handed to another thread can cancel the original.
#[derive(Debug, Clone)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// A token that has not been cancelled.
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether [`Self::cancel`] was called on this token or any clone of it.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Ask every search holding this token to stop.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}
