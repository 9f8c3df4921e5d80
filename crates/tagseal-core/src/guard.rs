//! Submit guard: blocks form submission while token contents are in flux.
//!
//! The latch is process-wide: clones share one flag, so the form's submit
//! handler and the session controller observe the same state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A submit event raised by the hosting form.
pub trait SubmitEvent {
    fn prevent_default(&mut self);
    fn stop_propagation(&mut self);
}

/// What the submit handler decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitDecision {
    Allowed,
    Cancelled,
}

/// A boolean latch shared between the session and the form.
#[derive(Debug, Clone, Default)]
pub struct SubmitGuard {
    blocked: Arc<AtomicBool>,
}

impl SubmitGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Block submission until the returned hold is released or dropped.
    ///
    /// Engage before the first asynchronous crypto call of an operation that
    /// mutates tokens; the hold keeps the latch set across every exit path of
    /// that operation.
    #[must_use = "the guard is released as soon as the hold is dropped"]
    pub fn engage(&self) -> SubmitHold {
        self.blocked.store(true, Ordering::SeqCst);
        tracing::trace!("submit guard engaged");
        SubmitHold {
            guard: self.clone(),
        }
    }

    /// Clear the latch.
    pub fn release(&self) {
        self.blocked.store(false, Ordering::SeqCst);
        tracing::trace!("submit guard released");
    }

    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Submit handler for the hosting form.
    ///
    /// Cancels the event when the latch is set and the form reports that
    /// protection is active.
    pub fn on_submit(
        &self,
        event: &mut dyn SubmitEvent,
        protection_active: bool,
    ) -> SubmitDecision {
        if self.is_blocked() && protection_active {
            event.prevent_default();
            event.stop_propagation();
            tracing::info!("form submission cancelled while crypto work is in flight");
            return SubmitDecision::Cancelled;
        }
        SubmitDecision::Allowed
    }
}

/// An engaged guard. Releases the latch when dropped.
#[derive(Debug)]
pub struct SubmitHold {
    guard: SubmitGuard,
}

impl SubmitHold {
    /// Release explicitly once the operation has settled.
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for SubmitHold {
    fn drop(&mut self) {
        self.guard.release();
    }
}
