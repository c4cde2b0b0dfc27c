//! Single-flight guard for research submissions.

use crate::error::{InsightError, Result};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Allows at most one outstanding submission.
///
/// [`try_acquire`](Self::try_acquire) hands out a ticket; the slot is released
/// when the ticket is dropped, including on early returns and errors.
#[derive(Debug, Clone, Default)]
pub struct SubmissionGuard {
    in_flight: Arc<AtomicBool>,
}

impl SubmissionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the slot, or fails with `SubmissionInProgress`.
    pub fn try_acquire(&self) -> Result<SubmissionTicket> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| InsightError::SubmissionInProgress)?;
        Ok(SubmissionTicket {
            in_flight: Arc::clone(&self.in_flight),
        })
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

/// Proof of an outstanding submission. Releases the guard on drop.
#[derive(Debug)]
pub struct SubmissionTicket {
    in_flight: Arc<AtomicBool>,
}

impl Drop for SubmissionTicket {
    fn drop(&mut self) {
        self.in_flight.store(false, Ordering::Release);
    }
}
