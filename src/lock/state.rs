//! State shared between a handle and the registry that tracks it.

use std::cell::Cell;
use std::num::NonZeroU32;

/// Sequence and acquisition flag of one handle.
///
/// The handle reads and updates it through its own operations; the
/// [`Locker`](crate::Locker) registry holds a second reference so a protocol
/// fault can invalidate unacquired handles in bulk.
#[derive(Debug)]
pub(crate) struct LockState {
    sequence: Cell<Option<NonZeroU32>>,
    acquired: Cell<bool>,
}

impl LockState {
    pub(crate) fn new(sequence: NonZeroU32) -> Self {
        Self {
            sequence: Cell::new(Some(sequence)),
            acquired: Cell::new(false),
        }
    }

    pub(crate) fn sequence(&self) -> Option<NonZeroU32> {
        self.sequence.get()
    }

    pub(crate) fn is_acquired(&self) -> bool {
        self.acquired.get()
    }

    pub(crate) fn mark_acquired(&self) {
        self.acquired.set(true);
    }

    /// Clear the sequence and the acquisition flag. Terminal.
    pub(crate) fn invalidate(&self) {
        self.sequence.set(None);
        self.acquired.set(false);
    }
}
