//! Single-use lock handles.
//!
//! A [`Lock`] represents one acquisition cycle for one resource name. It is
//! minted by [`Locker::create_lock`](crate::Locker::create_lock), which binds
//! a fresh sequence number, and talks back to the locker only through the
//! narrow [`LockService`] interface.
//!
//! # States
//!
//! - **Fresh**: sequence bound, not acquired. `acquire` moves it to Acquired;
//!   a refused acquire leaves it Fresh.
//! - **Acquired**: the server granted the lock. `release` unlocks and moves it
//!   to Invalid no matter what the server answered.
//! - **Invalid**: sequence cleared. `acquire` fails with
//!   [`LockerError::LockReuse`], `release` with
//!   [`LockerError::UnlockWithoutLock`].
//!
//! A protocol fault on the shared connection moves every Fresh handle to
//! Invalid. Acquired handles keep their state and learn about the loss when
//! they release.
//!
//! # RAII
//!
//! Dropping an Acquired handle releases it without loss reporting. Dropping a
//! Fresh handle only unregisters it; the server is not contacted.

mod state;


pub(crate) use state::LockState;

use crate::error::{LockerError, Result};
use std::rc::Rc;
use tracing::warn;

/// Operations a handle needs from the connection that minted it.
pub trait LockService {
    /// Request the lock. `Ok(false)` means the server refused within `wait_ms`.
    fn lock(&self, name: &str, sequence: u32, wait_ms: u32, timeout_ms: u32) -> Result<bool>;

    /// Release the lock held under `sequence`. `Ok(false)` means the server
    /// did not consider it held.
    fn unlock(&self, sequence: u32) -> Result<bool>;

    /// Forget the handle registered under `sequence`. No-op when absent.
    fn unregister(&self, sequence: u32);
}

/// Handle for one named lock request.
pub struct Lock<'a> {
    service: &'a dyn LockService,
    name: String,
    state: Rc<LockState>,
}

impl<'a> Lock<'a> {
    pub(crate) fn new(service: &'a dyn LockService, name: String, state: Rc<LockState>) -> Self {
        Self {
            service,
            name,
            state,
        }
    }

    /// Resource name this handle locks.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bound sequence number, or `None` once the handle is invalid.
    pub fn sequence(&self) -> Option<u32> {
        self.state.sequence().map(|s| s.get())
    }

    /// Whether the lock is currently held.
    pub fn is_acquired(&self) -> bool {
        self.state.is_acquired()
    }

    /// Acquire the lock.
    ///
    /// `wait_ms` is how long the server may keep the request pending before
    /// refusing; `timeout_ms` is how long it honors the lock once granted.
    ///
    /// # Errors
    ///
    /// * [`LockerError::LockReuse`] - the handle was invalidated or already
    ///   holds its lock; no I/O
    /// * [`LockerError::WaitTimeout`] - the server refused; the handle stays Fresh
    /// * any protocol fault from the connection; the handle is then invalid
    pub fn acquire(&mut self, wait_ms: u32, timeout_ms: u32) -> Result<()> {
        let Some(sequence) = self.state.sequence() else {
            return Err(LockerError::LockReuse(self.name.clone()));
        };
        if self.is_acquired() {
            return Err(LockerError::LockReuse(self.name.clone()));
        }

        let granted = self
            .service
            .lock(&self.name, sequence.get(), wait_ms, timeout_ms)?;
        if !granted {
            return Err(LockerError::WaitTimeout(self.name.clone()));
        }

        self.state.mark_acquired();
        Ok(())
    }

    /// Release the lock. The handle is invalid afterwards, whatever happens.
    ///
    /// With `panic_on_loss` set, a release the server did not confirm is
    /// reported as [`LockerError::LostLock`]; otherwise it is silently
    /// accepted.
    ///
    /// # Errors
    ///
    /// * [`LockerError::UnlockWithoutLock`] - not acquired; nothing changes
    /// * [`LockerError::LostLock`] - only with `panic_on_loss`
    /// * any protocol fault from the unlock exchange
    pub fn release(&mut self, panic_on_loss: bool) -> Result<()> {
        if !self.is_acquired() {
            return Err(LockerError::UnlockWithoutLock(self.name.clone()));
        }

        let Some(sequence) = self.state.sequence() else {
            return Err(LockerError::UnlockWithoutLock(self.name.clone()));
        };

        let released = self.service.unlock(sequence.get());
        self.reset();

        if !released? && panic_on_loss {
            return Err(LockerError::LostLock(self.name.clone()));
        }

        Ok(())
    }

    /// Invalidate the handle without contacting the server.
    pub fn reset(&mut self) {
        if let Some(sequence) = self.state.sequence() {
            self.service.unregister(sequence.get());
        }
        self.state.invalidate();
    }
}

impl std::fmt::Debug for Lock<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lock")
            .field("name", &self.name)
            .field("sequence", &self.sequence())
            .field("acquired", &self.is_acquired())
            .finish()
    }
}

impl Drop for Lock<'_> {
    fn drop(&mut self) {
        if self.is_acquired() {
            if let Err(e) = self.release(false) {
                warn!(lock = %self.name, error = %e, "failed to release lock on drop");
            }
        } else if self.state.sequence().is_some() {
            self.reset();
        }
    }
}
