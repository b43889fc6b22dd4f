//! The shared/exclusive lock and its scope-bound shared guard.
//!
//! The lock arbitrates access to a resource it does not own: there is no data
//! payload, only the admission protocol. Callers pair every successful
//! acquisition with the matching release, or hold shared access through
//! [`SharedGuard`] and let `Drop` release it.
//!
//! # Acquisition Protocol
//!
//! Exclusive acquisition runs in two steps under one internal mutex:
//!
//! 1. Wait until no exclusive reservation exists, then claim it. From this
//!    instant new shared requesters are refused, even though existing shared
//!    holders are still active.
//! 2. Wait until the shared-holder count drains to zero.
//!
//! Shared acquisition waits only for the reservation to clear, then
//! increments the holder count. The try-variants perform the same checks
//! without ever suspending, and `try_lock_exclusive` is all-or-nothing: it
//! never leaves a reservation behind when it fails.

use parking_lot::{Condvar, Mutex};

#[derive(Debug, Default)]
struct State {
    /// Currently-active shared holders.
    shared_holders: usize,
    /// An exclusive requester has claimed priority: it is either waiting for
    /// shared holders to drain or already running exclusively.
    exclusive_reserved: bool,
}

/// A blocking shared/exclusive mutual-exclusion primitive with writer
/// preference.
///
/// Any number of shared holders proceed together; an exclusive holder runs
/// with no shared holder active. A pending exclusive request refuses new
/// shared admissions before it runs, bounding its wait under continuous
/// shared arrival.
///
/// The lock is created unlocked and is reusable indefinitely. Releasing
/// access that is not held, or dropping the lock while held, is a programmer
/// error: the release paths diagnose it with `debug_assert!` and do nothing
/// to mask it in release builds.
///
/// # Fairness
///
/// There is no FIFO ordering among blocked exclusive requesters, nor between
/// blocked exclusive and shared requesters; wake order is whatever the
/// underlying condition variables deliver. Only one exclusive reservation
/// exists at a time, so of several concurrently blocked exclusive requesters
/// whichever wakes first claims it.
#[derive(Debug, Default)]
pub struct SharedMutex {
    state: Mutex<State>,
    /// Waited on by exclusive requesters until the reservation clears.
    exclusive_cond: Condvar,
    /// Waited on by shared requesters until the reservation clears, and by
    /// the reserving exclusive requester until the holder count drains.
    shared_cond: Condvar,
}

impl SharedMutex {
    /// Creates a new, unlocked lock.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(State {
                shared_holders: 0,
                exclusive_reserved: false,
            }),
            exclusive_cond: Condvar::new(),
            shared_cond: Condvar::new(),
        }
    }

    /// Blocks the calling thread until it is the sole holder.
    ///
    /// Claims the exclusive reservation as soon as no other reservation
    /// exists, refusing all new shared admissions from that point, and then
    /// waits for the active shared holders to drain. May therefore suspend
    /// twice in sequence. There is no timeout.
    pub fn lock_exclusive(&self) {
        let mut state = self.state.lock();
        self.exclusive_cond
            .wait_while(&mut state, |s| s.exclusive_reserved);
        state.exclusive_reserved = true;
        self.shared_cond
            .wait_while(&mut state, |s| s.shared_holders > 0);
    }

    /// Attempts to become the sole holder without blocking.
    ///
    /// Succeeds only when the lock is fully idle: no reservation and no
    /// active shared holder. On failure the state is left untouched: unlike
    /// [`lock_exclusive`](Self::lock_exclusive), this never creates a
    /// reserved-but-draining condition.
    #[must_use]
    pub fn try_lock_exclusive(&self) -> bool {
        let mut state = self.state.lock();
        if !state.exclusive_reserved && state.shared_holders == 0 {
            state.exclusive_reserved = true;
            return true;
        }
        false
    }

    /// Releases exclusive access.
    ///
    /// The caller must currently hold exclusive access; this precondition is
    /// not checked in release builds. One waiter of each class is notified so
    /// blocked exclusive and shared requesters re-evaluate.
    pub fn unlock_exclusive(&self) {
        let mut state = self.state.lock();
        debug_assert!(
            state.exclusive_reserved,
            "unlock_exclusive called without holding exclusive access"
        );
        state.exclusive_reserved = false;
        drop(state);
        self.exclusive_cond.notify_one();
        self.shared_cond.notify_one();
    }

    /// Blocks the calling thread until shared access is granted.
    ///
    /// Waits for any exclusive reservation to clear, then joins the active
    /// shared holders. Multiple shared holders proceed concurrently once
    /// admitted. There is no timeout.
    pub fn lock_shared(&self) {
        let mut state = self.state.lock();
        self.shared_cond
            .wait_while(&mut state, |s| s.exclusive_reserved);
        state.shared_holders += 1;
    }

    /// Attempts to acquire shared access without blocking.
    ///
    /// Succeeds whenever no exclusive reservation exists, regardless of how
    /// many shared holders are already active. Fails with no state change
    /// otherwise.
    #[must_use]
    pub fn try_lock_shared(&self) -> bool {
        let mut state = self.state.lock();
        if !state.exclusive_reserved {
            state.shared_holders += 1;
            return true;
        }
        false
    }

    /// Releases shared access.
    ///
    /// The caller must currently hold shared access; this precondition is not
    /// checked in release builds. All waiters on the shared/drain condition
    /// are notified, since a decrement can only help a draining exclusive
    /// requester or fellow shared requesters.
    pub fn unlock_shared(&self) {
        let mut state = self.state.lock();
        debug_assert!(
            state.shared_holders > 0,
            "unlock_shared called without holding shared access"
        );
        state.shared_holders -= 1;
        drop(state);
        self.shared_cond.notify_all();
    }

    /// Acquires shared access and returns a guard that releases it on drop.
    ///
    /// Blocks exactly like [`lock_shared`](Self::lock_shared); the guard is
    /// constructed only after the acquisition succeeds, so the release in
    /// `Drop` always matches it.
    ///
    /// # Example
    ///
    /// ```
    /// use shmutex::SharedMutex;
    ///
    /// let mutex = SharedMutex::new();
    /// {
    ///     let _guard = mutex.shared_guard();
    ///     assert_eq!(mutex.shared_count(), 1);
    /// }
    /// assert_eq!(mutex.shared_count(), 0);
    /// ```
    pub fn shared_guard(&self) -> SharedGuard<'_> {
        self.lock_shared();
        SharedGuard { mutex: self }
    }

    /// Returns the current number of active shared holders.
    ///
    /// Diagnostic accessor for tests and debugging only. The value is stale
    /// the moment the internal mutex is released; callers must not base
    /// liveness or admission decisions on it.
    #[must_use]
    pub fn shared_count(&self) -> usize {
        self.state.lock().shared_holders
    }
}

/// RAII guard holding shared access to a [`SharedMutex`].
///
/// Created by [`SharedMutex::shared_guard`], which blocks until shared access
/// is granted. Dropping the guard releases that access exactly once, on every
/// exit path including unwinding. The guard exposes no other operations, and
/// the lock must outlive it (enforced by the borrow).
///
/// There is no exclusive-mode equivalent; callers needing scoped exclusive
/// access build the analogous wrapper on
/// [`lock_exclusive`](SharedMutex::lock_exclusive) /
/// [`unlock_exclusive`](SharedMutex::unlock_exclusive).
#[must_use = "guard releases shared access immediately if not held"]
pub struct SharedGuard<'a> {
    mutex: &'a SharedMutex,
}

impl Drop for SharedGuard<'_> {
    #[inline]
    fn drop(&mut self) {
        self.mutex.unlock_shared();
    }
}
