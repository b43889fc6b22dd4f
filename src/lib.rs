//! Blocking shared/exclusive mutual exclusion with writer preference.
//!
//! This crate provides [`SharedMutex`], a reader-writer lock for preemptible
//! OS threads: any number of shared holders may proceed together, while an
//! exclusive holder runs alone. An exclusive requester reserves the lock
//! *before* existing shared holders drain, so a continuous stream of shared
//! requests cannot postpone exclusive access indefinitely.
//!
//! [`SharedGuard`] is the scope-bound companion: it acquires shared access on
//! construction and releases it exactly once when dropped, on every exit path.
//!
//! # Writer-Preference Fairness
//!
//! | Scenario                    | Behavior                                        |
//! |-----------------------------|-------------------------------------------------|
//! | No exclusive activity       | Shared requesters are admitted immediately      |
//! | Exclusive requester waiting | New shared requesters refused until it releases |
//! | Holders + pending exclusive | Requester drains the holders, admitting no more |
//! | Multiple exclusive waiters  | Wake order is unspecified                       |
//!
//! Exclusive starvation is prevented: a pending exclusive request blocks new
//! shared admissions while it waits. Shared starvation remains possible under
//! continuous exclusive pressure.
//!
//! There is no timeout, no cancellation, and no FIFO ordering among blocked
//! requesters of either class; a blocked acquisition returns only when the
//! holders blocking it release.
//!
//! # Example
//!
//! ```
//! use shmutex::SharedMutex;
//!
//! let mutex = SharedMutex::new();
//!
//! // Any number of shared holders may be active together.
//! let guard = mutex.shared_guard();
//! assert!(mutex.try_lock_shared());
//! mutex.unlock_shared();
//! drop(guard);
//!
//! // Exclusive access is all-or-nothing.
//! assert!(mutex.try_lock_exclusive());
//! assert!(!mutex.try_lock_shared());
//! mutex.unlock_exclusive();
//! ```

mod shared_mutex;

pub use shared_mutex::{SharedGuard, SharedMutex};

#[cfg(test)]
pub(crate) mod test_utils;
