//! Transient notification banners with cancellable auto-dismiss timers.
//!
//! # Responsibility
//! - Own the two independent banner instances (entry success, validation
//!   error) and their scheduled dismissals.
//! - Report dismissal side effects to the caller instead of applying them.
//!
//! # Invariants
//! - A banner has at most one live timer; re-showing replaces it.
//! - Teardown cancels timers without emitting dismissal effects.

pub mod sequencer;
pub mod timer;

/// Epoch milliseconds, the time unit used by all scheduling APIs.
pub type EpochMs = i64;

/// Fixed visibility window for every banner.
pub const BANNER_DURATION_MS: EpochMs = 3_000;
