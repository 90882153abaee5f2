//! Live title search over the fetched record set.
//!
//! # Invariants
//! - Filtering always starts from the full fetched set, never from a
//!   previously filtered subset.

pub mod filter;
