//! Browse view state: fetch lifecycle, live query and pagination.
//!
//! # Responsibility
//! - Track the single fetch issued per mount and apply its completion.
//! - Derive the visible page from the current query and the full set.
//!
//! # Invariants
//! - At most one fetch is issued per mount (manual retry excepted).
//! - Completions for a torn-down or different mount are discarded.

pub mod browse;
pub mod pager;
