//! Identity intake form.
//!
//! # Responsibility
//! - Hold the working field values and the validation state machine.
//! - Persist a valid identity and report the navigation that follows.
//!
//! # Invariants
//! - Field edits never trigger validation.
//! - A submit always recomputes the whole error set.

pub mod intake;
