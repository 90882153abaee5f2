//! Navigation surface: routes, history and the browse-route gate.
//!
//! # Responsibility
//! - Parse and render the two known routes and the success marker.
//! - Track push/replace history so route canonicalization is observable.
//! - Decide whether the browse route may render.
//!
//! # Invariants
//! - Canonicalization after a success banner uses replace, never push.
//! - The gate is a pure function of the persisted identity presence.

pub mod gate;
pub mod history;
pub mod route;
