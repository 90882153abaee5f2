//! Domain model for the intake profile and the browsed record list.
//!
//! # Responsibility
//! - Define the persisted identity shape and its field-level validators.
//! - Define the read-only remote record shape.
//!
//! # Invariants
//! - At most one `Identity` exists per store; it is replaced wholesale.
//! - `ListRecord` values are never mutated after decode.

pub mod identity;
pub mod record;
