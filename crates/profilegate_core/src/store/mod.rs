//! Persisted key-value capability and the identity store built on it.
//!
//! # Responsibility
//! - Define the injected `get`/`set`/`clear` capability used by core flows.
//! - Keep JSON encoding of the identity record behind a typed API.
//!
//! # Invariants
//! - The identity lives under exactly one key (`userDetails`).
//! - Every `get`/`set`/`clear` is atomic with respect to core operations.

pub mod identity_store;
pub mod kv;
