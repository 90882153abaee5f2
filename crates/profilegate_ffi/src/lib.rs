//! Flutter-facing bindings for ProfileGate core.

pub mod api;
