//! Flutter-facing bindings for the REDICOIN wallet core.

pub mod api;
