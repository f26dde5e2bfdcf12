//! Flutter-facing bindings for TripNest core.

pub mod api;
