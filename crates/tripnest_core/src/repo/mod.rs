//! Repository contracts consumed by the itinerary service.
//!
//! # Responsibility
//! - Define the read contract the service needs from the backing store.
//! - Normalize polymorphic packing-unit contents at the boundary.
//!
//! # Invariants
//! - Children are returned most-recent-first.
//! - Repositories report semantic errors (`NotFound`, `Unavailable`) and never
//!   fabricate empty collections on failure.

pub mod contents;
pub mod itinerary_repo;
