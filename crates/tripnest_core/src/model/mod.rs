//! Domain model for scheduled activities and their packing units.
//!
//! # Responsibility
//! - Define the records the status engine evaluates.
//! - Keep one canonical shape per record regardless of UI projection.
//!
//! # Invariants
//! - Every record is identified by a stable UUID.
//! - A packing unit belongs to exactly one scheduled activity.
//! - Packing-unit contents are already normalized to an ordered item list.

pub mod activity;
pub mod packing_unit;
