//! Itinerary status and mutation-permission engine.
//!
//! # Responsibility
//! - Derive a lifecycle status from schedule window, completeness and time.
//! - Map that status to the mutations the UI may currently offer.
//! - Model the on-the-day recovery gate as an explicit session value.
//!
//! # Invariants
//! - `resolve_status` and `resolve_permissions` are pure and total.
//! - Nothing here talks to a repository or reads the wall clock.
//! - The recovery gate's `satisfied` flag is set-once per session.

pub mod completeness;
pub mod permission;
pub mod recovery;
pub mod status;
