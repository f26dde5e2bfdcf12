//! Packing unit domain model.
//!
//! # Responsibility
//! - Define the child record (luggage, box) owned by one scheduled activity.
//!
//! # Invariants
//! - `parent_id` never changes after creation.
//! - `items` is the normalized form of whatever contents shape the store held;
//!   see `repo::contents::normalize_contents`.

use crate::model::activity::ActivityId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a packing unit.
pub type UnitId = Uuid;

/// Child record holding packed content items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackingUnit {
    pub id: UnitId,
    pub parent_id: ActivityId,
    /// Ordered content items after boundary normalization.
    pub items: Vec<String>,
}

impl PackingUnit {
    /// Creates a unit with a generated ID.
    pub fn new(parent_id: ActivityId, items: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            parent_id,
            items,
        }
    }

    /// Creates a unit with no packed items.
    pub fn empty(parent_id: ActivityId) -> Self {
        Self::new(parent_id, Vec::new())
    }
}
