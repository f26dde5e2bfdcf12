//! Itinerary repository contract and in-process implementation.
//!
//! # Responsibility
//! - Define how the service reads a parent activity and its packing units.
//! - Provide an in-memory store for hosts without a persistence layer yet.
//!
//! # Invariants
//! - `list_children` orders units most-recent-first.
//! - Listing children of an unknown parent is `NotFound`, not an empty list.
//! - Raw contents are normalized on insert; stored units never hold raw shapes.

use crate::model::activity::{ActivityId, ScheduledActivity};
use crate::model::packing_unit::{PackingUnit, UnitId};
use crate::repo::contents::normalize_contents;
use serde_json::Value;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for itinerary reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    NotFound(ActivityId),
    Unavailable(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "activity not found: {id}"),
            Self::Unavailable(message) => write!(f, "itinerary store unavailable: {message}"),
        }
    }
}

impl Error for RepoError {}

/// Read contract for activities and their packing units.
pub trait ItineraryRepository {
    fn get_parent(&self, id: ActivityId) -> RepoResult<ScheduledActivity>;
    fn list_children(&self, parent_id: ActivityId) -> RepoResult<Vec<PackingUnit>>;
}

impl<R: ItineraryRepository + ?Sized> ItineraryRepository for &R {
    fn get_parent(&self, id: ActivityId) -> RepoResult<ScheduledActivity> {
        (**self).get_parent(id)
    }

    fn list_children(&self, parent_id: ActivityId) -> RepoResult<Vec<PackingUnit>> {
        (**self).list_children(parent_id)
    }
}

/// In-memory itinerary store.
#[derive(Debug, Default)]
pub struct MemoryItineraryRepository {
    activities: HashMap<ActivityId, ScheduledActivity>,
    /// Insertion order; listing walks it backwards.
    units: Vec<PackingUnit>,
}

impl MemoryItineraryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an activity.
    pub fn upsert_activity(&mut self, activity: ScheduledActivity) -> ActivityId {
        let id = activity.id;
        self.activities.insert(id, activity);
        id
    }

    /// Adds a packing unit from raw stored contents.
    pub fn add_unit(&mut self, parent_id: ActivityId, raw_contents: &Value) -> RepoResult<UnitId> {
        if !self.activities.contains_key(&parent_id) {
            return Err(RepoError::NotFound(parent_id));
        }

        let unit = PackingUnit {
            id: Uuid::new_v4(),
            parent_id,
            items: normalize_contents(raw_contents),
        };
        let unit_id = unit.id;
        self.units.push(unit);
        Ok(unit_id)
    }

    /// Removes a packing unit. Returns whether it existed.
    pub fn remove_unit(&mut self, unit_id: UnitId) -> bool {
        let before = self.units.len();
        self.units.retain(|unit| unit.id != unit_id);
        self.units.len() != before
    }

    /// Removes an activity and every unit it owns.
    pub fn remove_activity(&mut self, id: ActivityId) -> RepoResult<()> {
        if self.activities.remove(&id).is_none() {
            return Err(RepoError::NotFound(id));
        }
        self.units.retain(|unit| unit.parent_id != id);
        Ok(())
    }
}

impl ItineraryRepository for MemoryItineraryRepository {
    fn get_parent(&self, id: ActivityId) -> RepoResult<ScheduledActivity> {
        self.activities
            .get(&id)
            .cloned()
            .ok_or(RepoError::NotFound(id))
    }

    fn list_children(&self, parent_id: ActivityId) -> RepoResult<Vec<PackingUnit>> {
        if !self.activities.contains_key(&parent_id) {
            return Err(RepoError::NotFound(parent_id));
        }

        Ok(self
            .units
            .iter()
            .rev()
            .filter(|unit| unit.parent_id == parent_id)
            .cloned()
            .collect())
    }
}
