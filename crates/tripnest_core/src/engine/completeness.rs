//! Packing-unit completeness predicate and summary.

use crate::model::packing_unit::PackingUnit;
use serde::{Deserialize, Serialize};

/// Aggregate completeness of an activity's packing units.
///
/// Derived on every read and never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildSummary {
    pub total: usize,
    pub with_contents: usize,
}

impl ChildSummary {
    pub fn new(total: usize, with_contents: usize) -> Self {
        Self {
            total,
            with_contents,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// Returns whether a unit holds usable contents.
pub fn has_valid_contents(unit: &PackingUnit) -> bool {
    !unit.items.is_empty()
}

/// Counts units and units holding usable contents.
pub fn summarize<'a, I>(units: I) -> ChildSummary
where
    I: IntoIterator<Item = &'a PackingUnit>,
{
    units
        .into_iter()
        .fold(ChildSummary::default(), |mut summary, unit| {
            summary.total += 1;
            if has_valid_contents(unit) {
                summary.with_contents += 1;
            }
            summary
        })
}
