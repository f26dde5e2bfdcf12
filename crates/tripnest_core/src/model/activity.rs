//! Scheduled activity domain model.
//!
//! # Responsibility
//! - Define the parent record (trip or relocation) owning packing units.
//! - Carry the schedule window exactly as the date parser produced it.
//!
//! # Invariants
//! - `id` is stable and never reused for another activity.
//! - `start_date == None` means "never entered"; `Some(ParsedDate::Invalid)`
//!   means "entered but unparseable". Both resolve to a planned status.
//! - `requires_child_completeness` defaults from `kind` but may be overridden.

use crate::schedule::date_parser::{parse_date, ParsedDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a scheduled activity.
pub type ActivityId = Uuid;

/// Category of a scheduled activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    /// Time-bound journey with luggage.
    Trip,
    /// Move between homes whose outcome depends on packed boxes.
    Relocation,
}

impl ActivityKind {
    /// Whether this kind's outcome depends on packing-unit completeness.
    ///
    /// Only relocations are judged by their packed boxes.
    pub fn requires_child_completeness(self) -> bool {
        match self {
            Self::Trip => false,
            Self::Relocation => true,
        }
    }

    /// Stable lowercase label used by logs and host bindings.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trip => "trip",
            Self::Relocation => "relocation",
        }
    }

    /// Parses a stable label back into a kind.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "trip" => Some(Self::Trip),
            "relocation" => Some(Self::Relocation),
            _ => None,
        }
    }
}

/// Parent record evaluated by the status engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledActivity {
    pub id: ActivityId,
    pub kind: ActivityKind,
    /// First scheduled day.
    pub start_date: Option<ParsedDate>,
    /// Last scheduled day, open-ended when absent.
    pub end_date: Option<ParsedDate>,
    pub requires_child_completeness: bool,
}

impl ScheduledActivity {
    /// Creates an unscheduled activity with a generated ID.
    pub fn new(kind: ActivityKind) -> Self {
        Self::with_id(Uuid::new_v4(), kind)
    }

    /// Creates an unscheduled activity with a caller-provided ID.
    ///
    /// Used by repository paths where identity already exists.
    pub fn with_id(id: ActivityId, kind: ActivityKind) -> Self {
        Self {
            id,
            kind,
            start_date: None,
            end_date: None,
            requires_child_completeness: kind.requires_child_completeness(),
        }
    }

    /// Sets the schedule window from user-entered text.
    ///
    /// Blank text is treated as "not entered" rather than invalid.
    pub fn with_schedule(mut self, start: Option<&str>, end: Option<&str>) -> Self {
        self.start_date = start.and_then(parse_entered_date);
        self.end_date = end.and_then(parse_entered_date);
        self
    }

    /// Overrides the kind-derived completeness requirement.
    pub fn with_child_completeness(mut self, required: bool) -> Self {
        self.requires_child_completeness = required;
        self
    }

    /// Returns whether a start date was entered, valid or not.
    pub fn is_scheduled(&self) -> bool {
        self.start_date.is_some()
    }
}

fn parse_entered_date(text: &str) -> Option<ParsedDate> {
    if text.trim().is_empty() {
        return None;
    }
    Some(parse_date(text))
}
