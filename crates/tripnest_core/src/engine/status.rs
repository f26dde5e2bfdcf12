//! Lifecycle status resolver.
//!
//! # Responsibility
//! - Decide an activity's lifecycle status from its schedule window, its
//!   completeness requirement, its child summary and the current instant.
//!
//! # Invariants
//! - The result depends only on the arguments; there is no memory of earlier
//!   evaluations, so no status is terminal.
//! - Calendar-day comparisons use `now.date()`; datetime comparisons use the
//!   first instant of the scheduled day. The two are never interchanged.
//! - A missing or unparseable start date always yields `Planned`.

use crate::engine::completeness::ChildSummary;
use crate::model::activity::ScheduledActivity;
use crate::schedule::date_parser::start_of_day;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Why a completeness-requiring activity failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// No packing units exist at all.
    NoneAtAll,
    /// Units exist but none holds contents.
    EmptyUnits,
}

impl FailureReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoneAtAll => "none_at_all",
            Self::EmptyUnits => "empty_units",
        }
    }
}

/// Discrete lifecycle status of a scheduled activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItineraryStatus {
    Planned,
    Pending,
    InProgress,
    Completed,
    Failed(FailureReason),
}

impl ItineraryStatus {
    /// Stable label used by logs and host bindings.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Failed(_) => "failed",
        }
    }

    pub fn is_failed(self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Status plus the temporal branch it was decided on.
///
/// `on_exact_scheduled_day` is load-bearing: permissions for `Failed` differ
/// depending on whether the failure was seen on the scheduled day itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatusResult {
    pub status: ItineraryStatus,
    pub on_exact_scheduled_day: bool,
}

impl StatusResult {
    fn off_day(status: ItineraryStatus) -> Self {
        Self {
            status,
            on_exact_scheduled_day: false,
        }
    }

    fn on_day(status: ItineraryStatus) -> Self {
        Self {
            status,
            on_exact_scheduled_day: true,
        }
    }

    /// Failure reason when the status is `Failed`.
    pub fn failure_reason(&self) -> Option<FailureReason> {
        match self.status {
            ItineraryStatus::Failed(reason) => Some(reason),
            _ => None,
        }
    }

    /// Whether the failure was observed on the scheduled day and is recoverable.
    pub fn is_recoverable_failure(&self) -> bool {
        self.status.is_failed() && self.on_exact_scheduled_day
    }
}

/// Resolves the lifecycle status of one activity at `now`.
///
/// Rules are evaluated in order and the first match wins:
/// 1. no valid start date -> `Planned`
/// 2. completeness required and `now` is on the start day -> failure check,
///    else `InProgress`
/// 3. no completeness required and `now` inside `[start, end or open]` ->
///    `InProgress`
/// 4. `now` before the start instant -> `Pending`
/// 5. completeness required and `now` on a later day -> failure check, else
///    `Completed`
/// 6. no completeness required and `now` after a valid end -> `Completed`
/// 7. otherwise -> `InProgress`
pub fn resolve_status(
    activity: &ScheduledActivity,
    summary: ChildSummary,
    now: NaiveDateTime,
) -> StatusResult {
    let Some(start) = activity.start_date.and_then(|date| date.valid()) else {
        return StatusResult::off_day(ItineraryStatus::Planned);
    };
    let today = now.date();
    let start_at = start_of_day(start);
    let end_at = activity
        .end_date
        .and_then(|date| date.valid())
        .map(start_of_day);
    let requires_children = activity.requires_child_completeness;

    if requires_children && today == start {
        return StatusResult::on_day(judge_children(summary, ItineraryStatus::InProgress));
    }

    if !requires_children && now >= start_at && end_at.map_or(true, |end| now <= end) {
        return StatusResult::off_day(ItineraryStatus::InProgress);
    }

    if now < start_at {
        return StatusResult::off_day(ItineraryStatus::Pending);
    }

    if requires_children && today > start {
        return StatusResult::off_day(judge_children(summary, ItineraryStatus::Completed));
    }

    if let Some(end) = end_at.filter(|_| !requires_children) {
        if now > end {
            return StatusResult::off_day(ItineraryStatus::Completed);
        }
    }

    StatusResult::off_day(ItineraryStatus::InProgress)
}

fn judge_children(summary: ChildSummary, otherwise: ItineraryStatus) -> ItineraryStatus {
    if summary.total == 0 {
        ItineraryStatus::Failed(FailureReason::NoneAtAll)
    } else if summary.with_contents == 0 {
        ItineraryStatus::Failed(FailureReason::EmptyUnits)
    } else {
        otherwise
    }
}
