//! Itinerary use-case service.
//!
//! # Responsibility
//! - Fetch an activity and its packing units, then evaluate status and
//!   permissions at the clock's current instant.
//! - Gate one mutation against the freshly evaluated permissions.
//!
//! # Invariants
//! - Every call re-reads the repository and re-evaluates; nothing is cached.
//! - A failed child fetch is surfaced as an error. It is never replaced by an
//!   empty summary, which would bias completeness-requiring activities toward
//!   a spurious failure.

use crate::clock::Clock;
use crate::engine::completeness::{summarize, ChildSummary};
use crate::engine::permission::{
    resolve_permissions, Mutation, PermissionDenied, PermissionVector,
};
use crate::engine::recovery::RecoveryGate;
use crate::engine::status::{resolve_status, StatusResult};
use crate::model::activity::{ActivityId, ScheduledActivity};
use crate::model::packing_unit::PackingUnit;
use crate::repo::itinerary_repo::{ItineraryRepository, RepoError};
use chrono::NaiveDateTime;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Service error for itinerary use-cases.
#[derive(Debug)]
pub enum ItineraryServiceError {
    /// Target activity does not exist.
    ActivityNotFound(ActivityId),
    /// Backing store failed to answer.
    Repo(RepoError),
    /// Mutation is not allowed in the current status.
    Denied(PermissionDenied),
}

impl Display for ItineraryServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ActivityNotFound(id) => write!(f, "activity not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Denied(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ItineraryServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ActivityNotFound(_) => None,
            Self::Repo(err) => Some(err),
            Self::Denied(err) => Some(err),
        }
    }
}

impl From<RepoError> for ItineraryServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::ActivityNotFound(id),
            other => Self::Repo(other),
        }
    }
}

impl From<PermissionDenied> for ItineraryServiceError {
    fn from(value: PermissionDenied) -> Self {
        Self::Denied(value)
    }
}

/// One evaluated read of an activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItineraryView {
    pub activity: ScheduledActivity,
    /// Units most-recent-first, as listed by the repository.
    pub units: Vec<PackingUnit>,
    pub summary: ChildSummary,
    pub status: StatusResult,
    pub permissions: PermissionVector,
}

impl ItineraryView {
    /// Evaluates an already-fetched activity and its units at `now`.
    pub fn evaluate(
        activity: ScheduledActivity,
        units: Vec<PackingUnit>,
        now: NaiveDateTime,
    ) -> Self {
        let summary = summarize(&units);
        let status = resolve_status(&activity, summary, now);
        let permissions = resolve_permissions(&status);
        Self {
            activity,
            units,
            summary,
            status,
            permissions,
        }
    }

    /// Opens a recovery gate for a screen session on this view.
    pub fn recovery_gate(&self) -> RecoveryGate {
        RecoveryGate::for_status(&self.status)
    }
}

/// Itinerary service facade over a repository and a clock.
pub struct ItineraryService<R: ItineraryRepository, C: Clock> {
    repo: R,
    clock: C,
}

impl<R: ItineraryRepository, C: Clock> ItineraryService<R, C> {
    pub fn new(repo: R, clock: C) -> Self {
        Self { repo, clock }
    }

    /// Reads and evaluates one activity.
    pub fn evaluate(&self, id: ActivityId) -> Result<ItineraryView, ItineraryServiceError> {
        let started_at = Instant::now();
        let result = self.fetch_and_evaluate(id);
        match &result {
            Ok(view) => info!(
                "event=itinerary_evaluate module=service status=ok kind={} result={} on_day={} total={} with_contents={} duration_ms={}",
                view.activity.kind.as_str(),
                view.status.status.as_str(),
                view.status.on_exact_scheduled_day,
                view.summary.total,
                view.summary.with_contents,
                started_at.elapsed().as_millis()
            ),
            Err(err) => warn!(
                "event=itinerary_evaluate module=service status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }

    /// Evaluates an activity and checks that `mutation` is currently allowed.
    ///
    /// Returns the evaluated view so callers can proceed with the mutation.
    pub fn authorize(
        &self,
        id: ActivityId,
        mutation: Mutation,
    ) -> Result<ItineraryView, ItineraryServiceError> {
        let view = self.evaluate(id)?;
        if let Err(denied) = view.permissions.check(mutation, view.status.status) {
            info!(
                "event=mutation_authorize module=service status=denied mutation={} result={}",
                mutation.as_str(),
                view.status.status.as_str()
            );
            return Err(denied.into());
        }
        Ok(view)
    }

    fn fetch_and_evaluate(&self, id: ActivityId) -> Result<ItineraryView, ItineraryServiceError> {
        let activity = self.repo.get_parent(id)?;
        let units = self.repo.list_children(id)?;
        Ok(ItineraryView::evaluate(activity, units, self.clock.now()))
    }
}
