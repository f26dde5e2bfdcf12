//! Core domain logic for TripNest.
//! This crate is the single source of truth for itinerary status and
//! mutation permissions.

pub mod clock;
pub mod engine;
pub mod logging;
pub mod model;
pub mod repo;
pub mod schedule;
pub mod service;

pub use clock::{Clock, FixedClock, SystemClock};
pub use engine::completeness::{has_valid_contents, summarize, ChildSummary};
pub use engine::permission::{resolve_permissions, Mutation, PermissionDenied, PermissionVector};
pub use engine::recovery::{
    FlowStep, FollowUp, LeaveOutcome, LeaveRequest, RecoveryGate, SharedRecoveryGate,
    RECOVERY_BLOCKED_MESSAGE,
};
pub use engine::status::{resolve_status, FailureReason, ItineraryStatus, StatusResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::activity::{ActivityId, ActivityKind, ScheduledActivity};
pub use model::packing_unit::{PackingUnit, UnitId};
pub use repo::contents::{normalize_contents, parse_raw_contents};
pub use repo::itinerary_repo::{
    ItineraryRepository, MemoryItineraryRepository, RepoError, RepoResult,
};
pub use schedule::date_parser::{parse_date, start_of_day, ParsedDate};
pub use service::itinerary_service::{ItineraryService, ItineraryServiceError, ItineraryView};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
