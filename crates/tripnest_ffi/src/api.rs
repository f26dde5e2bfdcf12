//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the status/permission engine and the recovery gate to Dart via FRB.
//! - Flatten core types into envelopes with stable string labels.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - The recovery gate value is owned by the caller and passed back on every
//!   transition; nothing here keeps session state.

use chrono::{DateTime, Local, NaiveDateTime};
use log::warn;
use tripnest_core::{
    core_version as core_version_inner, init_logging as init_logging_inner,
    parse_raw_contents, ping as ping_inner, ActivityKind, Clock, FixedClock, FlowStep, FollowUp,
    ItineraryService, ItineraryView, LeaveOutcome, LeaveRequest, MemoryItineraryRepository,
    RecoveryGate, ScheduledActivity, SystemClock,
};

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Mutation permissions for one evaluated activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermissionFlags {
    pub can_edit_parent: bool,
    pub can_delete_parent: bool,
    pub can_add_child: bool,
    pub can_edit_child: bool,
    pub can_delete_child: bool,
}

/// Evaluation envelope for one activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItineraryStatusResponse {
    /// Whether evaluation ran. `false` only for malformed input.
    pub ok: bool,
    /// `planned|pending|in_progress|completed|failed`.
    pub status: String,
    /// `none_at_all|empty_units` when `status == "failed"`.
    pub failure_reason: Option<String>,
    pub on_exact_scheduled_day: bool,
    /// Whether the screen must open a recovery gate.
    pub recovery_required: bool,
    pub permissions: PermissionFlags,
    pub total_units: u32,
    pub units_with_contents: u32,
    /// Human-readable message for diagnostics.
    pub message: String,
}

impl ItineraryStatusResponse {
    fn from_view(view: &ItineraryView) -> Self {
        let permissions = view.permissions;
        Self {
            ok: true,
            status: view.status.status.as_str().to_string(),
            failure_reason: view
                .status
                .failure_reason()
                .map(|reason| reason.as_str().to_string()),
            on_exact_scheduled_day: view.status.on_exact_scheduled_day,
            recovery_required: view.recovery_gate().is_required(),
            permissions: PermissionFlags {
                can_edit_parent: permissions.can_edit_parent,
                can_delete_parent: permissions.can_delete_parent,
                can_add_child: permissions.can_add_child,
                can_edit_child: permissions.can_edit_child,
                can_delete_child: permissions.can_delete_child,
            },
            total_units: saturating_u32(view.summary.total),
            units_with_contents: saturating_u32(view.summary.with_contents),
            message: String::new(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            status: String::new(),
            failure_reason: None,
            on_exact_scheduled_day: false,
            recovery_required: false,
            permissions: PermissionFlags {
                can_edit_parent: false,
                can_delete_parent: false,
                can_add_child: false,
                can_edit_child: false,
                can_delete_child: false,
            },
            total_units: 0,
            units_with_contents: 0,
            message: message.into(),
        }
    }
}

/// Evaluates status and permissions for one activity.
///
/// Input semantics:
/// - `kind`: `trip|relocation`.
/// - `start_date` / `end_date`: user-entered text; blank or `None` means not
///   entered, unparseable text evaluates as planned.
/// - `now_epoch_ms`: pinned instant, or `None` for the device clock.
/// - `children_contents_json`: one entry per packing unit, raw contents as
///   JSON (list, string or map); non-JSON text is read as free text.
///
/// # FFI contract
/// - Sync call, pure computation.
/// - Never panics; malformed `kind` or `now_epoch_ms` yields `ok = false`.
#[flutter_rust_bridge::frb(sync)]
pub fn evaluate_itinerary(
    kind: String,
    start_date: Option<String>,
    end_date: Option<String>,
    now_epoch_ms: Option<i64>,
    children_contents_json: Vec<String>,
) -> ItineraryStatusResponse {
    let Some(kind) = ActivityKind::parse(kind.as_str()) else {
        warn!("event=ffi_evaluate module=ffi status=error error_code=invalid_kind");
        return ItineraryStatusResponse::failure(format!("unsupported activity kind `{kind}`"));
    };

    let activity = ScheduledActivity::new(kind)
        .with_schedule(start_date.as_deref(), end_date.as_deref());
    let mut repo = MemoryItineraryRepository::new();
    let activity_id = repo.upsert_activity(activity);
    for raw in &children_contents_json {
        if let Err(err) = repo.add_unit(activity_id, &parse_raw_contents(raw)) {
            return ItineraryStatusResponse::failure(format!("evaluate_itinerary failed: {err}"));
        }
    }

    let result = match now_epoch_ms {
        Some(epoch_ms) => match local_datetime_from_epoch_ms(epoch_ms) {
            Some(now) => evaluate_with_clock(&repo, activity_id, FixedClock(now)),
            None => {
                warn!("event=ffi_evaluate module=ffi status=error error_code=invalid_now");
                return ItineraryStatusResponse::failure(format!(
                    "now_epoch_ms out of range: {epoch_ms}"
                ));
            }
        },
        None => evaluate_with_clock(&repo, activity_id, SystemClock),
    };

    match result {
        Ok(view) => ItineraryStatusResponse::from_view(&view),
        Err(err) => ItineraryStatusResponse::failure(format!("evaluate_itinerary failed: {err}")),
    }
}

/// Recovery gate value threaded through one screen session by the host.
///
/// The host owns this value and must always pass back the latest one it
/// received. No call here turns `satisfied` from `true` back to `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecoveryGateState {
    pub required: bool,
    pub satisfied: bool,
}

impl From<RecoveryGate> for RecoveryGateState {
    fn from(value: RecoveryGate) -> Self {
        Self {
            required: value.is_required(),
            satisfied: value.is_satisfied(),
        }
    }
}

impl From<RecoveryGateState> for RecoveryGate {
    fn from(value: RecoveryGateState) -> Self {
        RecoveryGate::from_parts(value.required, value.satisfied)
    }
}

/// Outcome of a leave attempt or follow-up choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateStepResponse {
    /// `proceed|blocked` for leave attempts, `reset_form|exit|blocked` for
    /// follow-up choices.
    pub step: String,
    /// Explanation shown instead of leaving; empty unless blocked.
    pub message: String,
}

impl GateStepResponse {
    fn new(step: &str, message: &str) -> Self {
        Self {
            step: step.to_string(),
            message: message.to_string(),
        }
    }
}

/// Opens a recovery gate for a new screen session.
///
/// Pass `ItineraryStatusResponse::recovery_required`.
#[flutter_rust_bridge::frb(sync)]
pub fn recovery_gate_open(recovery_required: bool) -> RecoveryGateState {
    RecoveryGateState {
        required: recovery_required,
        satisfied: false,
    }
}

/// Records a successfully committed packing unit.
#[flutter_rust_bridge::frb(sync)]
pub fn recovery_gate_child_committed(state: RecoveryGateState) -> RecoveryGateState {
    RecoveryGate::from(state).child_committed().into()
}

/// Decides whether a back action (`programmatic = false`) or app-driven
/// navigation (`programmatic = true`) may leave the flow.
#[flutter_rust_bridge::frb(sync)]
pub fn recovery_gate_leave(state: RecoveryGateState, programmatic: bool) -> GateStepResponse {
    let request = if programmatic {
        LeaveRequest::Programmatic
    } else {
        LeaveRequest::Back
    };
    match RecoveryGate::from(state).request_leave(request) {
        LeaveOutcome::Proceed => GateStepResponse::new("proceed", ""),
        LeaveOutcome::Blocked { message } => GateStepResponse::new("blocked", message),
    }
}

/// Applies the "add another" (`add_another = true`) or "finish" choice.
#[flutter_rust_bridge::frb(sync)]
pub fn recovery_gate_follow_up(state: RecoveryGateState, add_another: bool) -> GateStepResponse {
    let choice = if add_another {
        FollowUp::AddAnother
    } else {
        FollowUp::Finish
    };
    match RecoveryGate::from(state).follow_up(choice) {
        FlowStep::ResetForm => GateStepResponse::new("reset_form", ""),
        FlowStep::Exit => GateStepResponse::new("exit", ""),
        FlowStep::Blocked { message } => GateStepResponse::new("blocked", message),
    }
}

fn evaluate_with_clock<C: Clock>(
    repo: &MemoryItineraryRepository,
    activity_id: tripnest_core::ActivityId,
    clock: C,
) -> Result<ItineraryView, tripnest_core::ItineraryServiceError> {
    ItineraryService::new(repo, clock).evaluate(activity_id)
}

fn local_datetime_from_epoch_ms(epoch_ms: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp_millis(epoch_ms).map(|utc| utc.with_timezone(&Local).naive_local())
}

fn saturating_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
