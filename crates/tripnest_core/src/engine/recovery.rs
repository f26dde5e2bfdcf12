//! On-the-day recovery gate.
//!
//! # Responsibility
//! - Hold the "add at least one packing unit before leaving" requirement for
//!   an activity that failed on its own scheduled day.
//! - Decide whether a leave attempt proceeds or is intercepted.
//!
//! # Invariants
//! - The gate is required only for `Failed` observed on the scheduled day.
//! - `satisfied` starts `false`, flips once on the first committed child and
//!   never resets within a session.
//! - "Add another" resets the input form, never the gate.

use crate::engine::status::StatusResult;
use log::info;
use std::sync::atomic::{AtomicBool, Ordering};

/// Message shown in place of an intercepted leave attempt.
pub const RECOVERY_BLOCKED_MESSAGE: &str =
    "This activity started today without packed items. Add at least one packing unit with contents before leaving.";

/// How the user tried to leave the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveRequest {
    /// Explicit back action.
    Back,
    /// Navigation triggered by the app.
    Programmatic,
}

impl LeaveRequest {
    fn as_str(self) -> &'static str {
        match self {
            Self::Back => "back",
            Self::Programmatic => "programmatic",
        }
    }
}

/// Result of a leave attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveOutcome {
    Proceed,
    Blocked { message: &'static str },
}

impl LeaveOutcome {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Proceed)
    }
}

/// Choice offered once the gate is satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowUp {
    AddAnother,
    Finish,
}

/// What the flow does after a follow-up choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowStep {
    /// Clear the child input form and stay in the flow.
    ResetForm,
    /// Leave the flow.
    Exit,
    /// Leaving is not allowed yet.
    Blocked { message: &'static str },
}

/// Session-scoped recovery gate value.
///
/// Transitions take `self` and return the next value so the session owner
/// threads the state explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecoveryGate {
    required: bool,
    satisfied: bool,
}

impl RecoveryGate {
    /// Opens a gate for one screen session.
    pub fn for_status(result: &StatusResult) -> Self {
        Self {
            required: result.is_recoverable_failure(),
            satisfied: false,
        }
    }

    /// A gate that never intercepts anything.
    pub fn not_required() -> Self {
        Self {
            required: false,
            satisfied: false,
        }
    }

    /// Rebuilds a gate value handed back by a host that threads it across calls.
    ///
    /// The host owns monotonicity across calls: it must hand back the latest
    /// value it received, never an older one with `satisfied == false`.
    /// Every transition here preserves a `satisfied == true` input.
    pub fn from_parts(required: bool, satisfied: bool) -> Self {
        Self {
            required,
            satisfied,
        }
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_satisfied(&self) -> bool {
        self.satisfied
    }

    /// Whether leave attempts are currently intercepted.
    pub fn is_blocking(&self) -> bool {
        self.required && !self.satisfied
    }

    /// Records one successfully committed child.
    pub fn child_committed(self) -> Self {
        if !self.satisfied {
            info!(
                "event=recovery_gate module=engine status=satisfied required={}",
                self.required
            );
        }
        Self {
            satisfied: true,
            ..self
        }
    }

    /// Decides whether a leave attempt proceeds.
    pub fn request_leave(&self, request: LeaveRequest) -> LeaveOutcome {
        if self.is_blocking() {
            info!(
                "event=recovery_gate module=engine status=blocked request={}",
                request.as_str()
            );
            return LeaveOutcome::Blocked {
                message: RECOVERY_BLOCKED_MESSAGE,
            };
        }
        LeaveOutcome::Proceed
    }

    /// Whether the "add another / finish" choice is offered.
    pub fn offers_follow_up(&self) -> bool {
        self.required && self.satisfied
    }

    /// Applies a follow-up choice.
    ///
    /// `Finish` goes through the same interception as any leave attempt.
    pub fn follow_up(&self, choice: FollowUp) -> FlowStep {
        match choice {
            FollowUp::AddAnother => FlowStep::ResetForm,
            FollowUp::Finish => match self.request_leave(LeaveRequest::Programmatic) {
                LeaveOutcome::Proceed => FlowStep::Exit,
                LeaveOutcome::Blocked { message } => FlowStep::Blocked { message },
            },
        }
    }
}

/// Recovery gate shared between concurrent child-commit paths.
///
/// `satisfied` is set with a single compare-and-swap so no transition is lost.
#[derive(Debug)]
pub struct SharedRecoveryGate {
    required: bool,
    satisfied: AtomicBool,
}

impl SharedRecoveryGate {
    pub fn new(gate: RecoveryGate) -> Self {
        Self {
            required: gate.required,
            satisfied: AtomicBool::new(gate.satisfied),
        }
    }

    /// Records one committed child.
    ///
    /// Returns `true` only for the call that performed the transition.
    pub fn child_committed(&self) -> bool {
        let transitioned = self
            .satisfied
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if transitioned {
            info!(
                "event=recovery_gate module=engine status=satisfied required={} shared=true",
                self.required
            );
        }
        transitioned
    }

    /// Current value of the gate.
    pub fn snapshot(&self) -> RecoveryGate {
        RecoveryGate {
            required: self.required,
            satisfied: self.satisfied.load(Ordering::Acquire),
        }
    }

    pub fn request_leave(&self, request: LeaveRequest) -> LeaveOutcome {
        self.snapshot().request_leave(request)
    }
}
