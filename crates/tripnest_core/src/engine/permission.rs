//! Mutation-permission resolver.
//!
//! # Responsibility
//! - Map a resolved status to the five guarded mutations.
//! - Give callers a `?`-friendly check for one mutation.
//!
//! # Invariants
//! - The vector depends on `StatusResult` alone.
//! - `InProgress` never permits anything.
//! - `Failed` is recoverable (children editable, parent kept) only when seen
//!   on the scheduled day; afterwards only deleting the parent is allowed.

use crate::engine::status::{ItineraryStatus, StatusResult};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Mutations gated by the permission vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mutation {
    EditParent,
    DeleteParent,
    AddChild,
    EditChild,
    DeleteChild,
}

impl Mutation {
    /// All mutations in vector order.
    pub const ALL: [Mutation; 5] = [
        Mutation::EditParent,
        Mutation::DeleteParent,
        Mutation::AddChild,
        Mutation::EditChild,
        Mutation::DeleteChild,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::EditParent => "edit_parent",
            Self::DeleteParent => "delete_parent",
            Self::AddChild => "add_child",
            Self::EditChild => "edit_child",
            Self::DeleteChild => "delete_child",
        }
    }
}

/// Which mutations are currently allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PermissionVector {
    pub can_edit_parent: bool,
    pub can_delete_parent: bool,
    pub can_add_child: bool,
    pub can_edit_child: bool,
    pub can_delete_child: bool,
}

impl PermissionVector {
    pub const ALL_ALLOWED: Self = Self::uniform(true);
    pub const NONE_ALLOWED: Self = Self::uniform(false);

    const fn uniform(allowed: bool) -> Self {
        Self {
            can_edit_parent: allowed,
            can_delete_parent: allowed,
            can_add_child: allowed,
            can_edit_child: allowed,
            can_delete_child: allowed,
        }
    }

    /// Parent may only be deleted.
    const DELETE_PARENT_ONLY: Self = Self {
        can_delete_parent: true,
        ..Self::NONE_ALLOWED
    };

    /// Parent is frozen but children stay editable.
    const CHILDREN_ONLY: Self = Self {
        can_add_child: true,
        can_edit_child: true,
        can_delete_child: true,
        ..Self::NONE_ALLOWED
    };

    pub fn allows(&self, mutation: Mutation) -> bool {
        match mutation {
            Mutation::EditParent => self.can_edit_parent,
            Mutation::DeleteParent => self.can_delete_parent,
            Mutation::AddChild => self.can_add_child,
            Mutation::EditChild => self.can_edit_child,
            Mutation::DeleteChild => self.can_delete_child,
        }
    }

    /// Returns `Ok(())` when `mutation` is allowed for `status`.
    pub fn check(
        &self,
        mutation: Mutation,
        status: ItineraryStatus,
    ) -> Result<(), PermissionDenied> {
        if self.allows(mutation) {
            Ok(())
        } else {
            Err(PermissionDenied { mutation, status })
        }
    }

    /// Returns whether any mutation is allowed.
    pub fn any(&self) -> bool {
        Mutation::ALL.iter().any(|mutation| self.allows(*mutation))
    }
}

/// A mutation was attempted while the status forbids it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermissionDenied {
    pub mutation: Mutation,
    pub status: ItineraryStatus,
}

impl Display for PermissionDenied {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "mutation `{}` is not permitted while activity is {}",
            self.mutation.as_str(),
            self.status.as_str()
        )
    }
}

impl Error for PermissionDenied {}

/// Resolves the permission vector for a status.
pub fn resolve_permissions(result: &StatusResult) -> PermissionVector {
    match result.status {
        ItineraryStatus::Planned | ItineraryStatus::Pending => PermissionVector::ALL_ALLOWED,
        ItineraryStatus::InProgress => PermissionVector::NONE_ALLOWED,
        ItineraryStatus::Completed => PermissionVector::DELETE_PARENT_ONLY,
        ItineraryStatus::Failed(_) if result.on_exact_scheduled_day => {
            PermissionVector::CHILDREN_ONLY
        }
        ItineraryStatus::Failed(_) => PermissionVector::DELETE_PARENT_ONLY,
    }
}
