// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Logical outcomes of coordination operations
//!
//! Expected results, including conflicts, are values rather than errors.
//! Each outcome maps onto an HTTP-like status class for the caller.

use crate::model::{EventRecord, HolderId, Voucher};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Status class of an outcome
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Success,
    /// Caller does not own the lease
    OwnershipConflict,
    NotFound,
    /// Quota, expiry or use-once conflict
    Conflict,
}

impl OutcomeStatus {
    pub fn code(self) -> u16 {
        match self {
            OutcomeStatus::Success => 200,
            OutcomeStatus::OwnershipConflict => 403,
            OutcomeStatus::NotFound => 404,
            OutcomeStatus::Conflict => 409,
        }
    }

    pub fn is_success(self) -> bool {
        self == OutcomeStatus::Success
    }
}

/// Common view over all outcome enums
pub trait Outcome {
    fn status(&self) -> OutcomeStatus;

    /// Short machine-readable label, e.g. `held_by_other`
    fn label(&self) -> &'static str;
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AcquireOutcome {
    Acquired {
        expires_at: DateTime<Utc>,
    },
    /// Caller already holds a live lease; its expiry is unchanged
    AlreadyHeldBySelf {
        expires_at: DateTime<Utc>,
    },
    /// Advisory: the holder observed by a diagnostic read
    HeldByOther {
        holder: HolderId,
        expires_at: DateTime<Utc>,
    },
    NotFound,
}

impl Outcome for AcquireOutcome {
    fn status(&self) -> OutcomeStatus {
        match self {
            AcquireOutcome::Acquired { .. } | AcquireOutcome::AlreadyHeldBySelf { .. } => {
                OutcomeStatus::Success
            }
            AcquireOutcome::HeldByOther { .. } => OutcomeStatus::OwnershipConflict,
            AcquireOutcome::NotFound => OutcomeStatus::NotFound,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            AcquireOutcome::Acquired { .. } => "acquired",
            AcquireOutcome::AlreadyHeldBySelf { .. } => "already_held_by_self",
            AcquireOutcome::HeldByOther { .. } => "held_by_other",
            AcquireOutcome::NotFound => "not_found",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ReleaseOutcome {
    Released,
    /// Expiry of whatever lease is currently recorded, if any
    NotHolder {
        expires_at: Option<DateTime<Utc>>,
    },
    NotFound,
}

impl Outcome for ReleaseOutcome {
    fn status(&self) -> OutcomeStatus {
        match self {
            ReleaseOutcome::Released => OutcomeStatus::Success,
            ReleaseOutcome::NotHolder { .. } => OutcomeStatus::OwnershipConflict,
            ReleaseOutcome::NotFound => OutcomeStatus::NotFound,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ReleaseOutcome::Released => "released",
            ReleaseOutcome::NotHolder { .. } => "not_holder",
            ReleaseOutcome::NotFound => "not_found",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ExtendOutcome {
    Extended {
        expires_at: DateTime<Utc>,
    },
    NotHolder,
    /// Caller's lease lapsed; it must acquire again
    Expired,
    NotFound,
}

impl Outcome for ExtendOutcome {
    fn status(&self) -> OutcomeStatus {
        match self {
            ExtendOutcome::Extended { .. } => OutcomeStatus::Success,
            ExtendOutcome::NotHolder => OutcomeStatus::OwnershipConflict,
            ExtendOutcome::Expired => OutcomeStatus::Conflict,
            ExtendOutcome::NotFound => OutcomeStatus::NotFound,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ExtendOutcome::Extended { .. } => "extended",
            ExtendOutcome::NotHolder => "not_holder",
            ExtendOutcome::Expired => "expired",
            ExtendOutcome::NotFound => "not_found",
        }
    }
}

/// Read-only view of an event's lease
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LeaseStatus {
    Unlocked,
    Held {
        holder: HolderId,
        expires_at: DateTime<Utc>,
    },
    /// Lease has expired but nobody has reclaimed it yet
    Lapsed {
        holder: HolderId,
        expires_at: DateTime<Utc>,
    },
    NotFound,
}

impl Outcome for LeaseStatus {
    fn status(&self) -> OutcomeStatus {
        match self {
            LeaseStatus::NotFound => OutcomeStatus::NotFound,
            _ => OutcomeStatus::Success,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            LeaseStatus::Unlocked => "unlocked",
            LeaseStatus::Held { .. } => "held",
            LeaseStatus::Lapsed { .. } => "lapsed",
            LeaseStatus::NotFound => "not_found",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum IssueOutcome {
    Issued { voucher: Voucher },
    /// Quota reached, or the event is inactive
    CapacityExhausted,
    NotFound,
}

impl Outcome for IssueOutcome {
    fn status(&self) -> OutcomeStatus {
        match self {
            IssueOutcome::Issued { .. } => OutcomeStatus::Success,
            IssueOutcome::CapacityExhausted => OutcomeStatus::Conflict,
            IssueOutcome::NotFound => OutcomeStatus::NotFound,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            IssueOutcome::Issued { .. } => "issued",
            IssueOutcome::CapacityExhausted => "capacity_exhausted",
            IssueOutcome::NotFound => "not_found",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MarkUsedOutcome {
    Used { voucher: Voucher },
    AlreadyUsed,
    NotFound,
}

impl Outcome for MarkUsedOutcome {
    fn status(&self) -> OutcomeStatus {
        match self {
            MarkUsedOutcome::Used { .. } => OutcomeStatus::Success,
            MarkUsedOutcome::AlreadyUsed => OutcomeStatus::Conflict,
            MarkUsedOutcome::NotFound => OutcomeStatus::NotFound,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            MarkUsedOutcome::Used { .. } => "used",
            MarkUsedOutcome::AlreadyUsed => "already_used",
            MarkUsedOutcome::NotFound => "not_found",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum UpdateOutcome {
    Updated { event: EventRecord },
    /// Requested capacity is below the number already issued
    BelowIssued { issued: u32 },
    NotFound,
}

impl Outcome for UpdateOutcome {
    fn status(&self) -> OutcomeStatus {
        match self {
            UpdateOutcome::Updated { .. } => OutcomeStatus::Success,
            UpdateOutcome::BelowIssued { .. } => OutcomeStatus::Conflict,
            UpdateOutcome::NotFound => OutcomeStatus::NotFound,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            UpdateOutcome::Updated { .. } => "updated",
            UpdateOutcome::BelowIssued { .. } => "below_issued",
            UpdateOutcome::NotFound => "not_found",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DeleteOutcome {
    Deleted { vouchers_removed: usize },
    NotFound,
}

impl Outcome for DeleteOutcome {
    fn status(&self) -> OutcomeStatus {
        match self {
            DeleteOutcome::Deleted { .. } => OutcomeStatus::Success,
            DeleteOutcome::NotFound => OutcomeStatus::NotFound,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            DeleteOutcome::Deleted { .. } => "deleted",
            DeleteOutcome::NotFound => "not_found",
        }
    }
}

#[cfg(test)]
#[path = "outcome_tests.rs"]
mod tests;
