// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Coordination primitives over a shared store
//!
//! This module provides:
//! - **LeaseManager** - Exclusive, time-bounded edit leases on events
//! - **Allocator** - Quota-bounded voucher issuance with all-or-nothing commit
//! - **Catalog** - Administrative event edits that respect the quota
//! - **Coordinator** - One handle over all three

pub mod allocator;
pub mod catalog;
pub mod error;
pub mod lease;
pub mod manager;
pub mod outcome;

pub use allocator::{Allocator, MAX_CODE_ATTEMPTS};
pub use catalog::Catalog;
pub use error::CoordinationError;
pub use lease::LeaseManager;
pub use manager::{Coordinator, SystemCoordinator};
pub use outcome::{
    AcquireOutcome, DeleteOutcome, ExtendOutcome, IssueOutcome, LeaseStatus, MarkUsedOutcome,
    Outcome, OutcomeStatus, ReleaseOutcome, UpdateOutcome,
};
