// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Faults raised by coordination operations
//!
//! Logical outcomes are never errors; see [`super::outcome`].

use crate::store::StoreError;
use chrono::{DateTime, Utc};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoordinationError {
    /// Store fault, propagated unchanged
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Every candidate voucher code collided; the issuance was rolled back
    #[error("no unique voucher code after {attempts} attempts")]
    CodeSpaceExhausted { attempts: u32 },

    /// The lease kept changing between the conditional update and the
    /// diagnostic read; safe to retry
    #[error("lease on {event_id} changed during {operation}; retry")]
    Contended {
        event_id: String,
        operation: &'static str,
    },

    /// `now + lease_duration` is not representable
    #[error("lease of {duration:?} from {now} overflows the clock")]
    LeaseOutOfRange {
        now: DateTime<Utc>,
        duration: Duration,
    },

    /// Stored state broke a coordination invariant. This is a defect.
    #[error("invariant violated on event {event_id}: {detail}")]
    InvariantViolation { event_id: String, detail: String },
}
