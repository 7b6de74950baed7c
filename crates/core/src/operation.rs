// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Operations produced by committed transactions and persisted to the WAL
//!
//! Every write carries the full post-write record, so replaying a log is
//! idempotent and never re-evaluates a predicate.

use crate::model::{EventRecord, Voucher};
use serde::{Deserialize, Serialize};

/// A single committed write
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    /// Create or overwrite an event record
    EventPut { event: EventRecord },

    /// Delete an event record
    EventDelete { id: String },

    /// Create or overwrite a voucher record
    VoucherPut { voucher: Voucher },

    /// Delete a voucher record
    VoucherDelete { id: String },
}

impl Operation {
    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Operation::EventPut { .. } => "event:put",
            Operation::EventDelete { .. } => "event:delete",
            Operation::VoucherPut { .. } => "voucher:put",
            Operation::VoucherDelete { .. } => "voucher:delete",
        }
    }
}

#[cfg(test)]
#[path = "operation_tests.rs"]
mod tests;
