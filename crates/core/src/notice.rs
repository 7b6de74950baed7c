// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Post-commit notices and the fire-and-forget sink contract
//!
//! Notices are emitted only after a coordination operation has committed.
//! Sinks never report failure back to the core.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

/// Something that happened to an event or voucher
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    LeaseAcquired {
        event_id: String,
        holder: String,
        expires_at: DateTime<Utc>,
        /// Holder whose lapsed lease was taken over, if any
        reclaimed_from: Option<String>,
    },
    LeaseReleased {
        event_id: String,
        holder: String,
    },
    LeaseExtended {
        event_id: String,
        holder: String,
        expires_at: DateTime<Utc>,
    },
    VoucherIssued {
        event_id: String,
        voucher_id: String,
        code: String,
        recipient: String,
        remaining: u32,
    },
    VoucherUsed {
        event_id: String,
        voucher_id: String,
        code: String,
    },
    EventDeleted {
        event_id: String,
        vouchers_removed: usize,
    },
}

impl Notice {
    /// Colon-separated name used for pattern matching
    pub fn name(&self) -> &'static str {
        match self {
            Notice::LeaseAcquired { .. } => "lease:acquired",
            Notice::LeaseReleased { .. } => "lease:released",
            Notice::LeaseExtended { .. } => "lease:extended",
            Notice::VoucherIssued { .. } => "voucher:issued",
            Notice::VoucherUsed { .. } => "voucher:used",
            Notice::EventDeleted { .. } => "event:deleted",
        }
    }

    pub fn event_id(&self) -> &str {
        match self {
            Notice::LeaseAcquired { event_id, .. }
            | Notice::LeaseReleased { event_id, .. }
            | Notice::LeaseExtended { event_id, .. }
            | Notice::VoucherIssued { event_id, .. }
            | Notice::VoucherUsed { event_id, .. }
            | Notice::EventDeleted { event_id, .. } => event_id,
        }
    }
}

/// Receiver of post-commit notices.
///
/// `notify` must not block on delivery and has no way to fail: delivery
/// problems are the sink's to log.
pub trait NoticeSink: Clone + Send + Sync + 'static {
    fn notify(&self, notice: Notice);
}

/// Sink that drops every notice
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpSink;

impl NoticeSink for NoOpSink {
    fn notify(&self, _notice: Notice) {}
}

/// Sink that records notices in memory, for tests and diagnostics
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All notices received so far
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Names of all notices received so far
    pub fn names(&self) -> Vec<&'static str> {
        self.notices().iter().map(Notice::name).collect()
    }
}

impl NoticeSink for RecordingSink {
    fn notify(&self, notice: Notice) {
        self.notices
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(notice);
    }
}

/// Pattern for matching notice names
///
/// Supports:
///   - Exact match: "voucher:issued"
///   - Single wildcard: "lease:*" matches "lease:acquired", "lease:released"
///   - Everything: "*" or "**"
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoticePattern(String);

impl NoticePattern {
    pub fn new(pattern: &str) -> Self {
        Self(pattern.to_string())
    }

    /// Check if this pattern matches a notice name
    pub fn matches(&self, name: &str) -> bool {
        // Empty pattern matches nothing
        if self.0.is_empty() {
            return false;
        }

        if self.0 == "*" || self.0 == "**" {
            return true;
        }

        let pattern_parts: Vec<&str> = self.0.split(':').collect();
        let name_parts: Vec<&str> = name.split(':').collect();

        Self::match_segments(&pattern_parts, &name_parts)
    }

    fn match_segments(pattern: &[&str], name: &[&str]) -> bool {
        match (pattern.first(), name.first()) {
            (None, None) => true,
            (Some(&"**"), _) => true, // ** matches everything remaining
            (Some(&"*"), Some(_)) => Self::match_segments(&pattern[1..], &name[1..]),
            (Some(p), Some(n)) if *p == *n => Self::match_segments(&pattern[1..], &name[1..]),
            _ => false,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[path = "notice_tests.rs"]
mod tests;
