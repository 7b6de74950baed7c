// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Governed resources (events), their embedded leases, and issued vouchers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque identity of a caller, as supplied by upstream identity resolution
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HolderId(pub String);

impl HolderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for HolderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for HolderId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Time-bounded exclusive hold on an event.
///
/// Holder and expiry are stored together, so one is never set without the other.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lease {
    pub holder: HolderId,
    pub expires_at: DateTime<Utc>,
}

impl Lease {
    pub fn new(holder: HolderId, expires_at: DateTime<Utc>) -> Self {
        Self { holder, expires_at }
    }

    /// Another caller may take over the lease (expiry strictly in the past)
    pub fn is_reclaimable(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }

    /// The holder may still extend the lease (expiry strictly in the future)
    pub fn is_extendable(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }

    pub fn is_held_by(&self, holder: &HolderId) -> bool {
        &self.holder == holder
    }
}

/// An event: the governed resource carrying a voucher quota and an edit lease
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: String,
    pub name: String,
    /// Maximum number of vouchers that may ever be issued
    pub capacity: u32,
    /// Vouchers issued so far; only the allocator changes it
    pub issued_count: u32,
    /// Inactive events accept no new issuance
    pub active: bool,
    /// Current edit lease, if any (may be expired but not yet reclaimed)
    #[serde(default)]
    pub lease: Option<Lease>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EventRecord {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        capacity: u32,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            capacity,
            issued_count: 0,
            active: true,
            lease: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Remaining vouchers that may be issued
    pub fn remaining(&self) -> u32 {
        self.capacity.saturating_sub(self.issued_count)
    }

    /// Whether a new voucher may be issued right now
    pub fn can_issue(&self) -> bool {
        self.active && self.issued_count < self.capacity
    }

    /// Current lease holder, regardless of expiry
    pub fn holder(&self) -> Option<&HolderId> {
        self.lease.as_ref().map(|l| &l.holder)
    }

    /// Lock predicate for acquire: no lease, or the lease has lapsed
    pub fn is_lock_available(&self, now: DateTime<Utc>) -> bool {
        self.lease.as_ref().is_none_or(|l| l.is_reclaimable(now))
    }
}

/// A voucher issued against an event's quota
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voucher {
    pub id: String,
    pub event_id: String,
    /// Globally unique redemption code
    pub code: String,
    pub recipient: String,
    pub used: bool,
    pub issued_at: DateTime<Utc>,
    #[serde(default)]
    pub used_at: Option<DateTime<Utc>>,
}

impl Voucher {
    pub fn new(
        id: impl Into<String>,
        event_id: impl Into<String>,
        code: impl Into<String>,
        recipient: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            event_id: event_id.into(),
            code: code.into(),
            recipient: recipient.into(),
            used: false,
            issued_at: now,
            used_at: None,
        }
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
