// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for CLI commands

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::fmt;
use tix_core::{EventRecord, Outcome, OutcomeStatus, Voucher};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Print an outcome (text summary or tagged JSON) and return its status class
pub fn outcome<O: Outcome + Serialize>(
    outcome: &O,
    text: impl fmt::Display,
    format: OutputFormat,
) -> anyhow::Result<OutcomeStatus> {
    match format {
        OutputFormat::Text => println!("{}", text),
        OutputFormat::Json => println!("{}", serde_json::to_string(outcome)?),
    }
    Ok(outcome.status())
}

/// Print output in the specified format
pub fn print<T: Serialize + fmt::Display>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => println!("{}", value),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(())
}

/// Print a list of items
pub fn print_list<T: Serialize + fmt::Display>(
    items: &[T],
    empty: &str,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text if items.is_empty() => println!("{}", empty),
        OutputFormat::Text => {
            for item in items {
                println!("{}", item);
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(items)?),
    }
    Ok(())
}

/// Process exit code for an outcome class
pub fn exit_code(status: OutcomeStatus) -> u8 {
    match status {
        OutcomeStatus::Success => 0,
        OutcomeStatus::OwnershipConflict => 3,
        OutcomeStatus::NotFound => 4,
        OutcomeStatus::Conflict => 5,
    }
}

pub fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// One row of `tix event list`
#[derive(Serialize)]
pub struct EventRow<'a>(&'a EventRecord);

impl<'a> From<&'a EventRecord> for EventRow<'a> {
    fn from(event: &'a EventRecord) -> Self {
        Self(event)
    }
}

impl fmt::Display for EventRow<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let e = self.0;
        let lock = e.holder().map_or("-", |h| h.as_str());
        write!(
            f,
            "{:<38} {:<24} {:>5}/{:<5} {:<8} {}",
            e.id,
            truncate(&e.name, 24),
            e.issued_count,
            e.capacity,
            if e.active { "active" } else { "inactive" },
            lock
        )
    }
}

/// Multi-line detail view of an event
#[derive(Serialize)]
pub struct EventDetail<'a>(&'a EventRecord);

impl<'a> From<&'a EventRecord> for EventDetail<'a> {
    fn from(event: &'a EventRecord) -> Self {
        Self(event)
    }
}

impl fmt::Display for EventDetail<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let e = self.0;
        writeln!(f, "Event: {}", e.id)?;
        writeln!(f, "  Name: {}", e.name)?;
        writeln!(f, "  Issued: {}/{}", e.issued_count, e.capacity)?;
        writeln!(f, "  Active: {}", e.active)?;
        match &e.lease {
            Some(lease) => write!(
                f,
                "  Lease: {} until {}",
                lease.holder,
                timestamp(lease.expires_at)
            ),
            None => write!(f, "  Lease: none"),
        }
    }
}

/// One row of a voucher listing
#[derive(Serialize)]
pub struct VoucherRow<'a>(&'a Voucher);

impl<'a> From<&'a Voucher> for VoucherRow<'a> {
    fn from(voucher: &'a Voucher) -> Self {
        Self(voucher)
    }
}

impl fmt::Display for VoucherRow<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        write!(
            f,
            "{:<38} {:<12} {:<24} {}",
            v.id,
            v.code,
            truncate(&v.recipient, 24),
            match v.used_at {
                Some(at) => format!("used {}", timestamp(at)),
                None => "unused".to_string(),
            }
        )
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
