// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Point-in-time state captures that let the log be cut short

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;
use thiserror::Error;
use tix_core::{EventRecord, MaterializedState, Operation, StoreError, Voucher};

/// Errors that can occur during snapshot operations
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid snapshot format: {0}")]
    InvalidFormat(String),
}

impl From<SnapshotError> for StoreError {
    fn from(e: SnapshotError) -> Self {
        match e {
            SnapshotError::Io(e) => StoreError::Io(e),
            SnapshotError::Json(e) => StoreError::Json(e),
            SnapshotError::InvalidFormat(reason) => StoreError::CorruptSnapshot(reason),
        }
    }
}

/// Every event and voucher as of a committed sequence number
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub seq: u64,
    pub taken_at: DateTime<Utc>,
    pub events: Vec<EventRecord>,
    pub vouchers: Vec<Voucher>,
}

impl Snapshot {
    /// Current version of the snapshot format
    pub const CURRENT_VERSION: u32 = 1;

    pub fn capture(state: &MaterializedState, seq: u64) -> Self {
        let mut events: Vec<_> = state.events.values().cloned().collect();
        events.sort_by(|a, b| a.id.cmp(&b.id));
        let mut vouchers: Vec<_> = state.vouchers.values().cloned().collect();
        vouchers.sort_by(|a, b| a.id.cmp(&b.id));

        Self {
            version: Self::CURRENT_VERSION,
            seq,
            taken_at: Utc::now(),
            events,
            vouchers,
        }
    }

    /// Rebuild state, including the voucher code index
    pub fn to_materialized(&self) -> MaterializedState {
        let mut state = MaterializedState::default();
        for event in &self.events {
            state.apply(&Operation::EventPut {
                event: event.clone(),
            });
        }
        for voucher in &self.vouchers {
            state.apply(&Operation::VoucherPut {
                voucher: voucher.clone(),
            });
        }
        state
    }

    /// Write atomically: a temp file is synced, then renamed over `path`
    pub fn write(&self, path: &Path) -> Result<(), SnapshotError> {
        let temp_path = path.with_extension("snapshot.tmp");
        {
            let file = File::create(&temp_path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer(&mut writer, self)?;
            writer.flush()?;
            writer.get_ref().sync_all()?;
        }
        fs::rename(&temp_path, path)?;
        Ok(())
    }

    /// Load the snapshot at `path`, if one has been written
    pub fn load(path: &Path) -> Result<Option<Self>, SnapshotError> {
        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let snapshot: Self = serde_json::from_reader(BufReader::new(file))?;

        if snapshot.version != Self::CURRENT_VERSION {
            return Err(SnapshotError::InvalidFormat(format!(
                "unsupported version: {} (expected {})",
                snapshot.version,
                Self::CURRENT_VERSION
            )));
        }
        Ok(Some(snapshot))
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
