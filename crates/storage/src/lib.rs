// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tix-storage: durable, multi-process store for tix

mod snapshot;
mod store;
mod wal;

pub use snapshot::{Snapshot, SnapshotError};
pub use store::{WalStore, LOCK_FILE, SNAPSHOT_FILE, WAL_FILE};
pub use wal::{Cursor, Tail, Wal, WalEntry, WalError, WalHeader};
