// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tix-core: race-free coordination over a shared event store
//!
//! This crate provides:
//! - The store adapter contract (conditional update + transaction) and an
//!   in-memory implementation
//! - A lease lock manager for exclusive edit rights on events
//! - A bounded allocator issuing uniquely-coded vouchers against a quota
//! - Post-commit notices for fire-and-forget side effects

pub mod clock;
pub mod config;
pub mod coordination;
pub mod id;
pub mod model;
pub mod notice;
pub mod operation;
pub mod state;
pub mod store;

// Re-exports
pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{ConfigError, CoordinationConfig, NotifyConfig, StoreConfig};
pub use coordination::{
    AcquireOutcome, Allocator, Catalog, CoordinationError, Coordinator, DeleteOutcome,
    ExtendOutcome, IssueOutcome, LeaseManager, LeaseStatus, MarkUsedOutcome, Outcome,
    OutcomeStatus, ReleaseOutcome, SystemCoordinator, UpdateOutcome,
};
pub use id::{CodeGen, IdGen, RandomCodeGen, ScriptedCodeGen, SequentialIdGen, UuidIdGen};
pub use model::{EventRecord, HolderId, Lease, Voucher};
pub use notice::{NoOpSink, Notice, NoticePattern, NoticeSink, RecordingSink};
pub use operation::Operation;
pub use state::MaterializedState;
pub use store::{Conflict, MemoryStore, Store, StoreError, Tx};
