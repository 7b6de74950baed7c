// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resource store adapter
//!
//! The coordination core depends on exactly two store primitives:
//! - **Conditional update** - mutate a record only if a predicate holds on its
//!   current value, returning the post-mutation record atomically
//! - **Transaction** - a body of reads and writes over any number of records
//!   that commits as a whole when it returns `Ok` and leaves no trace when it
//!   returns `Err`
//!
//! Conditional updates are provided on top of single-record transactions, so a
//! backend only implements [`Store::read`] and [`Store::transaction`].

mod memory;
mod tx;

pub use memory::MemoryStore;
pub use tx::{Conflict, Tx};

use crate::model::{EventRecord, Voucher};
use crate::state::MaterializedState;
use thiserror::Error;

/// Store-level faults. These are transient from the core's point of view and
/// are always propagated unchanged.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("corrupt log entry at line {line}: {reason}")]
    Corrupt { line: u64, reason: String },
    #[error("corrupt snapshot: {0}")]
    CorruptSnapshot(String),
    #[error("uniqueness conflict: {0}")]
    Conflict(#[from] Conflict),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Shared mutable store of events and vouchers
pub trait Store: Clone + Send + Sync + 'static {
    /// Run a read-only closure against a consistent view of the state
    fn read<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&MaterializedState) -> T;

    /// Run `body` atomically. `Ok` commits every staged write, `Err` aborts.
    ///
    /// Commit failures are reported through `E::from(StoreError)`.
    fn transaction<T, E, F>(&self, body: F) -> Result<T, E>
    where
        E: From<StoreError>,
        F: FnOnce(&mut Tx<'_>) -> Result<T, E>;

    fn event(&self, id: &str) -> Result<Option<EventRecord>, StoreError> {
        self.read(|state| state.event(id).cloned())
    }

    fn voucher(&self, id: &str) -> Result<Option<Voucher>, StoreError> {
        self.read(|state| state.voucher(id).cloned())
    }

    fn voucher_by_code(&self, code: &str) -> Result<Option<Voucher>, StoreError> {
        self.read(|state| {
            state
                .voucher_id_for_code(code)
                .and_then(|id| state.voucher(id))
                .cloned()
        })
    }

    fn vouchers_for(&self, event_id: &str) -> Result<Vec<Voucher>, StoreError> {
        self.read(|state| state.vouchers_for(event_id).into_iter().cloned().collect())
    }

    fn events(&self) -> Result<Vec<EventRecord>, StoreError> {
        self.read(|state| {
            let mut events: Vec<_> = state.events.values().cloned().collect();
            events.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
            events
        })
    }

    /// Conditional update of an event: `None` when the event is absent or the
    /// predicate rejects its current value.
    fn update_event_if<P, M>(
        &self,
        id: &str,
        predicate: P,
        mutation: M,
    ) -> Result<Option<EventRecord>, StoreError>
    where
        P: FnOnce(&EventRecord) -> bool,
        M: FnOnce(&mut EventRecord),
    {
        self.transaction(|tx| Ok(tx.update_event_if(id, predicate, mutation)))
    }

    /// Conditional update of a voucher, with the same contract as
    /// [`Store::update_event_if`].
    fn update_voucher_if<P, M>(
        &self,
        id: &str,
        predicate: P,
        mutation: M,
    ) -> Result<Option<Voucher>, StoreError>
    where
        P: FnOnce(&Voucher) -> bool,
        M: FnOnce(&mut Voucher),
    {
        self.transaction(|tx| Ok(tx.update_voucher_if(id, predicate, mutation)))
    }
}
