// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory store shared by clones of one handle

use super::{Store, StoreError, Tx};
use crate::state::MaterializedState;
use std::sync::{Arc, Mutex, RwLock};

/// In-memory store; every clone shares the same state.
///
/// Transactions run under the write guard, so they are serializable. Staged
/// writes are applied only after the body returns `Ok`.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<MaterializedState>>,
    faults: Arc<Mutex<Vec<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next store call fail with [`StoreError::Unavailable`]
    pub fn inject_fault(&self, message: impl Into<String>) {
        self.faults
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(message.into());
    }

    /// Snapshot of the committed state
    pub fn snapshot(&self) -> MaterializedState {
        self.state.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn take_fault(&self) -> Result<(), StoreError> {
        let fault = self.faults.lock().unwrap_or_else(|e| e.into_inner()).pop();
        match fault {
            Some(message) => Err(StoreError::Unavailable(message)),
            None => Ok(()),
        }
    }
}

impl Store for MemoryStore {
    fn read<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&MaterializedState) -> T,
    {
        self.take_fault()?;
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        Ok(f(&state))
    }

    fn transaction<T, E, F>(&self, body: F) -> Result<T, E>
    where
        E: From<StoreError>,
        F: FnOnce(&mut Tx<'_>) -> Result<T, E>,
    {
        self.take_fault()?;
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());

        let (value, ops) = {
            let mut tx = Tx::new(&state);
            let value = body(&mut tx)?;
            if tx.is_read_only() {
                return Ok(value);
            }
            (value, tx.into_ops())
        };

        for op in &ops {
            state.apply(op);
        }
        tracing::trace!(ops = ops.len(), "memory transaction committed");

        Ok(value)
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
