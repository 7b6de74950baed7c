// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Transaction overlay
//!
//! A [`Tx`] reads through a staging overlay onto the committed state and
//! records every write as an [`Operation`]. Nothing reaches the committed
//! state until the store applies [`Tx::into_ops`].

use crate::model::{EventRecord, Voucher};
use crate::operation::Operation;
use crate::state::MaterializedState;
use std::collections::HashMap;
use thiserror::Error;

/// Uniqueness constraint violations raised by inserts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Conflict {
    #[error("duplicate id: {0}")]
    DuplicateId(String),
    #[error("duplicate voucher code: {0}")]
    DuplicateCode(String),
}

/// Staged reads and writes of one transaction
pub struct Tx<'a> {
    base: &'a MaterializedState,
    /// Staged events; `None` marks a staged delete
    events: HashMap<String, Option<EventRecord>>,
    /// Staged vouchers; `None` marks a staged delete
    vouchers: HashMap<String, Option<Voucher>>,
    ops: Vec<Operation>,
}

impl<'a> Tx<'a> {
    pub fn new(base: &'a MaterializedState) -> Self {
        Self {
            base,
            events: HashMap::new(),
            vouchers: HashMap::new(),
            ops: Vec::new(),
        }
    }

    // === Reads ===

    pub fn event(&self, id: &str) -> Option<EventRecord> {
        match self.events.get(id) {
            Some(staged) => staged.clone(),
            None => self.base.event(id).cloned(),
        }
    }

    pub fn voucher(&self, id: &str) -> Option<Voucher> {
        match self.vouchers.get(id) {
            Some(staged) => staged.clone(),
            None => self.base.voucher(id).cloned(),
        }
    }

    pub fn voucher_by_code(&self, code: &str) -> Option<Voucher> {
        if let Some(staged) = self.vouchers.values().flatten().find(|v| v.code == code) {
            return Some(staged.clone());
        }
        let id = self.base.voucher_id_for_code(code)?;
        self.voucher(id)
    }

    /// Vouchers of an event as seen by this transaction, oldest first
    pub fn vouchers_for(&self, event_id: &str) -> Vec<Voucher> {
        let mut vouchers: Vec<Voucher> = self
            .base
            .vouchers_for(event_id)
            .into_iter()
            .filter(|v| !self.vouchers.contains_key(&v.id))
            .cloned()
            .collect();
        vouchers.extend(
            self.vouchers
                .values()
                .flatten()
                .filter(|v| v.event_id == event_id)
                .cloned(),
        );
        vouchers.sort_by(|a, b| a.issued_at.cmp(&b.issued_at).then_with(|| a.id.cmp(&b.id)));
        vouchers
    }

    // === Event writes ===

    /// Apply `mutation` only if `predicate` holds on the current event
    pub fn update_event_if<P, M>(
        &mut self,
        id: &str,
        predicate: P,
        mutation: M,
    ) -> Option<EventRecord>
    where
        P: FnOnce(&EventRecord) -> bool,
        M: FnOnce(&mut EventRecord),
    {
        let mut event = self.event(id)?;
        if !predicate(&event) {
            return None;
        }
        mutation(&mut event);
        self.put_event(event.clone());
        Some(event)
    }

    /// Insert a new event, rejecting an existing ID
    pub fn insert_event(&mut self, event: EventRecord) -> Result<(), Conflict> {
        if self.event(&event.id).is_some() {
            return Err(Conflict::DuplicateId(event.id));
        }
        self.put_event(event);
        Ok(())
    }

    fn put_event(&mut self, event: EventRecord) {
        self.ops.push(Operation::EventPut {
            event: event.clone(),
        });
        self.events.insert(event.id.clone(), Some(event));
    }

    /// Delete an event; returns false if it did not exist
    pub fn delete_event(&mut self, id: &str) -> bool {
        if self.event(id).is_none() {
            return false;
        }
        self.ops.push(Operation::EventDelete { id: id.to_string() });
        self.events.insert(id.to_string(), None);
        true
    }

    // === Voucher writes ===

    /// Apply `mutation` only if `predicate` holds on the current voucher
    pub fn update_voucher_if<P, M>(
        &mut self,
        id: &str,
        predicate: P,
        mutation: M,
    ) -> Option<Voucher>
    where
        P: FnOnce(&Voucher) -> bool,
        M: FnOnce(&mut Voucher),
    {
        let mut voucher = self.voucher(id)?;
        if !predicate(&voucher) {
            return None;
        }
        mutation(&mut voucher);
        self.put_voucher(voucher.clone());
        Some(voucher)
    }

    /// Insert a new voucher, enforcing unique IDs and codes
    pub fn insert_voucher(&mut self, voucher: Voucher) -> Result<(), Conflict> {
        if self.voucher(&voucher.id).is_some() {
            return Err(Conflict::DuplicateId(voucher.id));
        }
        if self.voucher_by_code(&voucher.code).is_some() {
            return Err(Conflict::DuplicateCode(voucher.code));
        }
        self.put_voucher(voucher);
        Ok(())
    }

    fn put_voucher(&mut self, voucher: Voucher) {
        self.ops.push(Operation::VoucherPut {
            voucher: voucher.clone(),
        });
        self.vouchers.insert(voucher.id.clone(), Some(voucher));
    }

    /// Delete a voucher; returns false if it did not exist
    pub fn delete_voucher(&mut self, id: &str) -> bool {
        if self.voucher(id).is_none() {
            return false;
        }
        self.ops.push(Operation::VoucherDelete { id: id.to_string() });
        self.vouchers.insert(id.to_string(), None);
        true
    }

    // === Commit support ===

    /// True if nothing was written
    pub fn is_read_only(&self) -> bool {
        self.ops.is_empty()
    }

    /// Writes in the order they were staged
    pub fn into_ops(self) -> Vec<Operation> {
        self.ops
    }
}

#[cfg(test)]
#[path = "tx_tests.rs"]
mod tests;
