// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Materialized state built by applying committed operations

use crate::model::{EventRecord, Voucher};
use crate::operation::Operation;
use std::collections::HashMap;

/// Current events and vouchers, plus a unique index over voucher codes
#[derive(Debug, Default, Clone)]
pub struct MaterializedState {
    pub events: HashMap<String, EventRecord>,
    pub vouchers: HashMap<String, Voucher>,
    /// Voucher code -> voucher ID
    codes: HashMap<String, String>,
}

impl MaterializedState {
    pub fn event(&self, id: &str) -> Option<&EventRecord> {
        self.events.get(id)
    }

    pub fn voucher(&self, id: &str) -> Option<&Voucher> {
        self.vouchers.get(id)
    }

    /// ID of the voucher holding `code`, if any
    pub fn voucher_id_for_code(&self, code: &str) -> Option<&str> {
        self.codes.get(code).map(String::as_str)
    }

    /// Vouchers issued against an event, oldest first
    pub fn vouchers_for(&self, event_id: &str) -> Vec<&Voucher> {
        let mut vouchers: Vec<_> = self
            .vouchers
            .values()
            .filter(|v| v.event_id == event_id)
            .collect();
        vouchers.sort_by(|a, b| a.issued_at.cmp(&b.issued_at).then_with(|| a.id.cmp(&b.id)));
        vouchers
    }

    /// Apply an operation to update the state
    pub fn apply(&mut self, op: &Operation) {
        match op {
            Operation::EventPut { event } => {
                self.events.insert(event.id.clone(), event.clone());
            }

            Operation::EventDelete { id } => {
                self.events.remove(id);
            }

            Operation::VoucherPut { voucher } => {
                if let Some(previous) = self.vouchers.insert(voucher.id.clone(), voucher.clone()) {
                    if previous.code != voucher.code {
                        self.codes.remove(&previous.code);
                    }
                }
                self.codes.insert(voucher.code.clone(), voucher.id.clone());
            }

            Operation::VoucherDelete { id } => {
                if let Some(voucher) = self.vouchers.remove(id) {
                    self.codes.remove(&voucher.code);
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
