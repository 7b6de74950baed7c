// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event catalog: administrative create, edit and delete of events
//!
//! Edits never touch the lease fields. Capacity edits share the allocator's
//! atomicity: a capacity below the current issued count is rejected by the
//! same conditional update that applies it.

use super::error::CoordinationError;
use super::outcome::{DeleteOutcome, UpdateOutcome};
use crate::clock::Clock;
use crate::id::IdGen;
use crate::model::{EventRecord, Voucher};
use crate::notice::{Notice, NoticeSink};
use crate::store::{Store, StoreError};

#[derive(Clone)]
pub struct Catalog<S, N, C, I> {
    store: S,
    notices: N,
    clock: C,
    ids: I,
}

impl<S, N, C, I> Catalog<S, N, C, I>
where
    S: Store,
    N: NoticeSink,
    C: Clock,
    I: IdGen,
{
    pub fn new(store: S, notices: N, clock: C, ids: I) -> Self {
        Self {
            store,
            notices,
            clock,
            ids,
        }
    }

    /// Create an active, unlocked event with nothing issued
    pub fn create(&self, name: &str, capacity: u32) -> Result<EventRecord, CoordinationError> {
        let event = EventRecord::new(self.ids.next(), name, capacity, self.clock.now());
        self.store.transaction(|tx| {
            tx.insert_event(event.clone())
                .map_err(|e| CoordinationError::Store(StoreError::from(e)))
        })?;
        tracing::info!(event_id = %event.id, name, capacity, "event created");
        Ok(event)
    }

    pub fn event(&self, id: &str) -> Result<Option<EventRecord>, CoordinationError> {
        Ok(self.store.event(id)?)
    }

    pub fn events(&self) -> Result<Vec<EventRecord>, CoordinationError> {
        Ok(self.store.events()?)
    }

    pub fn voucher(&self, id: &str) -> Result<Option<Voucher>, CoordinationError> {
        Ok(self.store.voucher(id)?)
    }

    pub fn voucher_by_code(&self, code: &str) -> Result<Option<Voucher>, CoordinationError> {
        Ok(self.store.voucher_by_code(code)?)
    }

    /// Vouchers issued against an event, oldest first
    pub fn vouchers(&self, event_id: &str) -> Result<Vec<Voucher>, CoordinationError> {
        Ok(self.store.vouchers_for(event_id)?)
    }

    /// Change the quota; never below the number already issued
    pub fn set_capacity(
        &self,
        id: &str,
        capacity: u32,
    ) -> Result<UpdateOutcome, CoordinationError> {
        let now = self.clock.now();
        let updated = self.store.update_event_if(
            id,
            |e| capacity >= e.issued_count,
            |e| {
                e.capacity = capacity;
                e.updated_at = now;
            },
        )?;

        if let Some(event) = updated {
            tracing::info!(event_id = id, capacity, "capacity updated");
            return Ok(UpdateOutcome::Updated { event });
        }

        // issued_count only grows, so a rejected capacity stays rejected
        match self.store.event(id)? {
            Some(event) => Ok(UpdateOutcome::BelowIssued {
                issued: event.issued_count,
            }),
            None => Ok(UpdateOutcome::NotFound),
        }
    }

    /// Activate or deactivate issuance
    pub fn set_active(&self, id: &str, active: bool) -> Result<UpdateOutcome, CoordinationError> {
        let now = self.clock.now();
        let updated = self.store.update_event_if(
            id,
            |_| true,
            |e| {
                e.active = active;
                e.updated_at = now;
            },
        )?;

        match updated {
            Some(event) => {
                tracing::info!(event_id = id, active, "event activation changed");
                Ok(UpdateOutcome::Updated { event })
            }
            None => Ok(UpdateOutcome::NotFound),
        }
    }

    /// Delete an event together with all of its vouchers
    pub fn delete(&self, id: &str) -> Result<DeleteOutcome, CoordinationError> {
        let removed = self.store.transaction(|tx| {
            if tx.event(id).is_none() {
                return Ok::<_, StoreError>(None);
            }
            let vouchers = tx.vouchers_for(id);
            for voucher in &vouchers {
                tx.delete_voucher(&voucher.id);
            }
            tx.delete_event(id);
            Ok(Some(vouchers.len()))
        })?;

        let Some(vouchers_removed) = removed else {
            return Ok(DeleteOutcome::NotFound);
        };

        tracing::info!(event_id = id, vouchers_removed, "event deleted");
        self.notices.notify(Notice::EventDeleted {
            event_id: id.to_string(),
            vouchers_removed,
        });
        Ok(DeleteOutcome::Deleted { vouchers_removed })
    }
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
