// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded allocator: issues vouchers against an event's capacity
//!
//! Issuance is one transaction that increments `issued_count` under the
//! predicate `issued_count < capacity && active` and creates the voucher.
//! If no unique code can be found the whole transaction aborts, so the
//! counter never drifts away from the number of vouchers.

use super::error::CoordinationError;
use super::outcome::{IssueOutcome, MarkUsedOutcome};
use crate::clock::Clock;
use crate::id::{CodeGen, IdGen};
use crate::model::Voucher;
use crate::notice::{Notice, NoticeSink};
use crate::store::{Conflict, Store, StoreError};

/// Candidate codes tried per issuance before aborting
pub const MAX_CODE_ATTEMPTS: u32 = 3;

/// Why an issuance transaction aborted
#[derive(Debug)]
enum IssueAbort {
    CapacityExhausted,
    NotFound,
    CodesExhausted,
    Invariant { issued: u32, capacity: u32 },
    Store(StoreError),
}

impl From<StoreError> for IssueAbort {
    fn from(e: StoreError) -> Self {
        IssueAbort::Store(e)
    }
}

/// Issues vouchers and marks them used
#[derive(Clone)]
pub struct Allocator<S, N, C, G, I> {
    store: S,
    notices: N,
    clock: C,
    codes: G,
    ids: I,
}

impl<S, N, C, G, I> Allocator<S, N, C, G, I>
where
    S: Store,
    N: NoticeSink,
    C: Clock,
    G: CodeGen,
    I: IdGen,
{
    pub fn new(store: S, notices: N, clock: C, codes: G, ids: I) -> Self {
        Self {
            store,
            notices,
            clock,
            codes,
            ids,
        }
    }

    /// Issue one voucher for `recipient` against the event's remaining capacity
    pub fn issue(
        &self,
        event_id: &str,
        recipient: &str,
    ) -> Result<IssueOutcome, CoordinationError> {
        let span = tracing::info_span!("voucher.issue", event_id, recipient);
        let _guard = span.enter();

        let result = self.store.transaction(|tx| {
            let now = self.clock.now();

            let Some(event) =
                tx.update_event_if(event_id, |e| e.can_issue(), |e| e.issued_count += 1)
            else {
                return Err(match tx.event(event_id) {
                    Some(e) if e.issued_count > e.capacity => IssueAbort::Invariant {
                        issued: e.issued_count,
                        capacity: e.capacity,
                    },
                    Some(_) => IssueAbort::CapacityExhausted,
                    None => IssueAbort::NotFound,
                });
            };

            if event.issued_count > event.capacity {
                return Err(IssueAbort::Invariant {
                    issued: event.issued_count,
                    capacity: event.capacity,
                });
            }

            for attempt in 1..=MAX_CODE_ATTEMPTS {
                let voucher = Voucher::new(
                    self.ids.next(),
                    event_id,
                    self.codes.candidate(),
                    recipient,
                    now,
                );
                match tx.insert_voucher(voucher.clone()) {
                    Ok(()) => return Ok((voucher, event.remaining())),
                    Err(Conflict::DuplicateCode(code)) => {
                        tracing::debug!(attempt, code = %code, "voucher code collision");
                    }
                    Err(Conflict::DuplicateId(id)) => {
                        tracing::debug!(attempt, id = %id, "voucher id collision");
                    }
                }
            }

            Err(IssueAbort::CodesExhausted)
        });

        match result {
            Ok((voucher, remaining)) => {
                tracing::info!(voucher_id = %voucher.id, code = %voucher.code, remaining, "voucher issued");
                self.notices.notify(Notice::VoucherIssued {
                    event_id: event_id.to_string(),
                    voucher_id: voucher.id.clone(),
                    code: voucher.code.clone(),
                    recipient: voucher.recipient.clone(),
                    remaining,
                });
                Ok(IssueOutcome::Issued { voucher })
            }
            Err(IssueAbort::CapacityExhausted) => {
                tracing::debug!("capacity exhausted or event inactive");
                Ok(IssueOutcome::CapacityExhausted)
            }
            Err(IssueAbort::NotFound) => Ok(IssueOutcome::NotFound),
            Err(IssueAbort::CodesExhausted) => {
                tracing::warn!(attempts = MAX_CODE_ATTEMPTS, "voucher code space exhausted, issuance rolled back");
                Err(CoordinationError::CodeSpaceExhausted {
                    attempts: MAX_CODE_ATTEMPTS,
                })
            }
            Err(IssueAbort::Invariant { issued, capacity }) => {
                tracing::error!(issued, capacity, "issued count exceeds capacity");
                Err(CoordinationError::InvariantViolation {
                    event_id: event_id.to_string(),
                    detail: format!("issued_count {issued} exceeds capacity {capacity}"),
                })
            }
            Err(IssueAbort::Store(e)) => Err(e.into()),
        }
    }

    /// Mark a voucher used. A voucher can be used exactly once.
    pub fn mark_used(&self, voucher_id: &str) -> Result<MarkUsedOutcome, CoordinationError> {
        let span = tracing::info_span!("voucher.use", voucher_id);
        let _guard = span.enter();

        let now = self.clock.now();
        let updated = self.store.update_voucher_if(
            voucher_id,
            |v| !v.used,
            |v| {
                v.used = true;
                v.used_at = Some(now);
            },
        )?;

        if let Some(voucher) = updated {
            tracing::info!(code = %voucher.code, "voucher used");
            self.notices.notify(Notice::VoucherUsed {
                event_id: voucher.event_id.clone(),
                voucher_id: voucher.id.clone(),
                code: voucher.code.clone(),
            });
            return Ok(MarkUsedOutcome::Used { voucher });
        }

        match self.store.voucher(voucher_id)? {
            Some(_) => Ok(MarkUsedOutcome::AlreadyUsed),
            None => Ok(MarkUsedOutcome::NotFound),
        }
    }

    /// Mark the voucher holding `code` used
    pub fn mark_used_by_code(&self, code: &str) -> Result<MarkUsedOutcome, CoordinationError> {
        match self.store.voucher_by_code(code)? {
            Some(voucher) => self.mark_used(&voucher.id),
            None => Ok(MarkUsedOutcome::NotFound),
        }
    }
}

#[cfg(test)]
#[path = "allocator_tests.rs"]
mod tests;
