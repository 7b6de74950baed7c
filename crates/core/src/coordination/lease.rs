// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lease lock manager for exclusive edit rights on an event
//!
//! Every operation is one conditional update on the event's lease field.
//! When the update finds no match, a separate diagnostic read classifies the
//! reason. That read is advisory: the lease may change again right after it.
//!
//! Expiry is lazy. A lapsed lease stays on the record until the next acquire
//! takes it over; nothing sweeps expired leases.

use super::error::CoordinationError;
use super::outcome::{AcquireOutcome, ExtendOutcome, LeaseStatus, ReleaseOutcome};
use crate::clock::{to_chrono, Clock};
use crate::model::{HolderId, Lease};
use crate::notice::{Notice, NoticeSink};
use crate::store::Store;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Conditional-update attempts before a lease race is reported as contention
const CONDITIONAL_ATTEMPTS: u32 = 2;

/// Acquire, release and extend leases stored on events
#[derive(Clone)]
pub struct LeaseManager<S, N, C> {
    store: S,
    notices: N,
    clock: C,
    lease_duration: Duration,
}

impl<S, N, C> LeaseManager<S, N, C>
where
    S: Store,
    N: NoticeSink,
    C: Clock,
{
    pub fn new(store: S, notices: N, clock: C, lease_duration: Duration) -> Self {
        Self {
            store,
            notices,
            clock,
            lease_duration,
        }
    }

    pub fn lease_duration(&self) -> Duration {
        self.lease_duration
    }

    /// Take the lease if it is free or lapsed.
    ///
    /// Re-acquiring a live lease you already hold reports
    /// [`AcquireOutcome::AlreadyHeldBySelf`] and does not extend it.
    pub fn acquire(
        &self,
        event_id: &str,
        caller: &HolderId,
    ) -> Result<AcquireOutcome, CoordinationError> {
        let span = tracing::info_span!("lease.acquire", event_id, caller = %caller);
        let _guard = span.enter();

        for attempt in 1..=CONDITIONAL_ATTEMPTS {
            let now = self.clock.now();
            let expires_at = self.expiry_from(now)?;
            let mut previous: Option<Lease> = None;

            let updated = self.store.update_event_if(
                event_id,
                |event| event.is_lock_available(now),
                |event| {
                    previous = event.lease.replace(Lease::new(caller.clone(), expires_at));
                },
            )?;

            if updated.is_some() {
                let reclaimed_from = previous
                    .map(|lease| lease.holder)
                    .filter(|holder| holder != caller);
                match &reclaimed_from {
                    Some(prev) => {
                        tracing::info!(%expires_at, previous = %prev, "lapsed lease reclaimed")
                    }
                    None => tracing::info!(%expires_at, "lease acquired"),
                }
                self.notices.notify(Notice::LeaseAcquired {
                    event_id: event_id.to_string(),
                    holder: caller.to_string(),
                    expires_at,
                    reclaimed_from: reclaimed_from.map(|h| h.0),
                });
                return Ok(AcquireOutcome::Acquired { expires_at });
            }

            let Some(event) = self.store.event(event_id)? else {
                tracing::debug!("event not found");
                return Ok(AcquireOutcome::NotFound);
            };

            match event.lease {
                Some(lease) if !lease.is_reclaimable(now) => {
                    if lease.is_held_by(caller) {
                        tracing::debug!(expires_at = %lease.expires_at, "already held by caller");
                        return Ok(AcquireOutcome::AlreadyHeldBySelf {
                            expires_at: lease.expires_at,
                        });
                    }
                    tracing::debug!(holder = %lease.holder, expires_at = %lease.expires_at, "held by another caller");
                    return Ok(AcquireOutcome::HeldByOther {
                        holder: lease.holder,
                        expires_at: lease.expires_at,
                    });
                }
                _ => {
                    tracing::debug!(attempt, "lease freed before diagnostic read, retrying");
                }
            }
        }

        Err(CoordinationError::Contended {
            event_id: event_id.to_string(),
            operation: "acquire",
        })
    }

    /// Drop the lease if the caller holds it, expired or not
    pub fn release(
        &self,
        event_id: &str,
        caller: &HolderId,
    ) -> Result<ReleaseOutcome, CoordinationError> {
        let span = tracing::info_span!("lease.release", event_id, caller = %caller);
        let _guard = span.enter();

        let updated = self.store.update_event_if(
            event_id,
            |event| event.holder() == Some(caller),
            |event| event.lease = None,
        )?;

        if updated.is_some() {
            tracing::info!("lease released");
            self.notices.notify(Notice::LeaseReleased {
                event_id: event_id.to_string(),
                holder: caller.to_string(),
            });
            return Ok(ReleaseOutcome::Released);
        }

        match self.store.event(event_id)? {
            None => Ok(ReleaseOutcome::NotFound),
            Some(event) => {
                let expires_at = event.lease.map(|lease| lease.expires_at);
                tracing::debug!(?expires_at, "caller is not the holder");
                Ok(ReleaseOutcome::NotHolder { expires_at })
            }
        }
    }

    /// Push the caller's live lease out to `now + lease_duration`
    pub fn extend(
        &self,
        event_id: &str,
        caller: &HolderId,
    ) -> Result<ExtendOutcome, CoordinationError> {
        let span = tracing::info_span!("lease.extend", event_id, caller = %caller);
        let _guard = span.enter();

        for attempt in 1..=CONDITIONAL_ATTEMPTS {
            let now = self.clock.now();
            let expires_at = self.expiry_from(now)?;

            let updated = self.store.update_event_if(
                event_id,
                |event| {
                    event
                        .lease
                        .as_ref()
                        .is_some_and(|lease| lease.is_held_by(caller) && lease.is_extendable(now))
                },
                |event| {
                    if let Some(lease) = event.lease.as_mut() {
                        lease.expires_at = expires_at;
                    }
                },
            )?;

            if updated.is_some() {
                tracing::info!(%expires_at, "lease extended");
                self.notices.notify(Notice::LeaseExtended {
                    event_id: event_id.to_string(),
                    holder: caller.to_string(),
                    expires_at,
                });
                return Ok(ExtendOutcome::Extended { expires_at });
            }

            let Some(event) = self.store.event(event_id)? else {
                return Ok(ExtendOutcome::NotFound);
            };

            match event.lease {
                Some(lease) if lease.is_held_by(caller) => {
                    if !lease.is_extendable(now) {
                        tracing::debug!(expires_at = %lease.expires_at, "lease expired");
                        return Ok(ExtendOutcome::Expired);
                    }
                    // Caller re-acquired concurrently; try the update again
                    tracing::debug!(attempt, "lease renewed before diagnostic read, retrying");
                }
                _ => {
                    tracing::debug!("caller is not the holder");
                    return Ok(ExtendOutcome::NotHolder);
                }
            }
        }

        Err(CoordinationError::Contended {
            event_id: event_id.to_string(),
            operation: "extend",
        })
    }

    fn expiry_from(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>, CoordinationError> {
        now.checked_add_signed(to_chrono(self.lease_duration))
            .ok_or(CoordinationError::LeaseOutOfRange {
                now,
                duration: self.lease_duration,
            })
    }

    /// Current lease as seen by a plain read
    pub fn status(&self, event_id: &str) -> Result<LeaseStatus, CoordinationError> {
        let now = self.clock.now();
        let status = match self.store.event(event_id)? {
            None => LeaseStatus::NotFound,
            Some(event) => match event.lease {
                None => LeaseStatus::Unlocked,
                Some(lease) if lease.is_reclaimable(now) => LeaseStatus::Lapsed {
                    holder: lease.holder,
                    expires_at: lease.expires_at,
                },
                Some(lease) => LeaseStatus::Held {
                    holder: lease.holder,
                    expires_at: lease.expires_at,
                },
            },
        };
        Ok(status)
    }
}

#[cfg(test)]
#[path = "lease_tests.rs"]
mod tests;
