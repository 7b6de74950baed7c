// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Coordinator: one handle over the lease manager, allocator and catalog
//!
//! All three share a store, a notice sink and a clock.

use super::allocator::Allocator;
use super::catalog::Catalog;
use super::lease::LeaseManager;
use crate::clock::{Clock, SystemClock};
use crate::config::CoordinationConfig;
use crate::id::{CodeGen, IdGen, RandomCodeGen, UuidIdGen};
use crate::notice::NoticeSink;
use crate::store::Store;

/// Production coordinator over a given store and sink
pub type SystemCoordinator<S, N> = Coordinator<S, N, SystemClock, RandomCodeGen, UuidIdGen>;

#[derive(Clone)]
pub struct Coordinator<S, N, C, G, I> {
    pub leases: LeaseManager<S, N, C>,
    pub vouchers: Allocator<S, N, C, G, I>,
    pub events: Catalog<S, N, C, I>,
}

impl<S, N, C, G, I> Coordinator<S, N, C, G, I>
where
    S: Store,
    N: NoticeSink,
    C: Clock,
    G: CodeGen,
    I: IdGen,
{
    pub fn new(store: S, notices: N, clock: C, codes: G, ids: I, config: &CoordinationConfig) -> Self {
        Self {
            leases: LeaseManager::new(
                store.clone(),
                notices.clone(),
                clock.clone(),
                config.lease_duration,
            ),
            vouchers: Allocator::new(
                store.clone(),
                notices.clone(),
                clock.clone(),
                codes,
                ids.clone(),
            ),
            events: Catalog::new(store, notices, clock, ids),
        }
    }
}

impl<S: Store, N: NoticeSink> SystemCoordinator<S, N> {
    /// Coordinator using the wall clock, random codes and UUIDs
    pub fn system(store: S, notices: N, config: &CoordinationConfig) -> Self {
        Self::new(
            store,
            notices,
            SystemClock,
            RandomCodeGen::new(config.code_length),
            UuidIdGen,
            config,
        )
    }
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
