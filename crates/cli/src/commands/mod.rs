// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod event;
pub mod lock;
pub mod voucher;

use tix_adapters::Dispatcher;
use tix_core::SystemCoordinator;
use tix_storage::WalStore;

/// Coordinator over the on-disk store, dispatching notices in the background
pub type Coord = SystemCoordinator<WalStore, Dispatcher>;
