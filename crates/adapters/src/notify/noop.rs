// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! No-op notify adapter for when delivery is disabled.

use super::{NotifyAdapter, NotifyError};
use async_trait::async_trait;
use tix_core::Notice;

/// Notify adapter that accepts and discards every notice
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpNotifyAdapter;

impl NoOpNotifyAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotifyAdapter for NoOpNotifyAdapter {
    async fn send(&self, _notice: &Notice) -> Result<(), NotifyError> {
        Ok(())
    }
}
