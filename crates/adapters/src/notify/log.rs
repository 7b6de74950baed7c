// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notify adapter that writes each notice as a JSON log record

use super::{NotifyAdapter, NotifyError};
use async_trait::async_trait;
use tix_core::Notice;

#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotifyAdapter;

impl LogNotifyAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotifyAdapter for LogNotifyAdapter {
    async fn send(&self, notice: &Notice) -> Result<(), NotifyError> {
        let body = serde_json::to_string(notice)?;
        tracing::info!(target: "tix::notice", notice = notice.name(), %body, "notice");
        Ok(())
    }
}
