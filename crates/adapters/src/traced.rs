// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::notify::{NotifyAdapter, NotifyError};
use async_trait::async_trait;
use tix_core::Notice;

/// Wrapper that adds tracing to any NotifyAdapter
#[derive(Clone)]
pub struct TracedNotifyAdapter<N> {
    inner: N,
}

impl<N> TracedNotifyAdapter<N> {
    pub fn new(inner: N) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<N: NotifyAdapter> NotifyAdapter for TracedNotifyAdapter<N> {
    async fn send(&self, notice: &Notice) -> Result<(), NotifyError> {
        let span = tracing::info_span!(
            "notify.send",
            notice = notice.name(),
            event_id = notice.event_id()
        );
        let _guard = span.enter();

        tracing::debug!("delivering");

        let start = std::time::Instant::now();
        let result = self.inner.send(notice).await;
        let elapsed = start.elapsed();

        match &result {
            Ok(()) => tracing::info!(
                elapsed_ms = elapsed.as_millis() as u64,
                "notice delivered"
            ),
            Err(e) => tracing::warn!(
                elapsed_ms = elapsed.as_millis() as u64,
                error = %e,
                "delivery failed"
            ),
        }

        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
