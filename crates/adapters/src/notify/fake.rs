// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake notification adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{NotifyAdapter, NotifyError};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tix_core::Notice;

#[derive(Default)]
struct FakeState {
    calls: Vec<Notice>,
    failure: Option<String>,
}

/// Fake notification adapter for testing
#[derive(Clone, Default)]
pub struct FakeNotifyAdapter {
    state: Arc<Mutex<FakeState>>,
}

impl FakeNotifyAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all notices passed to `send`, including failed deliveries
    pub fn calls(&self) -> Vec<Notice> {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .clone()
    }

    /// Names of the notices passed to `send`
    pub fn names(&self) -> Vec<&'static str> {
        self.calls().iter().map(Notice::name).collect()
    }

    /// Fail every subsequent send with `message`
    pub fn fail_with(&self, message: impl Into<String>) {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).failure = Some(message.into());
    }

    /// Stop failing sends
    pub fn recover(&self) {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).failure = None;
    }
}

#[async_trait]
impl NotifyAdapter for FakeNotifyAdapter {
    async fn send(&self, notice: &Notice) -> Result<(), NotifyError> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.calls.push(notice.clone());
        match &state.failure {
            Some(message) => Err(NotifyError::DeliveryFailed(message.clone())),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
