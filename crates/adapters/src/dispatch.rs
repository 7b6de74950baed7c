// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fire-and-forget notice dispatch
//!
//! [`Dispatcher`] is the [`NoticeSink`] handed to the coordinator. It never
//! blocks the caller: notices that match the configured patterns go onto a
//! bounded queue and a background task delivers them. A full or closed queue
//! drops the notice with a warning; delivery failures are logged and counted.

use crate::notify::NotifyAdapter;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tix_core::{Notice, NoticeSink, NotifyConfig};
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;

/// Delivery counters, reported by [`Dispatcher::shutdown`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DispatchStats {
    pub delivered: u64,
    pub failed: u64,
    /// Dropped because the queue was full or already shut down
    pub dropped: u64,
    /// Not forwarded because no pattern matched
    pub filtered: u64,
}

#[derive(Default)]
struct Counters {
    delivered: AtomicU64,
    failed: AtomicU64,
    dropped: AtomicU64,
    filtered: AtomicU64,
}

impl Counters {
    fn snapshot(&self) -> DispatchStats {
        DispatchStats {
            delivered: self.delivered.load(Ordering::SeqCst),
            failed: self.failed.load(Ordering::SeqCst),
            dropped: self.dropped.load(Ordering::SeqCst),
            filtered: self.filtered.load(Ordering::SeqCst),
        }
    }
}

/// Queueing notice sink; clones share one queue and worker
#[derive(Clone)]
pub struct Dispatcher {
    config: Arc<NotifyConfig>,
    // Taken on shutdown so the worker sees the channel close
    tx: Arc<Mutex<Option<mpsc::Sender<Notice>>>>,
    worker: Arc<Mutex<Option<JoinHandle<()>>>>,
    counters: Arc<Counters>,
}

impl Dispatcher {
    /// Start the delivery worker. Must be called inside a tokio runtime.
    pub fn spawn<N: NotifyAdapter>(adapter: N, config: &NotifyConfig) -> Self {
        let (tx, rx) = mpsc::channel(config.queue_depth.max(1));
        let counters = Arc::new(Counters::default());
        let worker = tokio::spawn(deliver(adapter, rx, Arc::clone(&counters)));

        Self {
            config: Arc::new(config.clone()),
            tx: Arc::new(Mutex::new(Some(tx))),
            worker: Arc::new(Mutex::new(Some(worker))),
            counters,
        }
    }

    /// Counters so far
    pub fn stats(&self) -> DispatchStats {
        self.counters.snapshot()
    }

    /// Stop accepting notices and wait until the queue is drained
    pub async fn shutdown(&self) -> DispatchStats {
        drop(self.tx.lock().unwrap_or_else(|e| e.into_inner()).take());
        let worker = self.worker.lock().unwrap_or_else(|e| e.into_inner()).take();

        if let Some(worker) = worker {
            if let Err(e) = worker.await {
                tracing::error!(error = %e, "notice worker panicked");
            }
        }

        let stats = self.counters.snapshot();
        tracing::debug!(?stats, "dispatcher stopped");
        stats
    }
}

impl NoticeSink for Dispatcher {
    fn notify(&self, notice: Notice) {
        if !self.config.should_notify(&notice) {
            tracing::trace!(notice = notice.name(), "notice filtered");
            self.counters.filtered.fetch_add(1, Ordering::SeqCst);
            return;
        }

        let guard = self.tx.lock().unwrap_or_else(|e| e.into_inner());
        let Some(tx) = guard.as_ref() else {
            tracing::warn!(notice = notice.name(), "dispatcher stopped, notice dropped");
            self.counters.dropped.fetch_add(1, Ordering::SeqCst);
            return;
        };

        match tx.try_send(notice) {
            Ok(()) => {}
            Err(TrySendError::Full(notice)) => {
                tracing::warn!(
                    notice = notice.name(),
                    event_id = notice.event_id(),
                    "notice queue full, notice dropped"
                );
                self.counters.dropped.fetch_add(1, Ordering::SeqCst);
            }
            Err(TrySendError::Closed(notice)) => {
                tracing::warn!(notice = notice.name(), "notice worker gone, notice dropped");
                self.counters.dropped.fetch_add(1, Ordering::SeqCst);
            }
        }
    }
}

async fn deliver<N: NotifyAdapter>(
    adapter: N,
    mut rx: mpsc::Receiver<Notice>,
    counters: Arc<Counters>,
) {
    while let Some(notice) = rx.recv().await {
        match adapter.send(&notice).await {
            Ok(()) => {
                counters.delivered.fetch_add(1, Ordering::SeqCst);
            }
            Err(e) => {
                tracing::warn!(
                    notice = notice.name(),
                    event_id = notice.event_id(),
                    error = %e,
                    "notice delivery failed"
                );
                counters.failed.fetch_add(1, Ordering::SeqCst);
            }
        }
    }
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
