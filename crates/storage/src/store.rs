// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Durable store backed by a write-ahead log
//!
//! Several processes may open the same directory. Each transaction takes an
//! exclusive advisory lock, catches up with entries other writers appended,
//! runs the body against the caught-up state, then appends and fsyncs the
//! committed batch before unlocking. Reads take a shared lock.
//!
//! Once the log holds `compact_after` batches past its base, the committing
//! handle writes a snapshot and replaces the log with an empty one that
//! continues from it. Other handles notice the new base on their next
//! catch-up and reload from the snapshot if they had fallen behind it.

use crate::snapshot::Snapshot;
use crate::wal::{Cursor, Wal, WalEntry};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use tix_core::{MaterializedState, Store, StoreConfig, StoreError, Tx};

pub const WAL_FILE: &str = "tix.wal";
pub const LOCK_FILE: &str = "tix.lock";
pub const SNAPSHOT_FILE: &str = "tix.snapshot";

/// Store persisted in a directory; clones share one cached state
#[derive(Clone)]
pub struct WalStore {
    inner: Arc<Inner>,
}

struct Inner {
    lock_path: PathBuf,
    compact_after: u64,
    cache: Mutex<Cache>,
}

struct Cache {
    wal: Wal,
    snapshot_path: PathBuf,
    state: MaterializedState,
    /// Last sequence folded into `state`
    applied: u64,
    /// Base of the log file `cursor` points into
    base: u64,
    cursor: Cursor,
}

/// Advisory lock held on the lock file; released on drop
struct FileLock(File);

impl FileLock {
    fn exclusive(path: &Path) -> Result<Self, StoreError> {
        let file = open_lock_file(path)?;
        FileExt::lock_exclusive(&file)?;
        Ok(Self(file))
    }

    fn shared(path: &Path) -> Result<Self, StoreError> {
        let file = open_lock_file(path)?;
        FileExt::lock_shared(&file)?;
        Ok(Self(file))
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.0) {
            tracing::warn!(error = %e, "failed to release store lock");
        }
    }
}

fn open_lock_file(path: &Path) -> Result<File, StoreError> {
    Ok(OpenOptions::new()
        .create(true)
        .truncate(false)
        .read(true)
        .write(true)
        .open(path)?)
}

impl WalStore {
    /// Open or create a store in `dir` with default tuning
    pub fn open(dir: &Path) -> Result<Self, StoreError> {
        Self::open_with(dir, &StoreConfig::default())
    }

    /// Open or create a store in `dir`, loading its snapshot and log
    pub fn open_with(dir: &Path, config: &StoreConfig) -> Result<Self, StoreError> {
        fs::create_dir_all(dir)?;
        let lock_path = dir.join(LOCK_FILE);
        let wal = Wal::open(&dir.join(WAL_FILE))?;

        let mut cache = Cache {
            wal,
            snapshot_path: dir.join(SNAPSHOT_FILE),
            state: MaterializedState::default(),
            applied: 0,
            base: 0,
            cursor: Cursor::default(),
        };
        {
            let _lock = FileLock::shared(&lock_path)?;
            cache.catch_up(false)?;
        }
        tracing::debug!(dir = %dir.display(), seq = cache.applied, base = cache.base, "store opened");

        Ok(Self {
            inner: Arc::new(Inner {
                lock_path,
                compact_after: config.compact_after.max(1),
                cache: Mutex::new(cache),
            }),
        })
    }

    /// Sequence number of the last committed batch this handle has seen
    pub fn sequence(&self) -> u64 {
        self.cache().applied
    }

    fn cache(&self) -> MutexGuard<'_, Cache> {
        self.inner.cache.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Cache {
    /// Apply entries appended since the cursor. Under the exclusive lock a
    /// torn tail is cut off so the next append starts on a clean line.
    fn catch_up(&mut self, exclusive: bool) -> Result<(), StoreError> {
        let base = self.wal.base()?;
        if base != self.base {
            self.reload(base)?;
        }

        let tail = self.wal.read_from(self.cursor)?;
        let mut applied = 0;
        for entry in &tail.entries {
            if entry.seq <= self.applied {
                continue;
            }
            for op in &entry.ops {
                self.state.apply(op);
            }
            self.applied = entry.seq;
            applied += 1;
        }
        if applied > 0 {
            tracing::trace!(entries = applied, seq = self.applied, "caught up with log");
        }
        self.cursor = tail.cursor;

        if tail.torn_bytes > 0 {
            if exclusive {
                tracing::warn!(
                    offset = self.cursor.offset,
                    bytes = tail.torn_bytes,
                    "truncating torn write at end of log"
                );
                self.wal.truncate_to(self.cursor.offset)?;
            } else {
                tracing::debug!(bytes = tail.torn_bytes, "ignoring incomplete log tail");
            }
        }
        Ok(())
    }

    /// Switch to a log another handle compacted
    fn reload(&mut self, base: u64) -> Result<(), StoreError> {
        tracing::debug!(from = self.base, to = base, "log was compacted elsewhere");
        self.wal.reopen()?;

        if self.applied < base {
            let snapshot = Snapshot::load(&self.snapshot_path)?
                .filter(|s| s.seq >= base)
                .ok_or_else(|| {
                    StoreError::CorruptSnapshot(format!(
                        "log continues from sequence {base} but no snapshot covers it"
                    ))
                })?;
            self.state = snapshot.to_materialized();
            self.applied = snapshot.seq;
        }

        self.base = base;
        self.cursor = Cursor::default();
        Ok(())
    }

    /// Fold everything applied so far into a snapshot and restart the log
    fn compact(&mut self) -> Result<(), StoreError> {
        let seq = self.applied;
        Snapshot::capture(&self.state, seq).write(&self.snapshot_path)?;
        self.wal.rewrite(seq)?;

        tracing::info!(seq, entries_removed = seq - self.base, "log compacted");
        self.base = seq;
        self.cursor = Cursor::default();
        Ok(())
    }
}

impl Store for WalStore {
    fn read<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&MaterializedState) -> T,
    {
        let mut cache = self.cache();
        {
            let _lock = FileLock::shared(&self.inner.lock_path)?;
            cache.catch_up(false)?;
        }
        Ok(f(&cache.state))
    }

    fn transaction<T, E, F>(&self, body: F) -> Result<T, E>
    where
        E: From<StoreError>,
        F: FnOnce(&mut Tx<'_>) -> Result<T, E>,
    {
        let mut cache = self.cache();
        let _lock = FileLock::exclusive(&self.inner.lock_path)?;
        cache.catch_up(true)?;

        let (value, ops) = {
            let mut tx = Tx::new(&cache.state);
            let value = body(&mut tx)?;
            if tx.is_read_only() {
                return Ok(value);
            }
            (value, tx.into_ops())
        };

        let entry = WalEntry {
            seq: cache.applied + 1,
            ops,
        };
        let written = match cache.wal.append(&entry) {
            Ok(written) => written,
            Err(e) => {
                // A line left behind would be applied by the next catch-up
                let offset = cache.cursor.offset;
                if let Err(cut) = cache.wal.truncate_to(offset) {
                    tracing::error!(error = %cut, offset, "failed to cut back failed append");
                }
                return Err(StoreError::from(e).into());
            }
        };

        for op in &entry.ops {
            cache.state.apply(op);
        }
        cache.applied = entry.seq;
        cache.cursor = Cursor {
            offset: cache.cursor.offset + written,
            line: cache.cursor.line + 1,
            seq: entry.seq,
        };
        tracing::trace!(seq = entry.seq, ops = entry.ops.len(), "transaction committed");

        if cache.applied - cache.base >= self.inner.compact_after {
            // The batch is durable either way; a failed compaction is retried
            // on a later commit
            if let Err(e) = cache.compact() {
                tracing::warn!(error = %e, "log compaction failed");
            }
        }

        Ok(value)
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
