// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! ID and voucher code generation

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Generates unique identifiers
pub trait IdGen: Clone + Send + Sync {
    fn next(&self) -> String;
}

/// UUID-based ID generator for production use
#[derive(Clone, Default)]
pub struct UuidIdGen;

impl IdGen for UuidIdGen {
    fn next(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Sequential ID generator for testing
#[derive(Clone)]
pub struct SequentialIdGen {
    prefix: String,
    counter: Arc<AtomicU64>,
}

impl SequentialIdGen {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: Arc::new(AtomicU64::new(1)),
        }
    }
}

impl Default for SequentialIdGen {
    fn default() -> Self {
        Self::new("id")
    }
}

impl IdGen for SequentialIdGen {
    fn next(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        format!("{}-{}", self.prefix, n)
    }
}

/// Generates candidate voucher codes.
///
/// Codes only need to be unlikely to collide; uniqueness is enforced by the
/// store and collisions are retried by the allocator.
pub trait CodeGen: Clone + Send + Sync {
    fn candidate(&self) -> String;
}

/// Random uppercase code derived from a v4 UUID
#[derive(Clone)]
pub struct RandomCodeGen {
    len: usize,
}

impl RandomCodeGen {
    pub const DEFAULT_LEN: usize = 10;

    pub fn new(len: usize) -> Self {
        // A v4 UUID has 32 hex digits
        Self {
            len: len.clamp(4, 32),
        }
    }
}

impl Default for RandomCodeGen {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LEN)
    }
}

impl CodeGen for RandomCodeGen {
    fn candidate(&self) -> String {
        let hex = uuid::Uuid::new_v4().simple().to_string().to_uppercase();
        hex[..self.len].to_string()
    }
}

/// Code generator that replays a fixed script, then falls back to a counter.
///
/// Lets tests force code collisions deterministically.
#[derive(Clone, Default)]
pub struct ScriptedCodeGen {
    script: Arc<Mutex<Vec<String>>>,
    fallback: Arc<AtomicU64>,
}

impl ScriptedCodeGen {
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut script: Vec<String> = codes.into_iter().map(Into::into).collect();
        script.reverse();
        Self {
            script: Arc::new(Mutex::new(script)),
            fallback: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Generator that returns the same code forever
    pub fn constant(code: impl Into<String>) -> ConstantCodeGen {
        ConstantCodeGen(code.into())
    }
}

impl CodeGen for ScriptedCodeGen {
    fn candidate(&self) -> String {
        let next = self
            .script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop();
        next.unwrap_or_else(|| format!("CODE-{}", self.fallback.fetch_add(1, Ordering::SeqCst)))
    }
}

/// Code generator that always yields the same code
#[derive(Clone)]
pub struct ConstantCodeGen(String);

impl CodeGen for ConstantCodeGen {
    fn candidate(&self) -> String {
        self.0.clone()
    }
}
