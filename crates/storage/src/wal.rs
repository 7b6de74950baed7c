// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Write-ahead log of committed operation batches
//!
//! One JSON line per committed transaction. A line without a trailing newline
//! is a torn write from a crashed writer and is never applied.
//!
//! A compacted log starts with a header line naming the snapshot sequence it
//! continues from; entries before it live in the snapshot.

use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tix_core::{Operation, StoreError};

/// Errors that can occur in WAL operations
#[derive(Debug, Error)]
pub enum WalError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("corrupt entry at line {line}: {reason}")]
    Corrupt { line: u64, reason: String },
}

impl From<WalError> for StoreError {
    fn from(e: WalError) -> Self {
        match e {
            WalError::Io(e) => StoreError::Io(e),
            WalError::Json(e) => StoreError::Json(e),
            WalError::Corrupt { line, reason } => StoreError::Corrupt { line, reason },
        }
    }
}

/// One committed transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalEntry {
    pub seq: u64,
    pub ops: Vec<Operation>,
}

/// First line of a compacted log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WalHeader {
    /// Sequence of the snapshot this log continues from
    pub base: u64,
}

/// Read position inside a WAL file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    /// Byte offset just past the last complete line
    pub offset: u64,
    /// Complete lines consumed so far
    pub line: u64,
    /// Sequence number covered by the lines consumed so far
    pub seq: u64,
}

/// Entries read past a cursor
#[derive(Debug, Default)]
pub struct Tail {
    pub entries: Vec<WalEntry>,
    pub cursor: Cursor,
    /// Bytes after the cursor that do not end in a newline
    pub torn_bytes: u64,
    /// Header read when the scan started at the top of the file
    pub header: Option<WalHeader>,
}

/// Append handle for a WAL file
pub struct Wal {
    path: PathBuf,
    file: File,
    #[cfg(test)]
    fail_next_sync: bool,
}

impl Wal {
    /// Open or create a WAL at the given path
    pub fn open(path: &Path) -> Result<Self, WalError> {
        Ok(Self {
            path: path.to_path_buf(),
            file: open_append(path)?,
            #[cfg(test)]
            fail_next_sync: false,
        })
    }

    /// Reopen the file at our path, after another handle replaced it
    pub fn reopen(&mut self) -> Result<(), WalError> {
        self.file = open_append(&self.path)?;
        Ok(())
    }

    /// Snapshot sequence the log on disk continues from (0 if never compacted)
    pub fn base(&self) -> Result<u64, WalError> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };
        let mut first = Vec::new();
        BufReader::new(file).read_until(b'\n', &mut first)?;
        Ok(parse_header(&first).map_or(0, |h| h.base))
    }

    /// Read every complete entry after `cursor`
    pub fn read_from(&self, cursor: Cursor) -> Result<Tail, WalError> {
        read_tail(&self.path, cursor)
    }

    /// Cut a torn trailing write so the next append starts on a fresh line
    pub fn truncate_to(&self, offset: u64) -> Result<(), WalError> {
        self.file.set_len(offset)?;
        self.file.sync_all()?;
        Ok(())
    }

    /// Append one entry and fsync. Returns the number of bytes written.
    ///
    /// On error the file may hold part or all of the line; the caller cuts it
    /// back with [`Wal::truncate_to`].
    pub fn append(&mut self, entry: &WalEntry) -> Result<u64, WalError> {
        let mut line = serde_json::to_vec(entry)?;
        line.push(b'\n');
        self.file.write_all(&line)?;
        self.sync()?;
        Ok(line.len() as u64)
    }

    /// Replace the log with an empty one continuing from `base`.
    ///
    /// The new file is written beside the old one and renamed over it, so a
    /// reader sees either the full old log or the header of the new one.
    pub fn rewrite(&mut self, base: u64) -> Result<(), WalError> {
        let temp_path = self.path.with_extension("wal.compact.tmp");
        let mut file = OpenOptions::new()
            .create(true)
            .truncate(true)
            .read(true)
            .write(true)
            .open(&temp_path)?;
        let mut line = serde_json::to_vec(&WalHeader { base })?;
        line.push(b'\n');
        file.write_all(&line)?;
        file.sync_all()?;
        fs::rename(&temp_path, &self.path)?;

        self.file = open_append(&self.path)?;
        Ok(())
    }

    /// Make the next fsync after an append fail
    #[cfg(test)]
    pub(crate) fn fail_next_sync(&mut self) {
        self.fail_next_sync = true;
    }

    fn sync(&mut self) -> io::Result<()> {
        #[cfg(test)]
        if std::mem::take(&mut self.fail_next_sync) {
            return Err(io::Error::other("injected sync failure"));
        }
        self.file.sync_all()
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .read(true)
        .open(path)
}

fn parse_header(line: &[u8]) -> Option<WalHeader> {
    let text = line.strip_suffix(b"\n")?;
    serde_json::from_slice(text).ok()
}

fn read_tail(path: &Path, cursor: Cursor) -> Result<Tail, WalError> {
    let mut file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Ok(Tail {
                cursor,
                ..Tail::default()
            })
        }
        Err(e) => return Err(e.into()),
    };
    file.seek(SeekFrom::Start(cursor.offset))?;

    let mut reader = BufReader::new(file);
    let mut tail = Tail {
        cursor,
        ..Tail::default()
    };
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let n = reader.read_until(b'\n', &mut buf)? as u64;
        if n == 0 {
            break;
        }
        if buf.last() != Some(&b'\n') {
            tail.torn_bytes = n;
            break;
        }

        let line = tail.cursor.line + 1;
        let text = &buf[..buf.len() - 1];
        if tail.cursor.offset == 0 {
            if let Some(header) = parse_header(&buf) {
                tail.cursor.seq = tail.cursor.seq.max(header.base);
                tail.header = Some(header);
                tail.cursor.line = line;
                tail.cursor.offset += n;
                continue;
            }
        }
        if !text.iter().all(u8::is_ascii_whitespace) {
            let entry: WalEntry = serde_json::from_slice(text).map_err(|e| WalError::Corrupt {
                line,
                reason: e.to_string(),
            })?;
            if entry.seq <= tail.cursor.seq {
                return Err(WalError::Corrupt {
                    line,
                    reason: format!(
                        "sequence {} does not follow {}",
                        entry.seq, tail.cursor.seq
                    ),
                });
            }
            tail.cursor.seq = entry.seq;
            tail.entries.push(entry);
        }
        tail.cursor.line = line;
        tail.cursor.offset += n;
    }

    Ok(tail)
}

#[cfg(test)]
#[path = "wal_tests.rs"]
mod tests;
