// SPDX-License-Identifier: MIT

//! Commit journal for durable storage
//!
//! Each committed unit of work appends exactly one JSON line carrying
//! every row operation in the commit, so a multi-row commit is atomic in
//! the log: replay either sees all of it or none of it.

use rollcall_core::Record;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur in journal operations
#[derive(Debug, Error)]
pub enum JournalError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One physical row mutation inside a committed unit of work
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RowOp {
    /// Insert or replace the row with this identity
    Upsert { table: String, row: Record },
    /// Remove the row with this identity
    Delete { table: String, id: String },
}

/// One committed unit of work
#[derive(Debug, Serialize, Deserialize)]
pub struct JournalEntry {
    pub seq: u64,
    pub ops: Vec<RowOp>,
}

/// Append-only commit log
pub struct Journal {
    file: File,
    sequence: u64,
}

impl Journal {
    /// Open or create a journal at the given path
    pub fn open(path: &Path) -> Result<Self, JournalError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .read(true)
            .open(path)?;

        // Count existing entries to set sequence number
        let reader = BufReader::new(File::open(path)?);
        let sequence = reader.lines().count() as u64;

        Ok(Self { file, sequence })
    }

    /// Append one committed unit of work
    pub fn append(&mut self, ops: &[RowOp]) -> Result<u64, JournalError> {
        self.sequence += 1;
        let entry = JournalEntry {
            seq: self.sequence,
            ops: ops.to_vec(),
        };
        let line = serde_json::to_string(&entry)?;
        writeln!(self.file, "{}", line)?;
        self.file.sync_all()?;
        Ok(self.sequence)
    }

    /// Get the current sequence number
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Replay every committed row operation, in commit order
    pub fn replay(path: &Path) -> Result<Vec<RowOp>, JournalError> {
        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let reader = BufReader::new(file);
        let mut ops = Vec::new();

        for line in reader.lines() {
            let line = line?;
            if line.is_empty() {
                continue;
            }
            let entry: JournalEntry = serde_json::from_str(&line)?;
            ops.extend(entry.ops);
        }

        Ok(ops)
    }
}

#[cfg(test)]
#[path = "journal_tests.rs"]
mod tests;
