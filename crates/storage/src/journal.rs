// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Append-only record journal
//!
//! One JSONL file per entry kind. Inserts and deletes are appended and
//! fsynced; the current record set is rebuilt by replay at open.

use crate::store::StoreError;
use fedreg_core::{EntryKind, EntryRecord};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

/// A durable mutation of the record set
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Operation {
    Insert { record: EntryRecord },
    Delete { kind: EntryKind, entry_id: String },
}

/// Append-only journal for one entry kind
#[derive(Debug)]
pub struct Journal {
    file: File,
}

impl Journal {
    /// Open or create a journal at the given path
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file })
    }

    /// Append an operation and sync it to disk
    pub fn append(&mut self, op: &Operation) -> Result<(), StoreError> {
        let line = serde_json::to_string(op)?;
        writeln!(self.file, "{}", line)?;
        self.file.sync_all()?;
        Ok(())
    }

    /// Replay all operations from the journal at `path`.
    ///
    /// A missing file is an empty journal, not an error.
    pub fn replay(path: &Path) -> Result<Vec<Operation>, StoreError> {
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
            let op: Operation = serde_json::from_str(&line)?;
            ops.push(op);
        }

        Ok(ops)
    }
}

#[cfg(test)]
#[path = "journal_tests.rs"]
mod tests;
