// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Durable sequence counters
//!
//! One text file per sequence name holding the last issued value.
//! Allocation is a read, increment, write-to-temp, rename, fsync —
//! never a read of a cached maximum. Callers must hold the store's
//! exclusive lock across the whole operation.

use crate::store::StoreError;
use std::fs;
use std::path::PathBuf;

/// A named, durable, monotonic counter
pub struct Counter {
    path: PathBuf,
}

impl Counter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Last issued value; 0 if the counter has never allocated
    pub fn current(&self) -> Result<u64, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => text
                .trim()
                .parse()
                .map_err(|_| StoreError::CorruptCounter(self.path.clone())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(0),
            Err(e) => Err(e.into()),
        }
    }

    /// Issue the next value and persist it before returning
    pub fn allocate(&self) -> Result<u64, StoreError> {
        let next = self.current()? + 1;
        self.write(next)?;
        Ok(next)
    }

    /// Seed a counter that does not exist yet.
    ///
    /// Used once at open to recover the maximum previously issued value
    /// from records written before the counter file existed. A counter
    /// that already exists is left alone.
    pub fn seed_if_missing(&self, value: u64) -> Result<(), StoreError> {
        if self.path.exists() || value == 0 {
            return Ok(());
        }
        self.write(value)
    }

    fn write(&self, value: u64) -> Result<(), StoreError> {
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, format!("{value}\n"))?;
        let file = fs::File::open(&tmp)?;
        file.sync_all()?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "counter_tests.rs"]
mod tests;
