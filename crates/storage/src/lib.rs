// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! fedreg-storage: durable record store and sequence allocator
//!
//! Records live in one append-only JSONL journal per entry kind, replayed
//! into an in-memory index at open. Sequence counters live in one text
//! file per sequence name, advanced under the store's exclusive lock.
//! Uniqueness of entry IDs and non-blank natural keys is enforced here —
//! the pipeline's collision retry keys off the error variants this crate
//! returns.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod counter;
mod journal;
mod store;

pub use journal::{Journal, Operation};
pub use store::{EntryStore, JournalStore, StoreError};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeEntryStore, PlannedFailure, StoreCall};
