// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! fedreg-core: Core library for the federation registry
//!
//! This crate provides:
//! - Entry kinds and the identifier formatter
//! - Applicant profiles with allow-list field mapping and validation
//! - Registration records and their status lifecycle
//! - Caller scope for role-based filtering
//! - Clock abstraction for testable timestamps

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod clock;
pub mod ident;
pub mod kind;
pub mod profile;
pub mod record;
pub mod scope;

// Re-exports
pub use clock::{Clock, FakeClock, SystemClock};
pub use ident::{format_entry_id, parse_entry_id};
pub use kind::{EntryKind, UnknownKind};
pub use profile::{ApplicantProfile, Gender, ValidationError};
pub use record::{CreatedEntry, EntryRecord, EntryStats, EntryStatus};
pub use scope::CallerScope;
