// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Registration records

use crate::kind::EntryKind;
use crate::profile::ApplicantProfile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Record status. Records are created pending; the approval lifecycle
/// lives outside the registration pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    Pending,
    Approved,
    Rejected,
}

/// A persisted registration record.
///
/// `entry_id` is assigned exactly once at creation and never changes.
/// `form_file` names the rendered artifact on disk; the file is owned by
/// the renderer's output directory and only referenced here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryRecord {
    pub entry_id: String,
    pub kind: EntryKind,
    pub profile: ApplicantProfile,
    pub status: EntryStatus,
    pub form_file: String,
    pub created_at: DateTime<Utc>,
}

/// What the HTTP layer returns from a successful registration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedEntry {
    pub entry_id: String,
    pub form_file: String,
    pub download_url: String,
    pub created_at: DateTime<Utc>,
}

/// Aggregate counts for dashboards, already scope-filtered
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryStats {
    pub total: u64,
    pub pending: u64,
    pub approved: u64,
    pub rejected: u64,
    pub by_district: BTreeMap<String, u64>,
}

impl EntryStats {
    pub fn add(&mut self, record: &EntryRecord) {
        self.total += 1;
        match record.status {
            EntryStatus::Pending => self.pending += 1,
            EntryStatus::Approved => self.approved += 1,
            EntryStatus::Rejected => self.rejected += 1,
        }
        *self
            .by_district
            .entry(record.profile.district.clone())
            .or_default() += 1;
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
