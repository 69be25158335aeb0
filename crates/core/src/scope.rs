// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Caller scope for role-based record filtering
//!
//! The authentication middleware (outside this workspace) resolves the
//! caller to one of three scopes. Every read and delete passes through
//! `permits`; out-of-scope records behave as if they do not exist.

use crate::record::EntryRecord;
use serde::{Deserialize, Serialize};

/// Geographic visibility of the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum CallerScope {
    /// Super admin: sees everything
    Global,
    /// State admin: records within one state
    State { state: String },
    /// District admin: records within one district of one state
    District { state: String, district: String },
}

impl CallerScope {
    pub fn permits(&self, record: &EntryRecord) -> bool {
        match self {
            CallerScope::Global => true,
            CallerScope::State { state } => record.profile.state.eq_ignore_ascii_case(state),
            CallerScope::District { state, district } => {
                record.profile.state.eq_ignore_ascii_case(state)
                    && record.profile.district.eq_ignore_ascii_case(district)
            }
        }
    }
}

#[cfg(test)]
#[path = "scope_tests.rs"]
mod tests;
