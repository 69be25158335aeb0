// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Entry kinds
//!
//! Each registered entity kind binds its own identifier shape, sequence
//! name, and render template. One registration pipeline runs per kind.

use crate::ident::format_entry_id;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kinds of registration records the federation issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Cadet,
    Poomsae,
    Certificate,
}

impl EntryKind {
    /// All kinds, in issuance order
    pub const ALL: [EntryKind; 3] = [EntryKind::Cadet, EntryKind::Poomsae, EntryKind::Certificate];

    /// Name of the durable counter feeding this kind
    pub fn sequence_name(&self) -> &'static str {
        match self {
            EntryKind::Cadet => "cadet",
            EntryKind::Poomsae => "poomsae",
            EntryKind::Certificate => "certificate",
        }
    }

    /// Identifier prefix; empty for serial-style certificate numbers
    pub fn prefix(&self) -> &'static str {
        match self {
            EntryKind::Cadet => "CAD",
            EntryKind::Poomsae => "PMS",
            EntryKind::Certificate => "",
        }
    }

    /// Zero-padding width of the numeric part
    pub fn width(&self) -> usize {
        match self {
            EntryKind::Cadet | EntryKind::Poomsae => 6,
            EntryKind::Certificate => 9,
        }
    }

    /// Digit grouping for serial-style identifiers
    pub fn group(&self) -> Option<usize> {
        match self {
            EntryKind::Certificate => Some(3),
            _ => None,
        }
    }

    /// Layout table / template id used by the form renderer
    pub fn template_id(&self) -> &'static str {
        match self {
            EntryKind::Cadet => "cadet_form",
            EntryKind::Poomsae => "poomsae_form",
            EntryKind::Certificate => "certificate",
        }
    }

    /// Format an allocated sequence value as this kind's entry ID
    pub fn format_id(&self, value: u64) -> String {
        format_entry_id(self.prefix(), value, self.width(), self.group())
    }

    pub fn as_str(&self) -> &'static str {
        self.sequence_name()
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for unrecognized kind names in routes and imports
#[derive(Debug, thiserror::Error)]
#[error("unknown entry kind: {0}")]
pub struct UnknownKind(pub String);

impl FromStr for EntryKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cadet" => Ok(EntryKind::Cadet),
            "poomsae" => Ok(EntryKind::Poomsae),
            "certificate" => Ok(EntryKind::Certificate),
            other => Err(UnknownKind(other.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "kind_tests.rs"]
mod tests;
