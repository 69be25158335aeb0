// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake renderer for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use crate::renderer::{FormRenderer, RenderError, RenderedArtifact};
use async_trait::async_trait;
use fedreg_core::EntryKind;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Recorded render call
#[derive(Debug, Clone)]
pub struct RenderCall {
    pub kind: EntryKind,
    pub entry_id: String,
    pub values: HashMap<String, String>,
}

/// Fake renderer that fabricates artifact names without touching disk
#[derive(Clone, Default)]
pub struct FakeRenderer {
    calls: Arc<Mutex<Vec<RenderCall>>>,
    fail_next: Arc<AtomicBool>,
}

impl FakeRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next render call fail with a missing-template error
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<RenderCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl FormRenderer for FakeRenderer {
    async fn render(
        &self,
        kind: EntryKind,
        entry_id: &str,
        values: &HashMap<String, String>,
    ) -> Result<RenderedArtifact, RenderError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(RenderCall {
                kind,
                entry_id: entry_id.to_string(),
                values: values.clone(),
            });

        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(RenderError::TemplateMissing(PathBuf::from(format!(
                "{}.png",
                kind.template_id()
            ))));
        }

        let file_name = format!("{}_{}_fake.png", kind.as_str(), entry_id);
        Ok(RenderedArtifact {
            path: PathBuf::from("fake-out").join(&file_name),
            file_name,
        })
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
