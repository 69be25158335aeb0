// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! fedreg-engine: registration orchestration
//!
//! Runs the per-kind registration pipeline (validate, allocate, render,
//! persist, with bounded collision retry) and the scope-filtered query
//! operations the HTTP layer exposes.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod error;
mod import;
mod pipeline;
mod registry;

pub use error::EngineError;
pub use import::{import_rows, RowOutcome};
pub use pipeline::{RegistrationPipeline, DEFAULT_MAX_ATTEMPTS, FORMS_MOUNT};
pub use registry::Registry;
