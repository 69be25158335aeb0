// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! fedreg-render: form and certificate rendering
//!
//! Draws applicant fields onto fixed raster templates. Each template is
//! a background PNG plus a TOML layout table of draw positions — the
//! layout is data, the renderer is template-agnostic. Output files are
//! composed fully in memory and written through a temp name, so no
//! partial file ever carries a final name.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod layout;
mod renderer;

pub use layout::{Align, FieldSpec, TemplateLayout, Transform};
pub use renderer::{
    find_system_font, FormRenderer, ImageRenderer, RenderConfig, RenderError, RenderedArtifact,
};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeRenderer, RenderCall};
