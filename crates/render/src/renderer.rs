// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The raster form renderer

use crate::layout::TemplateLayout;
use ab_glyph::{FontVec, PxScale};
use async_trait::async_trait;
use chrono::Utc;
use fedreg_core::EntryKind;
use image::Rgba;
use imageproc::drawing::{draw_text_mut, text_size};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Errors from form rendering.
///
/// Missing templates, layouts, and fonts are deployment problems; the
/// HTTP layer maps them to 5xx and logs them loudly.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template image not found: {0}")]
    TemplateMissing(PathBuf),
    #[error("layout table not found: {0}")]
    LayoutMissing(PathBuf),
    #[error("invalid layout table {path}: {message}")]
    LayoutInvalid { path: PathBuf, message: String },
    #[error("font file not found: {0}")]
    FontMissing(PathBuf),
    #[error("font file not parseable: {0}")]
    FontInvalid(PathBuf),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// A rendered output file, referenced by record rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArtifact {
    pub file_name: String,
    pub path: PathBuf,
}

/// Renders a field-value map onto a kind's template
#[async_trait]
pub trait FormRenderer: Clone + Send + Sync + 'static {
    async fn render(
        &self,
        kind: EntryKind,
        entry_id: &str,
        values: &HashMap<String, String>,
    ) -> Result<RenderedArtifact, RenderError>;
}

/// Where templates, layouts, fonts, and output live
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Directory holding `{template_id}.toml` layouts and their images
    pub assets_dir: PathBuf,
    /// Directory rendered artifacts are written to; created if absent
    pub output_dir: PathBuf,
    /// TTF/OTF font used for all drawn text
    pub font_file: PathBuf,
}

#[derive(Debug)]
struct RendererInner {
    assets_dir: PathBuf,
    output_dir: PathBuf,
    font: FontVec,
}

/// Template-driven raster renderer
#[derive(Clone, Debug)]
pub struct ImageRenderer {
    inner: Arc<RendererInner>,
}

impl ImageRenderer {
    /// Load the font and prepare the output directory
    pub fn new(config: RenderConfig) -> Result<Self, RenderError> {
        let bytes = match fs::read(&config.font_file) {
            Ok(b) => b,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(RenderError::FontMissing(config.font_file))
            }
            Err(e) => return Err(e.into()),
        };
        let font = FontVec::try_from_vec(bytes)
            .map_err(|_| RenderError::FontInvalid(config.font_file.clone()))?;

        fs::create_dir_all(&config.output_dir)?;

        Ok(Self {
            inner: Arc::new(RendererInner {
                assets_dir: config.assets_dir,
                output_dir: config.output_dir,
                font,
            }),
        })
    }

}

#[async_trait]
impl FormRenderer for ImageRenderer {
    async fn render(
        &self,
        kind: EntryKind,
        entry_id: &str,
        values: &HashMap<String, String>,
    ) -> Result<RenderedArtifact, RenderError> {
        // Decode, compose, and encode are CPU/disk work; keep them off
        // the async workers.
        let inner = Arc::clone(&self.inner);
        let entry_id = entry_id.to_string();
        let values = values.clone();
        tokio::task::spawn_blocking(move || inner.compose(kind, &entry_id, &values))
            .await
            .map_err(|e| RenderError::Io(io::Error::other(e)))?
    }
}

impl RendererInner {
    fn layout_path(&self, kind: EntryKind) -> PathBuf {
        self.assets_dir.join(format!("{}.toml", kind.template_id()))
    }

    fn compose(
        &self,
        kind: EntryKind,
        entry_id: &str,
        values: &HashMap<String, String>,
    ) -> Result<RenderedArtifact, RenderError> {
        let layout = TemplateLayout::load(&self.layout_path(kind))?;

        let template_path = self.assets_dir.join(&layout.template);
        if !template_path.is_file() {
            return Err(RenderError::TemplateMissing(template_path));
        }
        let mut canvas = image::open(&template_path)?.to_rgba8();

        // Compose fully in memory; nothing touches disk until the whole
        // image is drawn.
        for spec in &layout.fields {
            // The identifier is always drawable; everything else comes
            // from the caller's value map.
            let raw = if spec.field == "entry_id" {
                entry_id
            } else {
                match values.get(&spec.field) {
                    Some(v) => v.as_str(),
                    None => continue,
                }
            };
            let text = match spec.transform {
                Some(t) => t.apply(raw),
                None => raw.to_string(),
            };
            let scale = PxScale::from(spec.size);
            let (width, _) = text_size(scale, &self.font, &text);
            let x = spec.align.anchor_x(spec.x, width as i32);
            let color = Rgba([spec.color[0], spec.color[1], spec.color[2], 255]);
            draw_text_mut(&mut canvas, color, x, spec.y, scale, &self.font, &text);
        }

        let stamp = Utc::now().format("%Y%m%d%H%M%S%3f");
        let file_name = format!("{}_{}_{}.png", kind.as_str(), entry_id, stamp);
        let final_path = self.output_dir.join(&file_name);
        let tmp_path = self.output_dir.join(format!(".{file_name}.tmp"));

        canvas.save_with_format(&tmp_path, image::ImageFormat::Png)?;
        if let Err(e) = fs::rename(&tmp_path, &final_path) {
            // Leave no stray temp file with a near-final name behind.
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        tracing::debug!(kind = %kind, entry_id, file = %file_name, "form rendered");

        Ok(RenderedArtifact {
            file_name,
            path: final_path,
        })
    }
}

/// Probe for a usable TTF font on the host, for tests and local dev
pub fn find_system_font() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("FEDREG_FONT") {
        let path = PathBuf::from(path);
        if path.is_file() {
            return Some(path);
        }
    }
    const CANDIDATES: [&str; 4] = [
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/System/Library/Fonts/Supplemental/Arial.ttf",
    ];
    CANDIDATES
        .iter()
        .map(Path::new)
        .find(|p| p.is_file())
        .map(Path::to_path_buf)
}

#[cfg(test)]
#[path = "renderer_tests.rs"]
mod tests;
