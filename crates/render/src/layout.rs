// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Template layout tables
//!
//! A layout names the background image and lists where each field is
//! drawn: position, size, color, alignment, and an optional value
//! transform. Layouts live next to the templates as TOML files.

use crate::renderer::RenderError;
use chrono::NaiveDate;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;

/// Horizontal anchoring of a drawn value around its x coordinate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl Align {
    /// Left edge of the text given its anchor x and rendered width
    pub fn anchor_x(&self, x: i32, text_width: i32) -> i32 {
        match self {
            Align::Left => x,
            Align::Center => x - text_width / 2,
            Align::Right => x - text_width,
        }
    }
}

/// Value transform applied before drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transform {
    /// Draw the value in capitals
    Uppercase,
    /// Reformat an ISO date as `02 Mar 2014`; non-dates pass through
    DateLong,
}

impl Transform {
    pub fn apply(&self, value: &str) -> String {
        match self {
            Transform::Uppercase => value.to_uppercase(),
            Transform::DateLong => NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .map(|d| d.format("%d %b %Y").to_string())
                .unwrap_or_else(|_| value.to_string()),
        }
    }
}

fn default_color() -> [u8; 3] {
    [0, 0, 0]
}

/// One field's draw position in a template
#[derive(Debug, Clone, Deserialize)]
pub struct FieldSpec {
    /// Key into the render values map; `entry_id` is always available
    pub field: String,
    pub x: i32,
    pub y: i32,
    pub size: f32,
    #[serde(default = "default_color")]
    pub color: [u8; 3],
    #[serde(default)]
    pub align: Align,
    #[serde(default)]
    pub transform: Option<Transform>,
}

/// A template's layout table
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateLayout {
    /// Background image file, relative to the assets directory
    pub template: String,
    pub fields: Vec<FieldSpec>,
}

impl TemplateLayout {
    /// Load a layout table from a TOML file
    pub fn load(path: &Path) -> Result<Self, RenderError> {
        let text = match fs::read_to_string(path) {
            Ok(t) => t,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(RenderError::LayoutMissing(path.to_path_buf()))
            }
            Err(e) => return Err(e.into()),
        };
        toml::from_str(&text).map_err(|e| RenderError::LayoutInvalid {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
