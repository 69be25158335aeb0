// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Environment-driven server configuration

use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{info, warn};

/// Runtime configuration, read once at startup
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Root of the journal store
    pub data_dir: PathBuf,
    /// Templates and layout tables
    pub assets_dir: PathBuf,
    /// Where rendered forms are written and served from
    pub output_dir: PathBuf,
    /// Font used by the renderer
    pub font_file: PathBuf,
}

impl Config {
    pub fn load() -> Self {
        let data_dir: PathBuf = try_load("FEDREG_DATA_DIR", "data");
        let output_dir = env::var("FEDREG_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join("forms"));
        let font_file = env::var("FEDREG_FONT")
            .map(PathBuf::from)
            .or_else(|_| {
                fedreg_render::find_system_font().ok_or_else(|| {
                    warn!("FEDREG_FONT not set and no system font found");
                })
            })
            .unwrap_or_else(|_| PathBuf::from("assets/DejaVuSans.ttf"));

        Self {
            port: try_load("FEDREG_PORT", "8080"),
            data_dir,
            assets_dir: try_load("FEDREG_ASSETS_DIR", "assets"),
            output_dir,
            font_file,
        }
    }
}

fn try_load<T: FromStr + Default>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    raw.parse().unwrap_or_else(|e| {
        warn!("Invalid {key} value {raw}: {e}, using default");
        default.parse().unwrap_or_default()
    })
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
