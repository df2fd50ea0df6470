// Display and pipeline settings with file loading and fingerprinting
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use serde::Deserialize;

use crate::domain::chart::{Color, DatasetStyle};
use crate::domain::precision::DEFAULT_TOLERANCE;

const DEFAULT_FILL_COLOR: &str = "#3F51B5";

/// Cosmetic chart parameters. These affect styling only, never segmentation,
/// which is why their fingerprint is a separate cache-key component from the
/// series identity.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DisplaySettings {
    #[serde(default = "default_fill_color")]
    pub fill_color: String,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f32,
    #[serde(default)]
    pub draw_icons: bool,
    #[serde(default = "default_draw_filled")]
    pub draw_filled: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            fill_color: default_fill_color(),
            stroke_width: default_stroke_width(),
            draw_icons: false,
            draw_filled: default_draw_filled(),
        }
    }
}

impl DisplaySettings {
    /// Deterministic hash of the cosmetic parameters, used as the settings
    /// component of a cache key. Internal concern; never persisted.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.fill_color.hash(&mut hasher);
        self.stroke_width.to_bits().hash(&mut hasher);
        self.draw_icons.hash(&mut hasher);
        self.draw_filled.hash(&mut hasher);
        hasher.finish()
    }

    pub fn dataset_style(&self) -> DatasetStyle {
        DatasetStyle {
            fill_color: Color::from_hex(&self.fill_color).unwrap_or_else(|| {
                tracing::warn!(fill_color = %self.fill_color, "unparseable fill color, using default");
                Color::from_hex(DEFAULT_FILL_COLOR).unwrap_or(Color(0xFF3F51B5))
            }),
            stroke_width: self.stroke_width,
            draw_icons: self.draw_icons,
            draw_filled: self.draw_filled,
        }
    }
}

/// Computation parameters for the segmentation pipeline and its worker pool.
#[derive(Debug, Deserialize, Clone)]
pub struct PipelineSettings {
    #[serde(default = "default_tolerance")]
    pub equality_tolerance: f64,
    #[serde(default = "default_workers")]
    pub max_compute_workers: usize,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            equality_tolerance: default_tolerance(),
            max_compute_workers: default_workers(),
        }
    }
}

pub fn load_display_settings() -> anyhow::Result<DisplaySettings> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/display").required(false))
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn load_pipeline_settings() -> anyhow::Result<PipelineSettings> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/pipeline").required(false))
        .build()?;

    Ok(settings.try_deserialize()?)
}

fn default_fill_color() -> String {
    DEFAULT_FILL_COLOR.to_string()
}

fn default_stroke_width() -> f32 {
    2.0
}

fn default_draw_filled() -> bool {
    true
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}
