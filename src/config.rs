//! Editor configuration.
//!
//! Settings live in `<config dir>/imagemap-edit/config.json`. Every field has
//! a default, so a partial file (or no file at all) is fine.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::ShapeKind;
use crate::session::DEFAULT_CLOSE_RADIUS;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color4 {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color4 {
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    pub fn to_egui(&self) -> egui::Color32 {
        egui::Color32::from_rgba_unmultiplied(
            (self.r * 255.0) as u8,
            (self.g * 255.0) as u8,
            (self.b * 255.0) as u8,
            (self.a * 255.0) as u8,
        )
    }

    /// Same color at a different opacity.
    pub fn with_alpha(&self, a: f32) -> egui::Color32 {
        Color4 { a, ..self.clone() }.to_egui()
    }

    fn clamp(&mut self) {
        for c in [&mut self.r, &mut self.g, &mut self.b, &mut self.a] {
            *c = (*c).clamp(0.0, 1.0);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// How close (in pixels) a click must land to the first vertex to close a
    /// polygon.
    pub close_radius: f32,
    pub default_tool: ShapeKind,
    pub stroke_width: f32,
    pub vertex_radius: f32,
    pub label_size: f32,
    /// Committed regions.
    pub region_color: Color4,
    /// Shapes still being drawn.
    pub draft_color: Color4,
    pub log_level: LogLevel,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            close_radius: DEFAULT_CLOSE_RADIUS,
            default_tool: ShapeKind::Rectangle,
            stroke_width: 2.0,
            vertex_radius: 5.0,
            label_size: 12.0,
            region_color: Color4::rgb(0x22, 0xc5, 0x5e),
            draft_color: Color4::rgb(0xf5, 0x9e, 0x0b),
            log_level: LogLevel::Info,
        }
    }
}

impl EditorConfig {
    pub fn default_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().ok_or(Error::NoConfigDir)?;
        Ok(dir.join("imagemap-edit").join("config.json"))
    }

    /// Load from `path`, or from the default location when `None`. A missing
    /// file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_path()?,
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        Self::from_json(&data)
    }

    pub fn from_json(data: &str) -> Result<Self> {
        let mut config: EditorConfig = serde_json::from_str(data)?;
        config.validate_and_clamp();
        Ok(config)
    }

    fn validate_and_clamp(&mut self) {
        if !(self.close_radius >= 1.0) {
            log::warn!("close_radius {} is too small, using 1.0", self.close_radius);
            self.close_radius = 1.0;
        }
        if !(self.stroke_width > 0.0) {
            self.stroke_width = 1.0;
        }
        if !(self.vertex_radius > 0.0) {
            self.vertex_radius = 1.0;
        }
        if !(self.label_size > 0.0) {
            self.label_size = 12.0;
        }
        self.region_color.clamp();
        self.draft_color.clamp();
    }
}
