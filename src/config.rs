//! TOML configuration.
//!
//! ```toml
//! disk = "dvd5"
//!
//! [render]
//! extent = 100.0
//! tolerance = 4.0
//! command = "cubic"
//!
//! [render.bad]
//! color = "crimson"
//!
//! [[profiles]]
//! name = "dvd5-wide"
//! radius_inner = 22.0
//! radius_outer = 60.0
//! data_radius_inner = 24.0
//! data_radius_outer = 58.5
//! unit_length = 0.00251953125
//! pitch = 0.00074
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::disk::{DiskCatalog, DiskProfile};
use crate::error::{ConfigError, Result};
use crate::mapfile::Category;
use crate::render::sample::DEFAULT_TOLERANCE;
use crate::render::{Sampling, SceneOptions, SmoothCommand, StrokeStyle};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Profile to render with when none is given on the command line.
    pub disk: Option<String>,
    pub render: RenderConfig,
    pub profiles: Vec<DiskProfile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub extent: f64,
    /// Spacing of sampled points along the track, in millimetres.
    pub tolerance: f64,
    /// Fixed number of steps per interval; overrides `tolerance` when set.
    pub segments: Option<usize>,
    pub command: SmoothCommand,
    pub border_width: f64,
    pub marker_radius: f64,
    pub bad: StyleOverride,
    pub unknown: StyleOverride,
}

impl Default for RenderConfig {
    fn default() -> Self {
        let scene = SceneOptions::default();
        Self {
            extent: scene.extent,
            tolerance: DEFAULT_TOLERANCE,
            segments: None,
            command: scene.command,
            border_width: scene.border_width,
            marker_radius: scene.marker_radius,
            bad: StyleOverride::default(),
            unknown: StyleOverride::default(),
        }
    }
}

/// Partial stroke style; unset fields keep the category default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleOverride {
    pub color: Option<String>,
    pub width: Option<f64>,
    pub opacity: Option<f64>,
}

impl StyleOverride {
    fn apply(&self, category: Category) -> StrokeStyle {
        let mut style = StrokeStyle::for_category(category);
        if let Some(color) = &self.color {
            style.color.clone_from(color);
        }
        if let Some(width) = self.width {
            style.width = width;
        }
        if let Some(opacity) = self.opacity {
            style.opacity = opacity;
        }
        style
    }
}

impl RenderConfig {
    /// Scene options described by this config.
    #[must_use]
    pub fn scene_options(&self) -> SceneOptions {
        let sampling = match self.segments {
            Some(n) => Sampling::Count(n),
            None => Sampling::Tolerance(self.tolerance),
        };
        SceneOptions {
            extent: self.extent,
            sampling,
            command: self.command,
            bad: self.bad.apply(Category::Bad),
            unknown: self.unknown.apply(Category::Unknown),
            border_width: self.border_width,
            marker_radius: self.marker_radius,
        }
    }
}

impl Config {
    /// Loads a config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML for
    /// this config.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config)
    }

    /// Built-in disc profiles plus those defined in this config.
    #[must_use]
    pub fn catalog(&self) -> DiskCatalog {
        DiskCatalog::new().with_profiles(self.profiles.iter().cloned())
    }
}
