//! Map metadata and build options.

use std::path::Path;

use serde::Deserialize;

use crate::types::{
    DEFAULT_FREE_THRESH, DEFAULT_OCCUPIED_THRESH, DEFAULT_RESOLUTION, GridError, PGM_FILE_TYPE,
    Result,
};

/// Metadata describing how a raster becomes an occupancy grid.
///
/// This is the `config.yaml` record found in a map directory:
///
/// ```yaml
/// file_type: pgm
/// grid_file: map.pgm
/// resolution: 0.05
/// origin: [0.0, 0.0, 0.0]
/// negate: false
/// occupied_threshold: 0.65
/// free_threshold: 0.35
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GridInfo {
    pub file_type: String,
    /// Raster file, relative to the directory holding the config.
    pub grid_file: String,
    /// Meters per cell.
    #[serde(default = "default_resolution")]
    pub resolution: f32,
    /// Pose of the map origin `[x, y, yaw]`. Carried along, not used by queries.
    #[serde(default)]
    pub origin: [f32; 3],
    /// When true the raster is used as stored instead of being inverted.
    #[serde(default)]
    pub negate: bool,
    #[serde(
        default = "default_occupied_thresh",
        deserialize_with = "deserialize_threshold"
    )]
    pub occupied_threshold: f32,
    #[serde(
        default = "default_free_thresh",
        deserialize_with = "deserialize_threshold"
    )]
    pub free_threshold: f32,
}

fn default_resolution() -> f32 {
    DEFAULT_RESOLUTION
}

fn default_occupied_thresh() -> f32 {
    DEFAULT_OCCUPIED_THRESH
}

fn default_free_thresh() -> f32 {
    DEFAULT_FREE_THRESH
}

fn deserialize_threshold<'de, D>(deserializer: D) -> std::result::Result<f32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = f32::deserialize(deserializer)?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(serde::de::Error::custom(
            "thresholds must be in the range [0.0, 1.0]",
        ))
    }
}

impl Default for GridInfo {
    fn default() -> Self {
        Self {
            file_type: PGM_FILE_TYPE.to_string(),
            grid_file: String::new(),
            resolution: DEFAULT_RESOLUTION,
            origin: [0.0; 3],
            negate: false,
            occupied_threshold: DEFAULT_OCCUPIED_THRESH,
            free_threshold: DEFAULT_FREE_THRESH,
        }
    }
}

impl GridInfo {
    /// Metadata for an in-memory raster with the given resolution and default thresholds.
    pub fn with_resolution(resolution: f32) -> Self {
        Self {
            resolution,
            ..Default::default()
        }
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let info: GridInfo = serde_yaml::from_str(yaml)?;
        info.validate()?;
        Ok(info)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Check the fields serde cannot check on its own.
    pub fn validate(&self) -> Result<()> {
        if self.file_type != PGM_FILE_TYPE {
            return Err(GridError::Config(format!(
                "unsupported file_type {:?}, expected {:?}",
                self.file_type, PGM_FILE_TYPE
            )));
        }
        if !self.resolution.is_finite() || self.resolution <= 0.0 {
            return Err(GridError::Config(format!(
                "resolution must be a positive number of meters, got {}",
                self.resolution
            )));
        }
        for (name, value) in [
            ("occupied_threshold", self.occupied_threshold),
            ("free_threshold", self.free_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(GridError::Config(format!(
                    "{name} must be in [0.0, 1.0], got {value}"
                )));
            }
        }
        if self.free_threshold > self.occupied_threshold {
            return Err(GridError::Config(format!(
                "free_threshold {} exceeds occupied_threshold {}",
                self.free_threshold, self.occupied_threshold
            )));
        }
        Ok(())
    }
}

/// Per-load switches applied while building a grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadOptions {
    /// Obstacle growth radius in meters. Zero or negative disables inflation.
    pub inflation: f32,
    /// Use the raster as stored instead of inverting it. Combined with
    /// [`GridInfo::negate`]: either one being set skips the inversion.
    pub negate: bool,
    /// Build the distance field at construction so [`sdf`](crate::OccupancyMap::sdf) works.
    pub compute_sdf: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            inflation: 0.0,
            negate: false,
            compute_sdf: false,
        }
    }
}

impl LoadOptions {
    pub fn with_inflation(mut self, radius_m: f32) -> Self {
        self.inflation = radius_m;
        self
    }

    pub fn with_negate(mut self, negate: bool) -> Self {
        self.negate = negate;
        self
    }

    pub fn with_sdf(mut self) -> Self {
        self.compute_sdf = true;
        self
    }
}
