//! Build grids from map directories, named presets, or in-memory parts.
//!
//! A map directory holds a `config.yaml` ([`GridInfo`]) next to the raster
//! it names in `grid_file`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::grid::OccupancyGrid;
use crate::raster::{RasterMatrix, decode_pgm, decode_pgm_file};
use crate::types::{GridError, GridInfo, LoadOptions, Result};

/// File name of the metadata inside a map directory.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Caller-owned table from preset names to map directories.
#[derive(Debug, Clone, Default)]
pub struct MapRegistry {
    maps: BTreeMap<String, PathBuf>,
}

impl MapRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_map(mut self, name: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        self.insert(name, dir);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, dir: impl Into<PathBuf>) {
        self.maps.insert(name.into(), dir.into());
    }

    pub fn get(&self, name: &str) -> Option<&Path> {
        self.maps.get(name).map(PathBuf::as_path)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.maps.keys().map(String::as_str)
    }
}

impl<N, P> FromIterator<(N, P)> for MapRegistry
where
    N: Into<String>,
    P: Into<PathBuf>,
{
    fn from_iter<I: IntoIterator<Item = (N, P)>>(iter: I) -> Self {
        let mut registry = Self::new();
        for (name, dir) in iter {
            registry.insert(name, dir);
        }
        registry
    }
}

/// Where a grid comes from.
#[derive(Debug, Clone)]
pub enum MapSource<'a> {
    /// A name looked up in a registry.
    Preset {
        registry: &'a MapRegistry,
        name: &'a str,
    },
    /// A map directory.
    Directory(&'a Path),
    /// Metadata plus the raw raster bytes it describes.
    Parts { info: &'a GridInfo, raster: &'a [u8] },
}

/// Load, decode and build a grid in one step.
pub fn load_grid(source: MapSource<'_>, options: &LoadOptions) -> Result<OccupancyGrid> {
    match source {
        MapSource::Preset { registry, name } => {
            let dir = registry.get(name).ok_or_else(|| {
                GridError::Config(format!(
                    "unknown map preset {name:?}, known presets: {:?}",
                    registry.names().collect::<Vec<_>>()
                ))
            })?;
            tracing::debug!(name, dir = %dir.display(), "resolved map preset");
            load_grid_dir(dir, options)
        }
        MapSource::Directory(dir) => load_grid_dir(dir, options),
        MapSource::Parts { info, raster } => {
            info.validate()?;
            let raster = decode_pgm(raster)?;
            OccupancyGrid::build(raster, info, options)
        }
    }
}

/// Load the map stored in `dir`.
pub fn load_grid_dir(dir: impl AsRef<Path>, options: &LoadOptions) -> Result<OccupancyGrid> {
    let dir = dir.as_ref();
    let config_path = dir.join(CONFIG_FILE_NAME);
    let info = GridInfo::from_file(&config_path)?;

    let raster_path = resolve_raster_path(dir, &info.grid_file);
    tracing::info!(
        config = %config_path.display(),
        raster = %raster_path.display(),
        "loading map"
    );
    let raster: RasterMatrix = decode_pgm_file(&raster_path)?;

    OccupancyGrid::build(raster, &info, options)
}

fn resolve_raster_path(dir: &Path, raster_ref: &str) -> PathBuf {
    let raster_path = PathBuf::from(raster_ref);
    if raster_path.is_absolute() {
        return raster_path;
    }
    dir.join(raster_path)
}
