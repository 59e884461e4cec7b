//! Static 2D occupancy grids for robot navigation.
//!
//! A grid is built once from a binary PGM raster plus its metadata
//! ([`GridInfo`]), optionally with inflated obstacles and a precomputed
//! distance field, and is read-only afterwards:
//!
//! ```no_run
//! use gridmap::{LoadOptions, MapSource, OccupancyMap, load_grid};
//!
//! let options = LoadOptions::default().with_inflation(0.2).with_sdf();
//! let grid = load_grid(MapSource::Directory("maps/office".as_ref()), &options)?;
//!
//! if !grid.is_occupied(1.25, 0.5)? {
//!     println!("clearance: {} m", grid.sdf(1.25, 0.5)?);
//! }
//! # Ok::<(), gridmap::GridError>(())
//! ```
//!
//! World `x` selects the column and world `y` the row; see [`grid::coords`].

pub mod grid;
pub mod inflation;
pub mod loaders;
pub mod raster;
pub mod types;

pub use grid::{CellIndex, CellState, DistanceField, Grid2d, OccupancyGrid, OccupancyMap};
pub use loaders::{MapRegistry, MapSource, load_grid, load_grid_dir};
pub use raster::RasterMatrix;
pub use types::{GridError, GridInfo, LoadOptions, Result};
