pub mod coords;
pub mod grid2d;
pub mod occupancy;
pub mod sdf;
pub mod traits;

pub use coords::{CellIndex, CoordinateMapper};
pub use grid2d::Grid2d;
pub use occupancy::{CellState, OccupancyGrid};
pub use sdf::DistanceField;
pub use traits::OccupancyMap;
