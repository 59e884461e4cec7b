use glam::Vec2;

use crate::grid::{CellIndex, CoordinateMapper, DistanceField, OccupancyMap};
use crate::inflation::inflate;
use crate::raster::RasterMatrix;
use crate::types::{GridError, GridInfo, LoadOptions, Result};

/// Three-way reading of a cell against both thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    /// `value <= free_threshold`.
    Free,
    /// Between the two thresholds.
    Unknown,
    /// `value > occupied_threshold`.
    Occupied,
}

/// Static dense occupancy grid.
///
/// Cell values are in `[0, 1]`, higher meaning more likely obstructed. The
/// grid is built once by [`OccupancyGrid::build`] and never changes
/// afterwards, so shared references can be queried from any thread.
#[derive(Debug, Clone)]
pub struct OccupancyGrid {
    data: RasterMatrix,
    mapper: CoordinateMapper,
    origin: [f32; 3],
    occupied_threshold: f32,
    free_threshold: f32,
    sdf: Option<DistanceField>,
}

impl OccupancyGrid {
    /// Turn a decoded raster into a grid.
    ///
    /// Steps, in order: invert (`v <- 1 - v`, skipped if `info.negate` or
    /// `options.negate`), inflate by `options.inflation` meters, then build
    /// the distance field if `options.compute_sdf`.
    pub fn build(raster: RasterMatrix, info: &GridInfo, options: &LoadOptions) -> Result<Self> {
        info.validate()?;
        if raster.rows() == 0 || raster.cols() == 0 {
            return Err(GridError::Format("raster has no cells".to_string()));
        }
        if let Some(((row, col), value)) = raster
            .iter_cells()
            .find(|(_, v)| !(0.0..=1.0).contains(*v))
        {
            return Err(GridError::Format(format!(
                "sample {value} at ({row}, {col}) is outside [0, 1]"
            )));
        }

        let mut data = raster;
        let invert = !(info.negate || options.negate);
        if invert {
            data = data.map(|v| 1.0 - v);
        }
        data = inflate(&data, options.inflation, info.resolution);

        let sdf = options
            .compute_sdf
            .then(|| DistanceField::compute(&data, info.free_threshold, info.resolution));

        let mapper = CoordinateMapper::new(info.resolution, data.rows(), data.cols());
        tracing::info!(
            rows = data.rows(),
            cols = data.cols(),
            resolution = info.resolution,
            inverted = invert,
            inflation = options.inflation,
            sdf = sdf.is_some(),
            "built occupancy grid"
        );

        Ok(Self {
            data,
            mapper,
            origin: info.origin,
            occupied_threshold: info.occupied_threshold,
            free_threshold: info.free_threshold,
            sdf,
        })
    }

    pub fn rows(&self) -> usize {
        self.data.rows()
    }

    pub fn cols(&self) -> usize {
        self.data.cols()
    }

    pub fn resolution(&self) -> f32 {
        self.mapper.resolution()
    }

    pub fn origin(&self) -> [f32; 3] {
        self.origin
    }

    pub fn occupied_threshold(&self) -> f32 {
        self.occupied_threshold
    }

    pub fn free_threshold(&self) -> f32 {
        self.free_threshold
    }

    /// Occupancy values after inversion and inflation.
    pub fn data(&self) -> &RasterMatrix {
        &self.data
    }

    pub fn sdf_field(&self) -> Option<&DistanceField> {
        self.sdf.as_ref()
    }

    pub fn has_sdf(&self) -> bool {
        self.sdf.is_some()
    }

    pub fn world_to_cell(&self, x: f32, y: f32) -> Result<CellIndex> {
        self.mapper.world_to_cell(Vec2::new(x, y))
    }

    pub fn cell_to_world(&self, cell: CellIndex) -> Option<Vec2> {
        self.mapper.cell_to_world(cell)
    }

    /// Occupancy value of the cell under `(x, y)`.
    pub fn value(&self, x: f32, y: f32) -> Result<f32> {
        let (row, col) = self.world_to_cell(x, y)?.offset();
        Ok(self.data.data()[self.data.index(row, col)])
    }

    /// Like [`is_occupied`](OccupancyMap::is_occupied) but tests against
    /// `occupied_threshold`, so cells in the unknown band read as free.
    pub fn is_occupied_strict(&self, x: f32, y: f32) -> Result<bool> {
        Ok(self.value(x, y)? > self.occupied_threshold)
    }

    pub fn classify(&self, x: f32, y: f32) -> Result<CellState> {
        let value = self.value(x, y)?;
        Ok(if value > self.occupied_threshold {
            CellState::Occupied
        } else if value <= self.free_threshold {
            CellState::Free
        } else {
            CellState::Unknown
        })
    }
}

impl OccupancyMap for OccupancyGrid {
    /// Occupied iff the cell value exceeds `free_threshold`: anything not
    /// confidently free counts as an obstacle.
    fn is_occupied(&self, x: f32, y: f32) -> Result<bool> {
        Ok(self.value(x, y)? > self.free_threshold)
    }

    fn sdf(&self, x: f32, y: f32) -> Result<f32> {
        let field = self
            .sdf
            .as_ref()
            .ok_or(GridError::Unavailable("signed distance field"))?;
        let (row, col) = self.world_to_cell(x, y)?.offset();
        Ok(field.grid().data()[field.grid().index(row, col)])
    }

    fn physical_size(&self) -> Vec2 {
        self.mapper.physical_size()
    }
}
