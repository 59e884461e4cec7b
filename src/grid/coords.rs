//! World ↔ cell mapping.
//!
//! Convention, used everywhere in this crate:
//!
//! - world `x` (meters) selects the **column**, world `y` selects the **row**;
//! - cell indices are **1-based**: `col = floor(x / resolution) + 1`,
//!   `row = floor(y / resolution) + 1`;
//! - row 1 is the first row stored in the raster, column 1 its first column;
//! - world `(0, 0)` is the corner of cell `(1, 1)`.
//!
//! Indices outside `[1, rows] x [1, cols]` are errors, never clamped.

use glam::Vec2;

use crate::types::{GridError, Result};

/// 1-based cell index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellIndex {
    pub row: usize,
    pub col: usize,
}

impl CellIndex {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// 0-based `(row, col)` for matrix storage. Only valid for in-bounds indices.
    #[inline]
    pub(crate) fn offset(self) -> (usize, usize) {
        (self.row - 1, self.col - 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    resolution: f32,
    inv_resolution: f32,
    rows: usize,
    cols: usize,
}

impl CoordinateMapper {
    /// `resolution` must be positive and finite; callers validate it first.
    pub fn new(resolution: f32, rows: usize, cols: usize) -> Self {
        Self {
            resolution,
            inv_resolution: 1.0 / resolution,
            rows,
            cols,
        }
    }

    pub fn resolution(&self) -> f32 {
        self.resolution
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn world_to_cell(&self, point: Vec2) -> Result<CellIndex> {
        let out_of_bounds = |row: i64, col: i64| GridError::OutOfBounds {
            x: point.x,
            y: point.y,
            row,
            col,
            rows: self.rows,
            cols: self.cols,
        };

        if !point.is_finite() {
            return Err(out_of_bounds(0, 0));
        }

        let col = ((point.x * self.inv_resolution).floor() as i64).saturating_add(1);
        let row = ((point.y * self.inv_resolution).floor() as i64).saturating_add(1);
        if row < 1 || col < 1 || row > self.rows as i64 || col > self.cols as i64 {
            return Err(out_of_bounds(row, col));
        }

        Ok(CellIndex::new(row as usize, col as usize))
    }

    /// World position of the cell centre, or `None` outside the grid.
    pub fn cell_to_world(&self, cell: CellIndex) -> Option<Vec2> {
        if cell.row < 1 || cell.col < 1 || cell.row > self.rows || cell.col > self.cols {
            return None;
        }
        Some(Vec2::new(
            (cell.col as f32 - 0.5) * self.resolution,
            (cell.row as f32 - 0.5) * self.resolution,
        ))
    }

    /// `(width, height)` in meters: `(cols * resolution, rows * resolution)`.
    pub fn physical_size(&self) -> Vec2 {
        Vec2::new(
            self.cols as f32 * self.resolution,
            self.rows as f32 * self.resolution,
        )
    }
}
