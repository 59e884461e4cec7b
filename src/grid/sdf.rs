//! Distance-to-nearest-obstacle field.
//!
//! Multi-source breadth-first search over the 4-connected cell graph, every
//! edge costing `resolution` meters. The result is a grid-geodesic
//! (Manhattan path) distance, **not** Euclidean: a cell one step diagonally
//! from an obstacle reads `2 * resolution`, not `sqrt(2) * resolution`.
//!
//! Obstacle cells read `0.0`. With no obstacle anywhere every cell reads
//! `f32::INFINITY`.

use std::collections::VecDeque;

use crate::grid::Grid2d;

const NEIGHBORS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

#[derive(Debug, Clone, PartialEq)]
pub struct DistanceField {
    /// Meters to the nearest obstacle, same shape as the occupancy data.
    data: Grid2d<f32>,
}

impl DistanceField {
    /// Seed every cell with `value > threshold` as an obstacle and flood outward.
    pub fn compute(occupancy: &Grid2d<f32>, threshold: f32, resolution: f32) -> Self {
        let (rows, cols) = occupancy.shape();
        let mut data = occupancy.map(|_| f32::INFINITY);
        let mut frontier = VecDeque::new();

        for ((row, col), &value) in occupancy.iter_cells() {
            if value > threshold {
                let idx = data.index(row, col);
                data.data_mut()[idx] = 0.0;
                frontier.push_back((row, col, 0.0f32));
            }
        }
        let seeds = frontier.len();

        while let Some((row, col, distance)) = frontier.pop_front() {
            let idx = data.index(row, col);
            if distance > data.data()[idx] {
                // Superseded by a shorter path enqueued later.
                continue;
            }

            let next = distance + resolution;
            for (dr, dc) in NEIGHBORS {
                let (Some(nr), Some(nc)) = (row.checked_add_signed(dr), col.checked_add_signed(dc))
                else {
                    continue;
                };
                if nr >= rows || nc >= cols {
                    continue;
                }

                let nidx = data.index(nr, nc);
                if next < data.data()[nidx] {
                    data.data_mut()[nidx] = next;
                    frontier.push_back((nr, nc, next));
                }
            }
        }

        tracing::debug!(rows, cols, seeds, "computed distance field");
        Self { data }
    }

    /// Distance in meters at a 0-based `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        self.data.get(row, col).copied()
    }

    pub fn grid(&self) -> &Grid2d<f32> {
        &self.data
    }
}
