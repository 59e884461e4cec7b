//! Obstacle inflation by box-filter dilation.
//!
//! The matrix is convolved with a `k x k` all-ones kernel, where
//! `k = ceil(radius / resolution)`, and the result is clamped to `[0, 1]`.
//! Of the full `(rows + k - 1) x (cols + k - 1)` convolution, the window
//! starting at index `ceil(k / 2) - 1` is kept, so the output has the input's
//! shape and cell `(r, c)` sums the input rows `r - (k - 1 - h) ..= r + h`
//! (and likewise columns) with `h = ceil(k / 2) - 1`. Odd kernels are
//! centered on the cell; even kernels reach one cell further towards index 0.
//! A kernel of 1 leaves the matrix unchanged.

use crate::raster::RasterMatrix;

/// Convert an inflation radius in world units (meters) to a kernel side in cells.
///
/// Returns `ceil(radius / resolution)`. If resolution is zero or negative, or
/// if the radius is non-positive, returns 0.
#[inline]
pub fn inflation_radius_to_cells(radius_m: f32, resolution: f32) -> usize {
    if resolution <= 0.0 || radius_m <= 0.0 || !radius_m.is_finite() {
        return 0;
    }
    (radius_m / resolution).ceil() as usize
}

/// Grow obstacles (high values) of `source` by `radius_m` meters.
///
/// A radius that rounds to fewer than two cells returns an unchanged copy.
pub fn inflate(source: &RasterMatrix, radius_m: f32, resolution: f32) -> RasterMatrix {
    let kernel = inflation_radius_to_cells(radius_m, resolution);
    if kernel <= 1 {
        return source.clone();
    }

    let inflated = box_dilate(source, kernel);
    tracing::debug!(
        radius_m,
        kernel,
        rows = source.rows(),
        cols = source.cols(),
        "inflated obstacles"
    );
    inflated
}

/// Same-shape box-kernel convolution of side `kernel`, clamped to `[0, 1]`.
pub fn box_dilate(source: &RasterMatrix, kernel: usize) -> RasterMatrix {
    let (rows, cols) = source.shape();
    if kernel <= 1 || rows == 0 || cols == 0 {
        return source.clone();
    }

    let after = (kernel - 1) / 2;
    let before = kernel - 1 - after;

    // The kernel is separable: sum along rows, then along columns.
    let mut horizontal = source.clone();
    for row in 0..rows {
        let sums = window_sums(source.row(row), before, after);
        let start = row * cols;
        horizontal.data_mut()[start..start + cols].copy_from_slice(&sums);
    }

    let mut out = horizontal.clone();
    let mut column = vec![0.0f32; rows];
    for col in 0..cols {
        for (row, value) in column.iter_mut().enumerate() {
            *value = horizontal.data()[row * cols + col];
        }
        let sums = window_sums(&column, before, after);
        for (row, sum) in sums.into_iter().enumerate() {
            out.data_mut()[row * cols + col] = sum.clamp(0.0, 1.0);
        }
    }

    out
}

/// `out[i] = sum(line[i - before ..= i + after])`, truncated at the ends.
///
/// Summed directly, left to right, so a wider window never yields a smaller
/// sum for non-negative input.
fn window_sums(line: &[f32], before: usize, after: usize) -> Vec<f32> {
    let n = line.len();
    (0..n)
        .map(|i| {
            let lo = i.saturating_sub(before);
            let hi = (i + after).min(n - 1);
            line[lo..=hi].iter().sum::<f32>()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raster(rows: usize, cols: usize, obstacles: &[(usize, usize)]) -> RasterMatrix {
        let mut grid = RasterMatrix::filled(rows, cols, 0.0).unwrap();
        for &(row, col) in obstacles {
            grid.set(row, col, 1.0).unwrap();
        }
        grid
    }

    fn occupied_cells(grid: &RasterMatrix) -> Vec<(usize, usize)> {
        grid.iter_cells()
            .filter(|(_, v)| **v > 0.0)
            .map(|(pos, _)| pos)
            .collect()
    }

    #[test]
    fn radius_to_cells_basic() {
        assert_eq!(inflation_radius_to_cells(0.5, 0.1), 5);
        assert_eq!(inflation_radius_to_cells(0.05, 0.1), 1);
        assert_eq!(inflation_radius_to_cells(0.0, 0.1), 0);
        assert_eq!(inflation_radius_to_cells(1.0, 0.0), 0);
        assert_eq!(inflation_radius_to_cells(-1.0, 0.1), 0);
    }

    #[test]
    fn radius_to_cells_rounds_up() {
        // 0.15 / 0.1 = 1.5 → ceil → 2
        assert_eq!(inflation_radius_to_cells(0.15, 0.1), 2);
    }

    #[test]
    fn zero_and_negative_radius_are_noops() {
        let source = raster(4, 4, &[(1, 2)]);
        assert_eq!(inflate(&source, 0.0, 0.1), source);
        assert_eq!(inflate(&source, -3.0, 0.1), source);
    }

    #[test]
    fn kernel_of_one_is_identity() {
        let source = raster(4, 4, &[(0, 0), (3, 1)]);
        assert_eq!(box_dilate(&source, 1), source);
        assert_eq!(inflate(&source, 1.0, 1.0), source);
    }

    #[test]
    fn odd_kernel_stays_centered() {
        let source = raster(5, 5, &[(2, 2)]);
        let inflated = box_dilate(&source, 3);

        let mut expected = Vec::new();
        for row in 1..=3 {
            for col in 1..=3 {
                expected.push((row, col));
            }
        }
        assert_eq!(occupied_cells(&inflated), expected);
        assert!(inflated.data().iter().all(|v| *v == 0.0 || *v == 1.0));
    }

    #[test]
    fn even_kernel_reaches_towards_origin() {
        let source = raster(4, 4, &[(1, 1)]);
        let inflated = box_dilate(&source, 2);

        assert_eq!(occupied_cells(&inflated), vec![(1, 1), (1, 2), (2, 1), (2, 2)]);
    }

    #[test]
    fn obstacle_on_border_is_not_shifted() {
        let source = raster(4, 4, &[(0, 0)]);
        let inflated = box_dilate(&source, 3);

        assert_eq!(occupied_cells(&inflated), vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn overlapping_sums_are_clamped() {
        let source = RasterMatrix::filled(3, 3, 0.6).unwrap();
        let inflated = box_dilate(&source, 3);

        assert!(inflated.data().iter().all(|v| *v == 1.0));
    }

    #[test]
    fn partial_values_accumulate() {
        let mut source = raster(1, 3, &[]);
        source.set(0, 0, 0.25).unwrap();
        source.set(0, 2, 0.5).unwrap();
        let inflated = box_dilate(&source, 3);

        assert_eq!(inflated.data(), &[0.25, 0.75, 0.5]);
    }

    #[test]
    fn larger_radius_never_shrinks_obstacles() {
        let source = raster(9, 9, &[(0, 4), (4, 4), (8, 1)]);
        let mut previous = source.clone();
        for kernel in 2..7 {
            let inflated = box_dilate(&source, kernel);
            for (a, b) in previous.data().iter().zip(inflated.data()) {
                assert!(b >= a, "kernel {kernel} shrank a cell");
            }
            previous = inflated;
        }
    }

    #[test]
    fn empty_grid_stays_free() {
        let source = RasterMatrix::filled(6, 6, 0.0).unwrap();
        let inflated = inflate(&source, 0.5, 0.1);
        assert!(inflated.data().iter().all(|v| *v == 0.0));
    }
}
