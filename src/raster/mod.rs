//! Binary grayscale raster input.
//!
//! Rasters decode to a [`RasterMatrix`]: one `f32` per pixel, normalized to
//! `[0.0, 1.0]` by the file's declared maximum sample value. Row 0 of the
//! matrix is the first row stored in the file.

pub mod pgm;

pub use pgm::{decode_pgm, decode_pgm_file, encode_pgm};

use crate::grid::Grid2d;

/// Normalized intensity samples, shape `(height, width)`.
pub type RasterMatrix = Grid2d<f32>;
