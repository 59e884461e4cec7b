use crate::types::{GridError, Result};

/// Dense row-major matrix. Row 0 is the first row stored in the raster.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid2d<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T> Grid2d<T> {
    pub fn new(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        let expected_len = cell_count(rows, cols)?;
        if data.len() != expected_len {
            return Err(GridError::Format(format!(
                "data length {} does not match matrix size {}x{}",
                data.len(),
                rows,
                cols
            )));
        }

        Ok(Self { rows, cols, data })
    }

    pub fn filled(rows: usize, cols: usize, value: T) -> Result<Self>
    where
        T: Clone,
    {
        let len = cell_count(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            data: vec![value; len],
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(&self.data[self.index(row, col)])
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        let idx = self.index(row, col);
        Some(&mut self.data[idx])
    }

    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        match self.get_mut(row, col) {
            Some(cell) => {
                *cell = value;
                Ok(())
            }
            None => Err(GridError::CellOutOfRange {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            }),
        }
    }

    #[inline]
    pub(crate) fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// One row as a slice.
    pub fn row(&self, row: usize) -> &[T] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Iterate `((row, col), &value)` in storage order.
    pub fn iter_cells(&self) -> impl Iterator<Item = ((usize, usize), &T)> + '_ {
        let cols = self.cols.max(1);
        self.data
            .iter()
            .enumerate()
            .map(move |(i, v)| ((i / cols, i % cols), v))
    }

    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid2d<U> {
        Grid2d {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(f).collect(),
        }
    }
}

fn cell_count(rows: usize, cols: usize) -> Result<usize> {
    rows.checked_mul(cols)
        .ok_or_else(|| GridError::Format(format!("matrix {rows}x{cols} is too large")))
}
