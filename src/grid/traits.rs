use glam::Vec2;

use crate::types::{GridError, Result};

/// Read-only spatial queries every grid backend answers.
///
/// World coordinates are meters; `x` runs along columns and `y` along rows
/// (see [`coords`](crate::grid::coords)).
pub trait OccupancyMap {
    /// Whether the cell under `(x, y)` is an obstacle.
    fn is_occupied(&self, x: f32, y: f32) -> Result<bool>;

    /// Distance in meters from `(x, y)`'s cell to the nearest obstacle cell.
    fn sdf(&self, x: f32, y: f32) -> Result<f32>;

    /// `(width, height)` of the mapped area in meters.
    fn physical_size(&self) -> Vec2;

    /// [`is_occupied`](Self::is_occupied) for a `(x, y)` tuple, `[x, y]` array or [`Vec2`].
    fn is_occupied_at(&self, point: impl Into<Vec2>) -> Result<bool>
    where
        Self: Sized,
    {
        let point = point.into();
        self.is_occupied(point.x, point.y)
    }

    /// [`sdf`](Self::sdf) for a `(x, y)` tuple, `[x, y]` array or [`Vec2`].
    fn sdf_at(&self, point: impl Into<Vec2>) -> Result<f32>
    where
        Self: Sized,
    {
        let point = point.into();
        self.sdf(point.x, point.y)
    }

    /// [`is_occupied`](Self::is_occupied) for a `[x, y]` slice or `Vec<f32>`.
    ///
    /// Any other length is [`GridError::PointArity`].
    fn is_occupied_seq(&self, point: impl AsRef<[f32]>) -> Result<bool>
    where
        Self: Sized,
    {
        let [x, y] = point_pair(point.as_ref())?;
        self.is_occupied(x, y)
    }

    /// [`sdf`](Self::sdf) for a `[x, y]` slice or `Vec<f32>`.
    fn sdf_seq(&self, point: impl AsRef<[f32]>) -> Result<f32>
    where
        Self: Sized,
    {
        let [x, y] = point_pair(point.as_ref())?;
        self.sdf(x, y)
    }
}

fn point_pair(point: &[f32]) -> Result<[f32; 2]> {
    <[f32; 2]>::try_from(point).map_err(|_| GridError::PointArity(point.len()))
}
