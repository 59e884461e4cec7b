use thiserror::Error;

#[derive(Debug, Error)]
pub enum GridError {
    #[error("malformed raster: {0}")]
    Format(String),
    #[error("invalid grid configuration: {0}")]
    Config(String),
    #[error(
        "world point ({x}, {y}) maps to cell (row {row}, col {col}) outside a {rows}x{cols} grid"
    )]
    OutOfBounds {
        x: f32,
        y: f32,
        row: i64,
        col: i64,
        rows: usize,
        cols: usize,
    },
    #[error("cell ({row}, {col}) is outside a {rows}x{cols} matrix")]
    CellOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    #[error("expected a point with 2 coordinates, got {0}")]
    PointArity(usize),
    #[error("{0} was not computed when the grid was built")]
    Unavailable(&'static str),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, GridError>;
