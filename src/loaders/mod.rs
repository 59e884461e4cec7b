pub mod map_dir;

pub use map_dir::{CONFIG_FILE_NAME, MapRegistry, MapSource, load_grid, load_grid_dir};
