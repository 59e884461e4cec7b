/// Default cell edge length in meters.
pub const DEFAULT_RESOLUTION: f32 = 0.1;

pub const DEFAULT_OCCUPIED_THRESH: f32 = 0.65;
pub const DEFAULT_FREE_THRESH: f32 = 0.35;

/// The only raster `file_type` a map config may name.
pub const PGM_FILE_TYPE: &str = "pgm";

/// Largest sample value a binary graymap may declare.
pub const PGM_MAX_MAXVAL: u32 = 65535;
