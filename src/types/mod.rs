pub mod constants;
pub mod error;
pub mod info;

pub use constants::*;
pub use error::{GridError, Result};
pub use info::{GridInfo, LoadOptions};
