//! Common types shared across the osgrid tile source crates.

pub mod bbox;
pub mod crs;
pub mod error;
pub mod tile;

pub use bbox::{format_number, BoundingBox};
pub use crs::{CrsCode, CrsDescriptor};
pub use error::{ErrorCategory, TileError, TileResult};
pub use tile::{Protocol, RowConvention, TileAddress, TilePosition};
