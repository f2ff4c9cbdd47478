//! Ordnance Survey raster tile sources.
//!
//! A [`TileSource`] turns host tile addresses (column, row, zoom) into request
//! URLs for one of the two Ordnance Survey service generations:
//!
//! - OpenSpace GetMap, addressed by the lower-left corner of a bbox
//! - OS Maps API GetTile, addressed by tile matrix row and column
//!
//! ```
//! use osgrid_tiles::{tile_source, Protocol, TileAddress};
//!
//! let source = tile_source("my-api-key", Protocol::Matrix).unwrap();
//! let url = source.resolve_tile_url(&TileAddress::new(0, -6, 0)).unwrap();
//! assert!(url.ends_with("tileMatrix=EPSG%3A27700%3A0&tileRow=0&tileCol=0"));
//! ```

pub mod attribution;
pub mod config;
pub mod source;

pub use attribution::Attribution;
pub use config::{CrsConfig, TileSourceConfig};
pub use source::{tile_source, ResolvedTile, TileSource};

pub use osgrid_common::{
    BoundingBox, CrsDescriptor, ErrorCategory, Protocol, RowConvention, TileAddress, TileError,
    TilePosition, TileResult,
};
pub use osgrid_protocol::{RequestDescriptor, RequestParams};
