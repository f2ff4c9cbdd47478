//! Ordnance Survey tile request protocols.
//!
//! Supports:
//! - OpenSpace GetMap (legacy tiled WMS addressed by bbox corner)
//! - OS Maps API GetTile (WMTS 1.0.0 KVP binding)

pub mod getmap;
pub mod params;
pub mod resolver;
pub mod wmts;

pub use getmap::{resolve_bbox, GetMapParams};
pub use params::{compose, RequestDescriptor, RequestParams};
pub use resolver::{computed_param_names, resolve, ProtocolParams};
pub use wmts::{resolve_matrix, tile_matrix_id, GetTileParams};
