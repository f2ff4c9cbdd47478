//! OS Maps API GetTile protocol (tile matrix generation).
//!
//! The matrix counts rows from the bottom of each level's finite grid, while
//! host addresses count from the top. Levels are not a power-of-two pyramid
//! over the same extent, so the per-zoom row count comes from the CRS table
//! instead of a formula.

use osgrid_common::{CrsDescriptor, TileAddress, TileError, TilePosition, TileResult};

use crate::params::RequestParams;

pub const DEFAULT_ENDPOINT: &str = "https://api2.ordnancesurvey.co.uk/mapping_api/v1/service/wmts";
pub const DEFAULT_VERSION: &str = "1.0.0";
pub const DEFAULT_FORMAT: &str = "image/png";
pub const DEFAULT_LAYER: &str = "Leisure 27700";

/// Name of the API key parameter.
pub const KEY_PARAM: &str = "key";

/// Names recomputed for every tile.
pub const COMPUTED_PARAMS: [&str; 3] = ["tileMatrix", "tileRow", "tileCol"];

/// Compute the matrix cell for a host tile address.
///
/// ```text
/// tileRow    = max_rows_by_zoom[zoom] + row + 1
/// tileCol    = column
/// tileMatrix = "<crs>:<zoom>"
/// ```
pub fn resolve_matrix(address: &TileAddress, crs: &CrsDescriptor) -> TileResult<TilePosition> {
    let max_row = crs.max_row(address.zoom)? as i64;

    let tile_row = max_row
        .checked_add(address.row)
        .and_then(|r| r.checked_add(1))
        .ok_or(TileError::CoordinateOverflow("tileRow"))?;

    Ok(TilePosition::Matrix {
        tile_matrix: tile_matrix_id(crs, address.zoom),
        tile_row,
        tile_col: address.column,
    })
}

/// TileMatrix identifier for a zoom level, e.g. `EPSG:27700:3`.
pub fn tile_matrix_id(crs: &CrsDescriptor, zoom: u32) -> String {
    format!("{}:{}", crs.code(), zoom)
}

/// Construction-time GetTile parameters.
#[derive(Debug, Clone)]
pub struct GetTileParams {
    pub key: String,
    pub format: String,
    pub version: String,
    pub layer: String,
    pub tile_matrix_set: String,
}

impl GetTileParams {
    pub fn new(key: impl Into<String>, crs: &CrsDescriptor) -> Self {
        Self {
            key: key.into(),
            format: DEFAULT_FORMAT.to_string(),
            version: DEFAULT_VERSION.to_string(),
            layer: DEFAULT_LAYER.to_string(),
            tile_matrix_set: crs.code().to_string(),
        }
    }

    /// Protocol-constant parameters in wire order.
    pub fn fixed_params(&self) -> RequestParams {
        RequestParams::new()
            .with(KEY_PARAM, self.key.as_str())
            .with("service", "WMTS")
            .with("request", "GetTile")
            .with("format", self.format.as_str())
            .with("version", self.version.as_str())
            .with("layer", self.layer.as_str())
            .with("tileMatrixSet", self.tile_matrix_set.as_str())
    }

    /// Per-tile parameters for a resolved matrix position.
    pub fn computed_params(&self, position: &TilePosition) -> TileResult<RequestParams> {
        match position {
            TilePosition::Matrix {
                tile_matrix,
                tile_row,
                tile_col,
            } => Ok(RequestParams::new()
                .with("tileMatrix", tile_matrix.as_str())
                .with("tileRow", tile_row.to_string())
                .with("tileCol", tile_col.to_string())),
            TilePosition::Bbox { .. } => Err(TileError::invalid_config(
                "protocol",
                "GetTile requests need a matrix position",
            )),
        }
    }
}
