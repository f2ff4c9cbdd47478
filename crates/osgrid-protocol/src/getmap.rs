//! OpenSpace GetMap protocol (legacy bounding-box generation).
//!
//! The service is a tiled WMS: it only reads the lower-left corner of BBOX
//! and takes the extent from WIDTH/HEIGHT. LAYERS carries the resolution
//! (metres per pixel) of the requested level.

use osgrid_common::{
    format_number, BoundingBox, CrsDescriptor, RowConvention, TileAddress, TileError, TilePosition,
    TileResult,
};

use crate::params::RequestParams;

pub const DEFAULT_ENDPOINT: &str = "http://openspace.ordnancesurvey.co.uk/osmapapi/ts";
pub const DEFAULT_VERSION: &str = "1.1.1";
pub const DEFAULT_FORMAT: &str = "image/png";
/// Referring site sent as `URL` when the caller does not register one.
pub const DEFAULT_API_URL: &str = "file:///";

/// Name of the API key parameter.
pub const KEY_PARAM: &str = "KEY";

/// Names recomputed for every tile.
pub const COMPUTED_PARAMS: [&str; 4] = ["WIDTH", "HEIGHT", "BBOX", "LAYERS"];

/// Compute the lower-left bbox corner for a host tile address.
///
/// ```text
/// span = tile_size * resolutions[zoom]
/// x0   = span * column
/// y0   = span * offset(row)     // -1 - row for RowConvention::Flipped
/// ```
pub fn resolve_bbox(
    address: &TileAddress,
    crs: &CrsDescriptor,
    convention: RowConvention,
) -> TileResult<TilePosition> {
    let resolution = crs.resolution(address.zoom)?;
    let span = crs.tile_size() as f64 * resolution;

    let x0 = span * address.column as f64;
    let y0 = span * convention.offset(address.row)? as f64;

    if !x0.is_finite() || !y0.is_finite() {
        return Err(TileError::CoordinateOverflow("bbox corner"));
    }

    Ok(TilePosition::Bbox {
        bbox: BoundingBox::lower_left(x0, y0),
        resolution,
    })
}

/// Construction-time GetMap parameters.
#[derive(Debug, Clone)]
pub struct GetMapParams {
    pub key: String,
    pub api_url: String,
    pub format: String,
    pub version: String,
    pub tile_size: u32,
}

impl GetMapParams {
    pub fn new(key: impl Into<String>, tile_size: u32) -> Self {
        Self {
            key: key.into(),
            api_url: DEFAULT_API_URL.to_string(),
            format: DEFAULT_FORMAT.to_string(),
            version: DEFAULT_VERSION.to_string(),
            tile_size,
        }
    }

    /// Protocol-constant parameters in wire order.
    pub fn fixed_params(&self) -> RequestParams {
        let size = self.tile_size.to_string();
        RequestParams::new()
            .with("SERVICE", "WMS")
            .with("REQUEST", "GetMap")
            .with("VERSION", self.version.as_str())
            .with("FORMAT", self.format.as_str())
            .with(KEY_PARAM, self.key.as_str())
            .with("URL", self.api_url.as_str())
            .with("WIDTH", size.as_str())
            .with("HEIGHT", size)
    }

    /// Per-tile parameters for a resolved bbox position.
    pub fn computed_params(&self, position: &TilePosition) -> TileResult<RequestParams> {
        match position {
            TilePosition::Bbox { bbox, resolution } => {
                let size = self.tile_size.to_string();
                Ok(RequestParams::new()
                    .with("WIDTH", size.as_str())
                    .with("HEIGHT", size)
                    .with("BBOX", bbox.to_wms_string())
                    .with("LAYERS", format_number(*resolution)))
            }
            TilePosition::Matrix { .. } => Err(TileError::invalid_config(
                "protocol",
                "GetMap requests need a bbox position",
            )),
        }
    }
}
