//! Tile addresses, protocol generations and resolver output.
//!
//! Host map widgets count tile rows from the top-left of the visible pyramid
//! with negative values above the reference row; the services count from
//! their own origin. The conversion lives in `osgrid-protocol`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{BoundingBox, TileError, TileResult};

/// A tile address as supplied by the host (z/x/y, rows top-down).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileAddress {
    /// Column (x)
    pub column: i64,
    /// Row (y), counted top-down, may be negative
    pub row: i64,
    /// Zoom level
    pub zoom: u32,
}

impl TileAddress {
    pub fn new(column: i64, row: i64, zoom: u32) -> Self {
        Self { column, row, zoom }
    }

    /// Build an address from floating-point host coordinates.
    ///
    /// Fractional, non-finite or out-of-range values are rejected rather than
    /// truncated.
    pub fn from_host_coords(x: f64, y: f64, z: f64) -> TileResult<Self> {
        let column = integral(x, "column")?;
        let row = integral(y, "row")?;
        let zoom = integral(z, "zoom")?;
        let zoom = u32::try_from(zoom).map_err(|_| TileError::ZoomOutOfRange {
            zoom,
            min: 0,
            max: u32::MAX as i64,
        })?;
        Ok(Self { column, row, zoom })
    }
}

impl fmt::Display for TileAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.zoom, self.column, self.row)
    }
}

fn integral(value: f64, axis: &'static str) -> TileResult<i64> {
    // 2^53: beyond this f64 can no longer tell integers apart.
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;

    if !value.is_finite() || value.fract() != 0.0 || value.abs() > MAX_EXACT {
        return Err(TileError::NonIntegerCoordinate { axis, value });
    }
    Ok(value as i64)
}

/// Service generation a tile source talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Protocol {
    /// OpenSpace map image service addressed by lower-left bbox corner.
    LegacyBbox,
    /// OS Maps API tile matrix service.
    #[default]
    Matrix,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::LegacyBbox => "legacy-bbox",
            Protocol::Matrix => "matrix",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Protocol {
    type Err = TileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "legacy-bbox" | "legacy" | "bbox" | "openspace" => Ok(Protocol::LegacyBbox),
            "matrix" | "wmts" | "mapapi" => Ok(Protocol::Matrix),
            _ => Err(TileError::invalid_config(
                "protocol",
                format!("unknown protocol '{}', expected legacy-bbox or matrix", s),
            )),
        }
    }
}

/// Vertical offset convention for the bbox protocol.
///
/// Historical OpenSpace clients disagree on how the host row maps to the
/// ground offset, so the convention is configurable and checked against the
/// live service rather than fixed in code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowConvention {
    /// `y0 = span * (-1 - row)`
    #[default]
    Flipped,
    /// `y0 = span * row`
    Direct,
    /// `y0 = span * (row - 1)`
    Shifted,
}

impl RowConvention {
    /// Tile-count multiplier applied to the tile span for `row`.
    pub fn offset(&self, row: i64) -> TileResult<i64> {
        let offset = match self {
            RowConvention::Flipped => (-1i64).checked_sub(row),
            RowConvention::Direct => Some(row),
            RowConvention::Shifted => row.checked_sub(1),
        };
        offset.ok_or(TileError::CoordinateOverflow("bbox row offset"))
    }
}

impl FromStr for RowConvention {
    type Err = TileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "flipped" => Ok(RowConvention::Flipped),
            "direct" => Ok(RowConvention::Direct),
            "shifted" => Ok(RowConvention::Shifted),
            _ => Err(TileError::invalid_config(
                "row_convention",
                format!("unknown convention '{}'", s),
            )),
        }
    }
}

/// Per-tile geometry computed by a resolver.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TilePosition {
    /// Lower-left corner request for the bbox protocol.
    Bbox { bbox: BoundingBox, resolution: f64 },
    /// Matrix cell for the tile matrix protocol (rows bottom-up).
    Matrix {
        tile_matrix: String,
        tile_row: i64,
        tile_col: i64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_host_coords() {
        let addr = TileAddress::from_host_coords(3.0, -7.0, 2.0).unwrap();
        assert_eq!(addr, TileAddress::new(3, -7, 2));
        assert_eq!(addr.to_string(), "2/3/-7");
    }

    #[test]
    fn test_fractional_coords_rejected() {
        let err = TileAddress::from_host_coords(1.5, 0.0, 0.0).unwrap_err();
        assert_eq!(
            err,
            TileError::NonIntegerCoordinate {
                axis: "column",
                value: 1.5
            }
        );
        assert!(err.is_address_error());

        assert!(TileAddress::from_host_coords(0.0, f64::NAN, 0.0).is_err());
        assert!(TileAddress::from_host_coords(0.0, 0.0, f64::INFINITY).is_err());
        assert!(TileAddress::from_host_coords(0.0, 0.0, 0.25).is_err());
    }

    #[test]
    fn test_negative_zoom_rejected() {
        let err = TileAddress::from_host_coords(0.0, 0.0, -1.0).unwrap_err();
        assert!(matches!(err, TileError::ZoomOutOfRange { zoom: -1, .. }));
    }

    #[test]
    fn test_protocol_parse() {
        assert_eq!("legacy-bbox".parse::<Protocol>().unwrap(), Protocol::LegacyBbox);
        assert_eq!("WMTS".parse::<Protocol>().unwrap(), Protocol::Matrix);
        assert!("tms".parse::<Protocol>().is_err());
        assert_eq!(Protocol::LegacyBbox.to_string(), "legacy-bbox");
    }

    #[test]
    fn test_protocol_serde() {
        let json = serde_json::to_string(&Protocol::LegacyBbox).unwrap();
        assert_eq!(json, "\"legacy-bbox\"");
        let parsed: Protocol = serde_json::from_str("\"matrix\"").unwrap();
        assert_eq!(parsed, Protocol::Matrix);
    }

    #[test]
    fn test_row_conventions() {
        assert_eq!(RowConvention::Flipped.offset(-1).unwrap(), 0);
        assert_eq!(RowConvention::Flipped.offset(0).unwrap(), -1);
        assert_eq!(RowConvention::Direct.offset(-3).unwrap(), -3);
        assert_eq!(RowConvention::Shifted.offset(0).unwrap(), -1);
        assert!(RowConvention::Flipped.offset(i64::MIN).is_err());
        assert!(RowConvention::Shifted.offset(i64::MIN).is_err());
    }
}
