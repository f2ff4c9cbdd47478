//! Coordinate Reference System types and the tile pyramid descriptor.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{BoundingBox, TileError, TileResult};

/// proj4 definition of the British National Grid (OSGB36 Transverse Mercator).
pub const BNG_PROJ4: &str = "+proj=tmerc +lat_0=49 +lon_0=-2 +k=0.9996012717 \
    +x_0=400000 +y_0=-100000 +ellps=airy +datum=OSGB36 +units=m +no_defs";

/// Resolutions (metres per pixel) of the OpenSpace GetMap pyramid.
pub const LEGACY_RESOLUTIONS: [f64; 10] = [
    2500.0, 1000.0, 500.0, 200.0, 100.0, 50.0, 25.0, 10.0, 5.0, 2.5,
];

/// Resolutions (metres per pixel) of the OS Maps API tile matrix set.
pub const MATRIX_RESOLUTIONS: [f64; 10] = [
    896.0, 448.0, 224.0, 112.0, 56.0, 28.0, 14.0, 7.0, 3.5, 1.75,
];

/// Highest row index per zoom of the OS Maps API tile matrix set.
pub const MATRIX_MAX_ROWS: [u32; 10] = [5, 11, 23, 47, 95, 191, 383, 767, 1535, 3071];

pub const LEGACY_TILE_SIZE: u32 = 200;
pub const MATRIX_TILE_SIZE: u32 = 256;

/// Projected origin of the tile matrix set.
pub const MATRIX_ORIGIN: (f64, f64) = (-238375.0, 0.0);

/// Projected extent covered by the tile matrix set.
pub const MATRIX_BOUNDS: BoundingBox = BoundingBox {
    min_x: 0.0,
    min_y: 0.0,
    max_x: 938560.0,
    max_y: 1376256.0,
};

/// Well-known CRS codes supported by the tile sources.
///
/// Serialized as the WMS string (`"EPSG:27700"`), parsed case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CrsCode {
    /// OSGB36 / British National Grid (metres)
    Epsg27700,
}

impl CrsCode {
    /// Parse a CRS string such as "EPSG:27700" (case-insensitive).
    pub fn from_wms_string(s: &str) -> TileResult<Self> {
        match s.trim().to_uppercase().as_str() {
            "EPSG:27700" => Ok(CrsCode::Epsg27700),
            _ => Err(TileError::UnsupportedCrs(s.to_string())),
        }
    }
}

impl FromStr for CrsCode {
    type Err = TileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CrsCode::from_wms_string(s)
    }
}

impl TryFrom<String> for CrsCode {
    type Error = TileError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        CrsCode::from_wms_string(&s)
    }
}

impl From<CrsCode> for String {
    fn from(code: CrsCode) -> Self {
        code.to_string()
    }
}

impl fmt::Display for CrsCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrsCode::Epsg27700 => write!(f, "EPSG:27700"),
        }
    }
}

/// Static description of a tile pyramid in a projected CRS.
///
/// Only built through [`CrsDescriptor::new`] (or the two built-in
/// generations), so every instance satisfies:
/// - `resolutions` is non-empty, positive, finite and strictly decreasing
/// - `tile_size` is non-zero
/// - `max_rows_by_zoom`, when present, has one entry per zoom level
///
/// The proj4 definition is carried for an external projection library and
/// never evaluated here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrsDescriptor {
    code: CrsCode,
    proj4: String,
    resolutions: Vec<f64>,
    tile_size: u32,
    origin: (f64, f64),
    max_rows_by_zoom: Option<Vec<u32>>,
    bounds: Option<BoundingBox>,
}

impl CrsDescriptor {
    pub fn new(
        code: CrsCode,
        resolutions: Vec<f64>,
        tile_size: u32,
        origin: (f64, f64),
        max_rows_by_zoom: Option<Vec<u32>>,
    ) -> TileResult<Self> {
        validate_resolutions(&resolutions)?;
        validate_tile_size(tile_size)?;

        if let Some(rows) = &max_rows_by_zoom {
            if rows.len() != resolutions.len() {
                return Err(TileError::invalid_config(
                    "max_rows_by_zoom",
                    format!(
                        "expected {} entries (one per zoom level), got {}",
                        resolutions.len(),
                        rows.len()
                    ),
                ));
            }
        }

        if !origin.0.is_finite() || !origin.1.is_finite() {
            return Err(TileError::invalid_config("origin", "must be finite"));
        }

        Ok(Self {
            code,
            proj4: BNG_PROJ4.to_string(),
            resolutions,
            tile_size,
            origin,
            max_rows_by_zoom,
            bounds: None,
        })
    }

    /// The OpenSpace GetMap pyramid: ten levels, 200px tiles.
    pub fn legacy_bbox() -> Self {
        Self {
            code: CrsCode::Epsg27700,
            proj4: BNG_PROJ4.to_string(),
            resolutions: LEGACY_RESOLUTIONS.to_vec(),
            tile_size: LEGACY_TILE_SIZE,
            origin: (0.0, 0.0),
            max_rows_by_zoom: None,
            bounds: None,
        }
    }

    /// The OS Maps API tile matrix set: ten levels, 256px tiles.
    pub fn matrix() -> Self {
        Self {
            code: CrsCode::Epsg27700,
            proj4: BNG_PROJ4.to_string(),
            resolutions: MATRIX_RESOLUTIONS.to_vec(),
            tile_size: MATRIX_TILE_SIZE,
            origin: MATRIX_ORIGIN,
            max_rows_by_zoom: Some(MATRIX_MAX_ROWS.to_vec()),
            bounds: Some(MATRIX_BOUNDS),
        }
    }

    /// Copy of this descriptor with a different tile size.
    pub fn with_tile_size(&self, tile_size: u32) -> TileResult<Self> {
        validate_tile_size(tile_size)?;
        Ok(Self {
            tile_size,
            ..self.clone()
        })
    }

    pub fn code(&self) -> CrsCode {
        self.code
    }

    pub fn proj4(&self) -> &str {
        &self.proj4
    }

    pub fn resolutions(&self) -> &[f64] {
        &self.resolutions
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    pub fn origin(&self) -> (f64, f64) {
        self.origin
    }

    pub fn max_rows_by_zoom(&self) -> Option<&[u32]> {
        self.max_rows_by_zoom.as_deref()
    }

    pub fn bounds(&self) -> Option<BoundingBox> {
        self.bounds
    }

    /// Number of zoom levels in the pyramid.
    pub fn zoom_levels(&self) -> u32 {
        self.resolutions.len() as u32
    }

    /// Highest zoom level in the pyramid.
    pub fn max_zoom(&self) -> u32 {
        self.zoom_levels() - 1
    }

    /// Ground distance per pixel at `zoom`.
    pub fn resolution(&self, zoom: u32) -> TileResult<f64> {
        self.resolutions
            .get(zoom as usize)
            .copied()
            .ok_or_else(|| self.zoom_error(zoom))
    }

    /// Ground distance covered by one tile edge at `zoom`.
    pub fn tile_span(&self, zoom: u32) -> TileResult<f64> {
        Ok(self.tile_size as f64 * self.resolution(zoom)?)
    }

    /// Highest valid matrix row at `zoom`.
    pub fn max_row(&self, zoom: u32) -> TileResult<u32> {
        let rows = self.max_rows_by_zoom.as_ref().ok_or_else(|| {
            TileError::invalid_config(
                "max_rows_by_zoom",
                "the tile matrix protocol needs a per-zoom row table",
            )
        })?;
        rows.get(zoom as usize)
            .copied()
            .ok_or_else(|| self.zoom_error(zoom))
    }

    fn zoom_error(&self, zoom: u32) -> TileError {
        TileError::ZoomOutOfRange {
            zoom: zoom as i64,
            min: 0,
            max: self.max_zoom() as i64,
        }
    }
}

fn validate_resolutions(resolutions: &[f64]) -> TileResult<()> {
    if resolutions.is_empty() {
        return Err(TileError::InvalidResolutions(
            "at least one zoom level is required".to_string(),
        ));
    }

    if let Some((zoom, value)) = resolutions
        .iter()
        .enumerate()
        .find(|(_, r)| !r.is_finite() || **r <= 0.0)
    {
        return Err(TileError::InvalidResolutions(format!(
            "zoom {} has resolution {}, expected a positive finite value",
            zoom, value
        )));
    }

    if let Some(zoom) = resolutions.windows(2).position(|w| w[1] >= w[0]) {
        return Err(TileError::InvalidResolutions(format!(
            "resolutions must strictly decrease, zoom {} ({}) is not finer than zoom {} ({})",
            zoom + 1,
            resolutions[zoom + 1],
            zoom,
            resolutions[zoom]
        )));
    }

    Ok(())
}

fn validate_tile_size(tile_size: u32) -> TileResult<()> {
    if tile_size == 0 {
        return Err(TileError::invalid_config("tile_size", "must be positive"));
    }
    Ok(())
}
