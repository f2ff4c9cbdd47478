//! Tile source configuration.
//!
//! A configuration is plain data: it can be built in code or deserialized
//! from YAML, and is only checked when a [`crate::TileSource`] is
//! constructed from it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use osgrid_common::{CrsCode, CrsDescriptor, Protocol, RowConvention, TileError, TileResult};

/// Construction-time options for a tile source.
///
/// Every `Option` left as `None` falls back to the per-protocol default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TileSourceConfig {
    /// Service API key (required, non-empty).
    pub api_key: String,

    /// Service generation to talk to.
    pub protocol: Protocol,

    /// Override of the service endpoint.
    pub base_url: Option<String>,

    /// Override of the requested image format (e.g. "image/jpeg").
    pub format: Option<String>,

    /// Registered site URL sent as `URL` by the GetMap protocol.
    pub api_url: Option<String>,

    /// GetTile layer name (e.g. "Outdoor 27700").
    pub layer: Option<String>,

    /// Custom tile pyramid replacing the protocol's built-in one.
    pub crs: Option<CrsConfig>,

    /// Tile edge in pixels.
    pub tile_size: Option<u32>,

    /// Lowest zoom the host may request.
    pub min_zoom: Option<u32>,

    /// Highest zoom the host may request.
    pub max_zoom: Option<u32>,

    /// Added to the host zoom to get the service zoom.
    pub zoom_offset: i32,

    /// Vertical offset convention of the GetMap protocol.
    pub row_convention: RowConvention,

    /// Terms-of-use link appended to the attribution.
    pub terms_of_use_url: Option<String>,

    /// Append the default terms-of-use link when no URL is configured.
    pub show_terms_notice: bool,

    /// Pass-through query parameters; never override per-tile values.
    ///
    /// Parameters not replacing a fixed one are emitted in ascending name
    /// order (byte-wise), whatever order the YAML or the builder used.
    pub extra_params: BTreeMap<String, String>,
}

/// A tile pyramid given in configuration.
///
/// Fields left out are taken from the protocol's built-in descriptor; the
/// tile edge comes from [`TileSourceConfig::tile_size`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CrsConfig {
    #[serde(default)]
    pub code: Option<CrsCode>,

    /// Metres per pixel, coarsest zoom first.
    pub resolutions: Vec<f64>,

    #[serde(default)]
    pub origin: Option<(f64, f64)>,

    /// Highest matrix row per zoom; required by the matrix protocol.
    #[serde(default)]
    pub max_rows_by_zoom: Option<Vec<u32>>,
}

impl CrsConfig {
    pub fn new(resolutions: Vec<f64>) -> Self {
        Self {
            code: None,
            resolutions,
            origin: None,
            max_rows_by_zoom: None,
        }
    }

    pub fn with_max_rows(mut self, max_rows_by_zoom: Vec<u32>) -> Self {
        self.max_rows_by_zoom = Some(max_rows_by_zoom);
        self
    }

    /// Validate into a descriptor, filling gaps from `defaults`.
    pub fn build(&self, defaults: &CrsDescriptor) -> TileResult<CrsDescriptor> {
        CrsDescriptor::new(
            self.code.unwrap_or_else(|| defaults.code()),
            self.resolutions.clone(),
            defaults.tile_size(),
            self.origin.unwrap_or_else(|| defaults.origin()),
            self.max_rows_by_zoom.clone(),
        )
    }
}

impl TileSourceConfig {
    pub fn new(api_key: impl Into<String>, protocol: Protocol) -> Self {
        Self {
            api_key: api_key.into(),
            protocol,
            ..Self::default()
        }
    }

    /// Parse a YAML configuration document.
    pub fn from_yaml_str(yaml: &str) -> TileResult<Self> {
        serde_yaml::from_str(yaml).map_err(|e| TileError::invalid_config("yaml", e.to_string()))
    }

    pub fn to_yaml_string(&self) -> TileResult<String> {
        serde_yaml::to_string(self).map_err(|e| TileError::invalid_config("yaml", e.to_string()))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = Some(api_url.into());
        self
    }

    pub fn with_layer(mut self, layer: impl Into<String>) -> Self {
        self.layer = Some(layer.into());
        self
    }

    pub fn with_crs(mut self, crs: CrsConfig) -> Self {
        self.crs = Some(crs);
        self
    }

    pub fn with_tile_size(mut self, tile_size: u32) -> Self {
        self.tile_size = Some(tile_size);
        self
    }

    pub fn with_zoom_range(mut self, min_zoom: u32, max_zoom: u32) -> Self {
        self.min_zoom = Some(min_zoom);
        self.max_zoom = Some(max_zoom);
        self
    }

    pub fn with_zoom_offset(mut self, zoom_offset: i32) -> Self {
        self.zoom_offset = zoom_offset;
        self
    }

    pub fn with_row_convention(mut self, row_convention: RowConvention) -> Self {
        self.row_convention = row_convention;
        self
    }

    pub fn with_terms_of_use(mut self, url: impl Into<String>) -> Self {
        self.terms_of_use_url = Some(url.into());
        self
    }

    pub fn with_terms_notice(mut self) -> Self {
        self.show_terms_notice = true;
        self
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_params.insert(name.into(), value.into());
        self
    }
}
