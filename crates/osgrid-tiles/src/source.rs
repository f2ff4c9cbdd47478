//! The tile source a host map widget talks to.

use serde::Serialize;
use tracing::{debug, warn};

use osgrid_common::{
    CrsDescriptor, Protocol, RowConvention, TileAddress, TileError, TilePosition, TileResult,
};
use osgrid_protocol::{
    compose, getmap, resolve, wmts, GetMapParams, GetTileParams, ProtocolParams,
    RequestDescriptor, RequestParams,
};

use crate::attribution::{Attribution, DEFAULT_TERMS_URL};
use crate::config::TileSourceConfig;

/// A resolved tile: the request plus the geometry it was built from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedTile {
    /// Address as requested by the host.
    pub address: TileAddress,
    /// Zoom sent to the service (host zoom plus offset).
    pub service_zoom: u32,
    pub position: TilePosition,
    pub request: RequestDescriptor,
}

impl ResolvedTile {
    pub fn url(&self) -> String {
        self.request.url()
    }
}

/// An immutable, validated tile source for one service generation.
///
/// Built once with [`TileSource::new`]; afterwards every method takes
/// `&self`, so a source can be shared across threads behind an `Arc`.
#[derive(Debug, Clone)]
pub struct TileSource {
    protocol: Protocol,
    crs: CrsDescriptor,
    row_convention: RowConvention,
    base_url: String,
    params: ProtocolParams,
    fixed: RequestParams,
    passthrough: RequestParams,
    min_zoom: u32,
    max_zoom: u32,
    zoom_offset: i32,
    attribution: Attribution,
}

impl TileSource {
    /// Validate `config` and build a tile source from it.
    pub fn new(config: TileSourceConfig) -> TileResult<Self> {
        let api_key = config.api_key.trim();
        if api_key.is_empty() {
            return Err(TileError::MissingApiKey);
        }

        let protocol = config.protocol;
        let builtin = match protocol {
            Protocol::LegacyBbox => CrsDescriptor::legacy_bbox(),
            Protocol::Matrix => CrsDescriptor::matrix(),
        };
        let mut crs = match &config.crs {
            Some(custom) => custom.build(&builtin)?,
            None => builtin,
        };
        if protocol == Protocol::Matrix && crs.max_rows_by_zoom().is_none() {
            return Err(TileError::invalid_config(
                "crs.max_rows_by_zoom",
                "the tile matrix protocol needs a per-zoom row table",
            ));
        }
        if let Some(tile_size) = config.tile_size {
            crs = crs.with_tile_size(tile_size)?;
        }

        let min_zoom = config.min_zoom.unwrap_or(0);
        let max_zoom = match config.max_zoom {
            Some(max_zoom) => max_zoom,
            None => default_max_zoom(&crs, min_zoom, config.zoom_offset)?,
        };
        validate_zoom_range(&crs, min_zoom, max_zoom, config.zoom_offset)?;

        let base_url = non_empty("base_url", config.base_url)?.unwrap_or_else(|| {
            match protocol {
                Protocol::LegacyBbox => getmap::DEFAULT_ENDPOINT,
                Protocol::Matrix => wmts::DEFAULT_ENDPOINT,
            }
            .to_string()
        });
        let format = non_empty("format", config.format)?;

        let params = match protocol {
            Protocol::LegacyBbox => {
                let mut getmap = GetMapParams::new(api_key, crs.tile_size());
                if let Some(api_url) = non_empty("api_url", config.api_url)? {
                    getmap.api_url = api_url;
                }
                if let Some(format) = format {
                    getmap.format = format;
                }
                ProtocolParams::GetMap(getmap)
            }
            Protocol::Matrix => {
                let mut gettile = GetTileParams::new(api_key, &crs);
                if let Some(layer) = non_empty("layer", config.layer)? {
                    gettile.layer = layer;
                }
                if let Some(format) = format {
                    gettile.format = format;
                }
                ProtocolParams::GetTile(gettile)
            }
        };

        let mut passthrough = RequestParams::new();
        for (name, value) in config.extra_params {
            if name.trim().is_empty() {
                return Err(TileError::invalid_config(
                    "extra_params",
                    "parameter names must not be empty",
                ));
            }
            if params.is_key(&name) {
                return Err(TileError::invalid_config(
                    "extra_params",
                    format!("{} must be set through api_key", name),
                ));
            }
            if params.is_computed(&name) {
                warn!(param = %name, "Ignoring pass-through parameter that is computed per tile");
                continue;
            }
            passthrough.set(name, value);
        }

        let terms_url = config
            .terms_of_use_url
            .filter(|url| !url.trim().is_empty())
            .or_else(|| {
                config
                    .show_terms_notice
                    .then(|| DEFAULT_TERMS_URL.to_string())
            });

        debug!(
            protocol = %protocol,
            base_url = %base_url,
            min_zoom,
            max_zoom,
            zoom_offset = config.zoom_offset,
            tile_size = crs.tile_size(),
            passthrough = passthrough.len(),
            "Constructed tile source"
        );

        Ok(Self {
            protocol,
            fixed: params.fixed_params(),
            params,
            crs,
            row_convention: config.row_convention,
            base_url,
            passthrough,
            min_zoom,
            max_zoom,
            zoom_offset: config.zoom_offset,
            attribution: Attribution::new(protocol, terms_url),
        })
    }

    /// Resolve a tile address into its request URL.
    pub fn resolve_tile_url(&self, address: &TileAddress) -> TileResult<String> {
        self.resolve_tile(address).map(|tile| tile.url())
    }

    /// Resolve floating-point host coordinates into a request URL.
    pub fn resolve_host_tile(&self, x: f64, y: f64, z: f64) -> TileResult<String> {
        self.resolve_tile_url(&TileAddress::from_host_coords(x, y, z)?)
    }

    /// Resolve a tile address, keeping the computed geometry alongside the request.
    pub fn resolve_tile(&self, address: &TileAddress) -> TileResult<ResolvedTile> {
        if address.zoom < self.min_zoom || address.zoom > self.max_zoom {
            return Err(TileError::ZoomOutOfRange {
                zoom: address.zoom as i64,
                min: self.min_zoom as i64,
                max: self.max_zoom as i64,
            });
        }

        let service_zoom = self.service_zoom(address.zoom)?;
        let service_address = TileAddress {
            zoom: service_zoom,
            ..*address
        };

        let position = resolve(&service_address, &self.crs, self.protocol, self.row_convention)?;
        let computed = self.params.computed_params(&position)?;
        let params = compose(&self.fixed, &self.passthrough, &computed);

        Ok(ResolvedTile {
            address: *address,
            service_zoom,
            position,
            request: RequestDescriptor::new(self.base_url.as_str(), params),
        })
    }

    /// Attribution text for the current year.
    pub fn attribution_text(&self) -> String {
        self.attribution.text()
    }

    pub fn attribution_for_year(&self, year: i32) -> String {
        self.attribution.text_for_year(year)
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    pub fn crs(&self) -> &CrsDescriptor {
        &self.crs
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn tile_size(&self) -> u32 {
        self.crs.tile_size()
    }

    /// Host zoom levels this source serves, inclusive.
    pub fn zoom_range(&self) -> (u32, u32) {
        (self.min_zoom, self.max_zoom)
    }

    pub fn zoom_offset(&self) -> i32 {
        self.zoom_offset
    }

    fn service_zoom(&self, zoom: u32) -> TileResult<u32> {
        let shifted = zoom as i64 + self.zoom_offset as i64;
        u32::try_from(shifted).map_err(|_| TileError::ZoomOutOfRange {
            zoom: shifted,
            min: 0,
            max: self.crs.max_zoom() as i64,
        })
    }
}

/// Create a tile source with default options for `protocol`.
pub fn tile_source(api_key: impl Into<String>, protocol: Protocol) -> TileResult<TileSource> {
    TileSource::new(TileSourceConfig::new(api_key, protocol))
}

/// Highest host zoom whose shifted zoom still falls inside the CRS table.
fn default_max_zoom(crs: &CrsDescriptor, min_zoom: u32, zoom_offset: i32) -> TileResult<u32> {
    let max = crs.max_zoom() as i64 - zoom_offset as i64;
    if max < min_zoom as i64 {
        return Err(TileError::invalid_config(
            "zoom_offset",
            format!(
                "offset {} leaves no servable zoom at or above min_zoom {}",
                zoom_offset, min_zoom
            ),
        ));
    }
    Ok(max as u32)
}

fn validate_zoom_range(
    crs: &CrsDescriptor,
    min_zoom: u32,
    max_zoom: u32,
    zoom_offset: i32,
) -> TileResult<()> {
    if min_zoom > max_zoom {
        return Err(TileError::invalid_config(
            "min_zoom",
            format!("min_zoom {} is above max_zoom {}", min_zoom, max_zoom),
        ));
    }

    let lowest = min_zoom as i64 + zoom_offset as i64;
    let highest = max_zoom as i64 + zoom_offset as i64;
    if lowest < 0 {
        return Err(TileError::invalid_config(
            "zoom_offset",
            format!("min_zoom {} shifted by {} is below zero", min_zoom, zoom_offset),
        ));
    }
    if highest > crs.max_zoom() as i64 {
        return Err(TileError::invalid_config(
            "max_zoom",
            format!(
                "max_zoom {} shifted by {} exceeds the {} levels of the resolution table",
                max_zoom,
                zoom_offset,
                crs.zoom_levels()
            ),
        ));
    }
    Ok(())
}

fn non_empty(field: &str, value: Option<String>) -> TileResult<Option<String>> {
    match value {
        Some(v) if v.trim().is_empty() => {
            Err(TileError::invalid_config(field, "must not be empty"))
        }
        other => Ok(other),
    }
}
