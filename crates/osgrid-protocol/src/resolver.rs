//! Protocol dispatch for tile resolution and per-protocol parameter sets.

use osgrid_common::{CrsDescriptor, Protocol, RowConvention, TileAddress, TilePosition, TileResult};

use crate::getmap::{self, GetMapParams};
use crate::params::RequestParams;
use crate::wmts::{self, GetTileParams};

/// Resolve a host tile address with the resolver for `protocol`.
///
/// `convention` only applies to [`Protocol::LegacyBbox`].
pub fn resolve(
    address: &TileAddress,
    crs: &CrsDescriptor,
    protocol: Protocol,
    convention: RowConvention,
) -> TileResult<TilePosition> {
    match protocol {
        Protocol::LegacyBbox => getmap::resolve_bbox(address, crs, convention),
        Protocol::Matrix => wmts::resolve_matrix(address, crs),
    }
}

/// Parameter names recomputed for every tile of `protocol`.
pub fn computed_param_names(protocol: Protocol) -> &'static [&'static str] {
    match protocol {
        Protocol::LegacyBbox => &getmap::COMPUTED_PARAMS,
        Protocol::Matrix => &wmts::COMPUTED_PARAMS,
    }
}

/// Construction-time parameters of either protocol generation.
#[derive(Debug, Clone)]
pub enum ProtocolParams {
    GetMap(GetMapParams),
    GetTile(GetTileParams),
}

impl ProtocolParams {
    pub fn protocol(&self) -> Protocol {
        match self {
            ProtocolParams::GetMap(_) => Protocol::LegacyBbox,
            ProtocolParams::GetTile(_) => Protocol::Matrix,
        }
    }

    pub fn fixed_params(&self) -> RequestParams {
        match self {
            ProtocolParams::GetMap(p) => p.fixed_params(),
            ProtocolParams::GetTile(p) => p.fixed_params(),
        }
    }

    pub fn computed_params(&self, position: &TilePosition) -> TileResult<RequestParams> {
        match self {
            ProtocolParams::GetMap(p) => p.computed_params(position),
            ProtocolParams::GetTile(p) => p.computed_params(position),
        }
    }

    /// Whether `name` is recomputed per tile (case-insensitive).
    /// Whether `name` is the API key parameter of this protocol.
    pub fn is_key(&self, name: &str) -> bool {
        let key = match self {
            ProtocolParams::GetMap(_) => getmap::KEY_PARAM,
            ProtocolParams::GetTile(_) => wmts::KEY_PARAM,
        };
        key.eq_ignore_ascii_case(name)
    }

    pub fn is_computed(&self, name: &str) -> bool {
        computed_param_names(self.protocol())
            .iter()
            .any(|computed| computed.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch() {
        let addr = TileAddress::new(1, -1, 0);
        let bbox = resolve(
            &addr,
            &CrsDescriptor::legacy_bbox(),
            Protocol::LegacyBbox,
            RowConvention::default(),
        )
        .unwrap();
        assert!(matches!(bbox, TilePosition::Bbox { .. }));

        let matrix = resolve(
            &addr,
            &CrsDescriptor::matrix(),
            Protocol::Matrix,
            RowConvention::default(),
        )
        .unwrap();
        assert!(matches!(matrix, TilePosition::Matrix { tile_row: 5, tile_col: 1, .. }));
    }

    #[test]
    fn test_one_past_table_fails_for_both() {
        for (protocol, crs) in [
            (Protocol::LegacyBbox, CrsDescriptor::legacy_bbox()),
            (Protocol::Matrix, CrsDescriptor::matrix()),
        ] {
            let addr = TileAddress::new(0, -1, crs.zoom_levels());
            let err = resolve(&addr, &crs, protocol, RowConvention::default()).unwrap_err();
            assert!(err.is_address_error(), "{:?}", protocol);
        }
    }

    #[test]
    fn test_is_computed() {
        let params = ProtocolParams::GetMap(GetMapParams::new("k", 200));
        assert!(params.is_computed("bbox"));
        assert!(params.is_computed("WIDTH"));
        assert!(!params.is_computed("FORMAT"));

        let params = ProtocolParams::GetTile(GetTileParams::new("k", &CrsDescriptor::matrix()));
        assert!(params.is_computed("TILEROW"));
        assert!(params.is_key("KEY"));
        assert!(!params.is_key("keys"));
        assert!(!params.is_computed("layer"));
        assert_eq!(params.protocol(), Protocol::Matrix);
    }
}
