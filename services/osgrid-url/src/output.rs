//! Tile block resolution and output formatting.

use anyhow::Result;
use serde::Serialize;
use std::io::Write;

use osgrid_tiles::{ResolvedTile, TileAddress, TileError, TilePosition, TileResult, TileSource};

/// One output line of `--json` mode.
#[derive(Debug, Clone, Serialize)]
pub struct TileRecord {
    pub zoom: u32,
    pub column: i64,
    pub row: i64,
    pub service_zoom: u32,
    pub position: TilePosition,
    pub url: String,
}

impl From<&ResolvedTile> for TileRecord {
    fn from(tile: &ResolvedTile) -> Self {
        Self {
            zoom: tile.address.zoom,
            column: tile.address.column,
            row: tile.address.row,
            service_zoom: tile.service_zoom,
            position: tile.position.clone(),
            url: tile.url(),
        }
    }
}

/// Resolve a `cols` x `rows` block whose top-left tile is `origin`.
///
/// Rows are walked top-down and columns left to right. The first tile that
/// fails to resolve, or whose address overflows, aborts the whole block.
pub fn resolve_block(
    source: &TileSource,
    origin: TileAddress,
    cols: u32,
    rows: u32,
) -> TileResult<Vec<ResolvedTile>> {
    let mut tiles = Vec::new();
    for dy in 0..rows as i64 {
        let row = origin
            .row
            .checked_add(dy)
            .ok_or(TileError::CoordinateOverflow("block row"))?;
        for dx in 0..cols as i64 {
            let column = origin
                .column
                .checked_add(dx)
                .ok_or(TileError::CoordinateOverflow("block column"))?;
            let address = TileAddress {
                column,
                row,
                zoom: origin.zoom,
            };
            tiles.push(source.resolve_tile(&address)?);
        }
    }
    Ok(tiles)
}

/// Write one line per tile: the bare URL, or a JSON record.
pub fn write_tiles<W: Write>(out: &mut W, tiles: &[ResolvedTile], json: bool) -> Result<()> {
    for tile in tiles {
        if json {
            serde_json::to_writer(&mut *out, &TileRecord::from(tile))?;
            writeln!(out)?;
        } else {
            writeln!(out, "{}", tile.url())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use osgrid_tiles::{tile_source, Protocol};

    #[test]
    fn test_block_order() {
        let source = tile_source("key", Protocol::Matrix).unwrap();
        let tiles = resolve_block(&source, TileAddress::new(4, -3, 2), 2, 2).unwrap();
        let addresses: Vec<_> = tiles.iter().map(|t| (t.address.column, t.address.row)).collect();
        assert_eq!(addresses, vec![(4, -3), (5, -3), (4, -2), (5, -2)]);
    }

    #[test]
    fn test_empty_block() {
        let source = tile_source("key", Protocol::Matrix).unwrap();
        assert!(resolve_block(&source, TileAddress::new(0, -1, 0), 0, 3)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_column_overflow_is_an_error() {
        let source = tile_source("key", Protocol::Matrix).unwrap();
        let err = resolve_block(&source, TileAddress::new(i64::MAX, -1, 0), 2, 1).unwrap_err();
        assert_eq!(err, TileError::CoordinateOverflow("block column"));
        assert!(err.is_address_error());
    }

    #[test]
    fn test_row_overflow_is_an_error() {
        // the flipped legacy offset still resolves the first row at i64::MAX
        let source = tile_source("key", Protocol::LegacyBbox).unwrap();
        let err = resolve_block(&source, TileAddress::new(0, i64::MAX, 0), 1, 2).unwrap_err();
        assert_eq!(err, TileError::CoordinateOverflow("block row"));
    }

    #[test]
    fn test_huge_block_fails_on_first_tile() {
        let source = tile_source("key", Protocol::LegacyBbox).unwrap();
        let err = resolve_block(&source, TileAddress::new(0, -1, 99), u32::MAX, u32::MAX)
            .unwrap_err();
        assert!(matches!(err, TileError::ZoomOutOfRange { zoom: 99, .. }));
    }

    #[test]
    fn test_text_output() {
        let source = tile_source("key", Protocol::LegacyBbox).unwrap();
        let tiles = resolve_block(&source, TileAddress::new(1, -1, 0), 1, 1).unwrap();

        let mut out = Vec::new();
        write_tiles(&mut out, &tiles, false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.trim_end().ends_with("BBOX=500000%2C0%2C0%2C0&LAYERS=2500"));
    }
}
