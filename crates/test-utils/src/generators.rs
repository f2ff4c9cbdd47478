//! Generators for sweeps of tile addresses.

/// Every `(column, row)` in a block starting at `(col0, row0)`.
///
/// Rows are visited top-down, columns left to right, matching how a host
/// widget requests a viewport.
///
/// # Example
///
/// ```
/// use test_utils::tile_block;
///
/// let block = tile_block(10, -3, 2, 2);
/// assert_eq!(block, vec![(10, -3), (11, -3), (10, -2), (11, -2)]);
/// ```
pub fn tile_block(col0: i64, row0: i64, cols: u32, rows: u32) -> Vec<(i64, i64)> {
    let mut tiles = Vec::with_capacity(cols as usize * rows as usize);
    for row in row0..row0 + rows as i64 {
        for col in col0..col0 + cols as i64 {
            tiles.push((col, row));
        }
    }
    tiles
}

/// Host rows covering a whole matrix level, top row first.
///
/// A level with `max_row` as its highest service row has `max_row + 1` rows,
/// which the host numbers `-(max_row + 1)..=-1`.
pub fn host_rows_for_level(max_row: u32) -> Vec<i64> {
    (-(max_row as i64 + 1)..=-1).collect()
}
