/// Width of the layout grid in columns.
pub const GRID_COLUMNS: u8 = 12;

/// Column span of each tile in a live grid of `count` cameras.
///
/// One camera fills the row, two share it, three put the first on its own
/// row above the other two, four form a 2x2 grid.
pub fn grid_spans(count: usize) -> Vec<u8> {
    match count {
        0 => Vec::new(),
        1 => vec![GRID_COLUMNS],
        3 => vec![GRID_COLUMNS, GRID_COLUMNS / 2, GRID_COLUMNS / 2],
        n => vec![GRID_COLUMNS / 2; n],
    }
}
