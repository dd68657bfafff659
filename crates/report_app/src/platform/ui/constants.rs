/// Pixel height of one rendered table line, used to fit rows into the container height.
pub const ROW_HEIGHT_PX: u32 = 24;
/// Lines taken by the table header and its rule.
pub const HEADER_LINES: u32 = 2;
pub const MAX_CELL_WIDTH: usize = 32;
pub const SORT_ASC_MARKER: &str = " ^";
pub const SORT_DESC_MARKER: &str = " v";
pub const SPINNER_TEXT: &str = "Loading report...";
