#![forbid(unsafe_code)]

//! ASCII rendering of grids for golden comparisons and failure messages.
//!
//! Each row becomes one line of twelve glyphs between `|` bars. A cell is
//! drawn with the glyph of its item index (`0-9`, then `a-z`, then `A-Z`,
//! wrapping after 62) and free columns are drawn as `.`:
//!
//! ```text
//! |000000111111|
//! |2222........|
//! ```

use fgrid_core::GRID_COLUMNS;
use fgrid_layout::Grid;

const GLYPHS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Free column glyph.
pub const EMPTY_GLYPH: char = '.';

/// Glyph used for an item index.
#[must_use]
pub fn item_glyph(item: usize) -> char {
    char::from(GLYPHS[item % GLYPHS.len()])
}

/// Render one line per row, joined with `\n` (no trailing newline).
///
/// An empty grid renders as the empty string.
#[must_use]
pub fn render_grid(grid: &Grid) -> String {
    grid.rows()
        .iter()
        .map(|row| {
            let mut line = [EMPTY_GLYPH; GRID_COLUMNS as usize];
            for cell in row.cells() {
                let start = usize::from(cell.col_start).min(line.len());
                let end = usize::from(cell.col_end()).min(line.len());
                for slot in &mut line[start..end] {
                    *slot = item_glyph(cell.item);
                }
            }
            let body: String = line.iter().collect();
            format!("|{body}|")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render with a `rN ` row prefix, for logs where row numbers matter.
#[must_use]
pub fn render_grid_numbered(grid: &Grid) -> String {
    render_grid(grid)
        .lines()
        .enumerate()
        .map(|(index, line)| format!("r{index} {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}
