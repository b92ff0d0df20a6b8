//! Glyph selection for routed lines
//!
//! Picks one character per path cell from its position in the path: a tee at
//! the origin, an arrowhead at the terminus, and corners or straight runs in
//! between depending on whether the direction of travel changes.

use tracing::trace;

use super::{EdgeChars, GridPoint, PathCell};

/// Glyph for the cell at `idx` in `cells`
///
/// Returns `None` when `idx` is out of range.
pub fn glyph_for(cells: &[PathCell], idx: usize, chars: &EdgeChars) -> Option<char> {
    let cell = cells.get(idx)?;

    if idx == 0 {
        return Some(chars.tee(cell.direction));
    }
    if idx == cells.len() - 1 {
        return Some(chars.arrow(cell.direction));
    }

    let prev = cells[idx - 1].direction;
    if prev == cell.direction {
        return Some(chars.straight(cell.direction));
    }

    match chars.corner(prev, cell.direction) {
        Some(corner) => Some(corner),
        None => {
            // Reversal; orthogonal routing never produces one
            trace!(%prev, next = %cell.direction, "No corner for direction pair");
            Some(chars.straight(cell.direction))
        }
    }
}

/// Position and glyph for every cell of a path, in drawing order
///
/// Elbow cells appear twice; drawing in order leaves the corner on top.
pub fn path_glyphs(cells: &[PathCell], chars: &EdgeChars) -> Vec<(GridPoint, char)> {
    (0..cells.len())
        .filter_map(|idx| glyph_for(cells, idx, chars).map(|glyph| (cells[idx].pos, glyph)))
        .collect()
}
