//! Orthogonal line routing
//!
//! Turns a line's resolved endpoints into an elbowed waypoint path, then
//! expands that path into the ordered list of cells the connector occupies.

use tracing::trace;

use super::{Direction, GridPoint, Side};

/// One grid cell of a routed line and the direction of travel through it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PathCell {
    pub pos: GridPoint,
    pub direction: Direction,
}

impl PathCell {
    pub const fn new(col: i32, row: i32, direction: Direction) -> Self {
        Self {
            pos: GridPoint::new(col, row),
            direction,
        }
    }
}

/// A line with both endpoints resolved to absolute grid positions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRoute {
    pub start: GridPoint,
    /// Box edge the line leaves through
    pub start_side: Side,
    pub end: GridPoint,
}

impl LineRoute {
    pub fn new(start: GridPoint, start_side: Side, end: GridPoint) -> Self {
        Self {
            start,
            start_side,
            end,
        }
    }

    /// Two or three waypoints from start to end
    ///
    /// When the endpoints are not aligned a single elbow is inserted. Lines
    /// leaving a top or bottom edge go vertical first, the rest horizontal first.
    pub fn waypoints(&self) -> Vec<GridPoint> {
        let (start, end) = (self.start, self.end);
        if start.col == end.col || start.row == end.row {
            return vec![start, end];
        }

        let elbow = if self.start_side.is_horizontal_edge() {
            GridPoint::new(start.col, end.row)
        } else {
            GridPoint::new(end.col, start.row)
        };
        vec![start, elbow, end]
    }

    /// Every cell on the routed path, in travel order
    ///
    /// Each segment includes both of its endpoints, so an elbow cell appears
    /// twice: once closing the first segment and once opening the second.
    pub fn cells(&self) -> Vec<PathCell> {
        let waypoints = self.waypoints();
        let cells = expand_waypoints(&waypoints, self.start_side.exit_direction());
        trace!(
            start = %self.start,
            end = %self.end,
            waypoints = waypoints.len(),
            cells = cells.len(),
            "Routed line"
        );
        cells
    }
}

/// Expand consecutive waypoint pairs into unit cells
///
/// `fallback` tags the single cell produced by a zero-length segment.
pub fn expand_waypoints(waypoints: &[GridPoint], fallback: Direction) -> Vec<PathCell> {
    let mut cells = Vec::new();
    for pair in waypoints.windows(2) {
        expand_segment(pair[0], pair[1], fallback, &mut cells);
    }
    cells
}

fn expand_segment(from: GridPoint, to: GridPoint, fallback: Direction, out: &mut Vec<PathCell>) {
    if from == to {
        out.push(PathCell {
            pos: from,
            direction: fallback,
        });
        return;
    }

    if from.col == to.col {
        let direction = if to.row > from.row {
            Direction::Down
        } else {
            Direction::Up
        };
        let step = if to.row > from.row { 1 } else { -1 };
        let mut row = from.row;
        loop {
            out.push(PathCell::new(from.col, row, direction));
            if row == to.row {
                break;
            }
            row += step;
        }
    } else {
        // Waypoint pairs differ in exactly one axis, so this is horizontal
        let direction = if to.col > from.col {
            Direction::Right
        } else {
            Direction::Left
        };
        let step = if to.col > from.col { 1 } else { -1 };
        let mut col = from.col;
        loop {
            out.push(PathCell::new(col, from.row, direction));
            if col == to.col {
                break;
            }
            col += step;
        }
    }
}
