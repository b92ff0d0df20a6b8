//! Geometry primitives
//!
//! Axis-aligned rectangles on the cell grid and the closest-point-on-box
//! projection used to anchor lines onto box edges.

use serde::Serialize;

use super::{GridPoint, Side};

/// Axis-aligned rectangle in grid-cell coordinates, inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rect {
    pub min_col: i32,
    pub min_row: i32,
    pub max_col: i32,
    pub max_row: i32,
}

impl Rect {
    pub const fn new(min_col: i32, min_row: i32, max_col: i32, max_row: i32) -> Self {
        Self {
            min_col,
            min_row,
            max_col,
            max_row,
        }
    }

    /// Build the rectangle spanned by two opposite corners, in any order
    pub fn from_corners(a: GridPoint, b: GridPoint) -> Self {
        Self::new(
            a.col.min(b.col),
            a.row.min(b.row),
            a.col.max(b.col),
            a.row.max(b.row),
        )
    }

    /// A single-cell rectangle
    pub fn from_point(p: GridPoint) -> Self {
        Self::new(p.col, p.row, p.col, p.row)
    }

    /// Top-left corner
    pub fn origin(&self) -> GridPoint {
        GridPoint::new(self.min_col, self.min_row)
    }

    /// Bottom-right corner
    pub fn far_corner(&self) -> GridPoint {
        GridPoint::new(self.max_col, self.max_row)
    }

    /// True when the rectangle has at least one interior cell on each axis
    pub fn has_interior(&self) -> bool {
        self.min_col < self.max_col && self.min_row < self.max_row
    }

    pub fn width(&self) -> i32 {
        self.max_col - self.min_col + 1
    }

    pub fn height(&self) -> i32 {
        self.max_row - self.min_row + 1
    }

    /// Inclusive point containment (border cells count as inside)
    pub fn contains(&self, p: GridPoint) -> bool {
        p.col >= self.min_col && p.col <= self.max_col && p.row >= self.min_row && p.row <= self.max_row
    }

    /// True when `p` lies on one of the four edges
    pub fn on_perimeter(&self, p: GridPoint) -> bool {
        self.contains(p)
            && (p.col == self.min_col
                || p.col == self.max_col
                || p.row == self.min_row
                || p.row == self.max_row)
    }

    /// Grow this rectangle to cover `p`
    pub fn include_point(&mut self, p: GridPoint) {
        self.min_col = self.min_col.min(p.col);
        self.min_row = self.min_row.min(p.row);
        self.max_col = self.max_col.max(p.col);
        self.max_row = self.max_row.max(p.row);
    }

    /// Grow this rectangle to cover `other`
    pub fn include_rect(&mut self, other: &Rect) {
        self.include_point(other.origin());
        self.include_point(other.far_corner());
    }

    /// Translate by the given deltas
    pub fn translated(&self, dcol: i32, drow: i32) -> Self {
        Self::new(
            self.min_col + dcol,
            self.min_row + drow,
            self.max_col + dcol,
            self.max_row + drow,
        )
    }
}

/// A point on a box edge, relative to the box's top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Anchor {
    pub col: i32,
    pub row: i32,
    pub side: Side,
}

impl Anchor {
    pub const fn new(col: i32, row: i32, side: Side) -> Self {
        Self { col, row, side }
    }

    /// Absolute grid position of this anchor on a box with the given bounds
    pub fn resolve(&self, bounds: &Rect) -> GridPoint {
        GridPoint::new(bounds.min_col + self.col, bounds.min_row + self.row)
    }

    /// Clamp the coordinate along this anchor's edge to the edge's span
    ///
    /// The resolved point then lies on the perimeter of `bounds`.
    pub fn clamped_to(self, bounds: &Rect) -> Anchor {
        match self.side {
            Side::Left | Side::Right => {
                Anchor::new(self.col, self.row.clamp(0, bounds.height() - 1), self.side)
            }
            Side::Top | Side::Bottom => {
                Anchor::new(self.col.clamp(0, bounds.width() - 1), self.row, self.side)
            }
        }
    }
}

/// Project `point` onto the nearest edge of `bounds`
///
/// Candidate edges are tried left, right, bottom, top; a later edge only wins
/// on a strictly smaller distance, so ties keep the earlier edge. The other
/// coordinate is left as-is; use [`Anchor::clamped_to`] to pull it onto the
/// edge's span. The result is relative to the box's top-left corner and
/// saturates at the `i32` range for extreme inputs.
pub fn closest_point_on_box(point: GridPoint, bounds: &Rect) -> Anchor {
    let candidates = [
        (Side::Left, point.col.abs_diff(bounds.min_col)),
        (Side::Right, point.col.abs_diff(bounds.max_col)),
        (Side::Bottom, point.row.abs_diff(bounds.max_row)),
        (Side::Top, point.row.abs_diff(bounds.min_row)),
    ];

    let mut side = Side::Left;
    let mut best = u32::MAX;
    for (candidate, distance) in candidates {
        if distance < best {
            best = distance;
            side = candidate;
        }
    }

    let clamped = match side {
        Side::Left => GridPoint::new(bounds.min_col, point.row),
        Side::Right => GridPoint::new(bounds.max_col, point.row),
        Side::Bottom => GridPoint::new(point.col, bounds.max_row),
        Side::Top => GridPoint::new(point.col, bounds.min_row),
    };

    Anchor::new(
        clamped.col.saturating_sub(bounds.min_col),
        clamped.row.saturating_sub(bounds.min_row),
        side,
    )
}
