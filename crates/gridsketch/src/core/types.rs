//! Core type definitions for diagram processing
//!
//! This module contains the fundamental value types used throughout gridsketch:
//! grid points, box sides, travel directions and the output character set.

use serde::Serialize;
use std::fmt;

/// Character set for rendering output
///
/// Controls which characters are used for drawing boxes and lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum CharacterSet {
    /// Unicode box-drawing characters: ┌ ┐ └ ┘ ─ │ ├ ▶
    #[default]
    Unicode,
    /// Pure ASCII characters only: + - | < > ^ v
    /// Maximum compatibility but limited visual quality
    Ascii,
}

impl CharacterSet {
    /// Returns true if this character set uses only ASCII
    pub fn is_ascii(&self) -> bool {
        matches!(self, CharacterSet::Ascii)
    }
}

impl fmt::Display for CharacterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharacterSet::Unicode => write!(f, "unicode"),
            CharacterSet::Ascii => write!(f, "ascii"),
        }
    }
}

/// An integer cell position on the drawing grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct GridPoint {
    pub col: i32,
    pub row: i32,
}

impl GridPoint {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Translate this point by the given column and row deltas
    pub fn offset(self, dcol: i32, drow: i32) -> Self {
        Self::new(self.col + dcol, self.row + drow)
    }
}

impl From<(i32, i32)> for GridPoint {
    fn from((col, row): (i32, i32)) -> Self {
        Self::new(col, row)
    }
}

impl fmt::Display for GridPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// The box edge an anchor point sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

impl Side {
    /// Returns true for the top and bottom edges
    ///
    /// Lines leaving a horizontal edge travel vertically first.
    pub fn is_horizontal_edge(&self) -> bool {
        matches!(self, Side::Top | Side::Bottom)
    }

    /// Direction of travel when leaving the box through this side
    pub fn exit_direction(&self) -> Direction {
        match self {
            Side::Left => Direction::Left,
            Side::Right => Direction::Right,
            Side::Top => Direction::Up,
            Side::Bottom => Direction::Down,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
            Side::Top => write!(f, "top"),
            Side::Bottom => write!(f, "bottom"),
        }
    }
}

/// Direction of travel through a path cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn is_vertical(&self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    pub fn is_horizontal(&self) -> bool {
        !self.is_vertical()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
        }
    }
}
