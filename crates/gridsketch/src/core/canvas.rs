//! Fixed-size text canvas used by the exporter
//!
//! The canvas is one flat character buffer laid out exactly like the text it
//! produces: `columns` cells followed by a newline for every row, so cell
//! `(col, row)` lives at offset `row * (columns + 1) + col`.

use std::fmt;

use super::{GridPoint, Rect};

/// Character grid backed by a newline-delimited buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsciiCanvas {
    columns: usize,
    rows: usize,
    buffer: Vec<char>,
}

impl AsciiCanvas {
    /// Create a canvas filled with spaces
    pub fn new(columns: usize, rows: usize) -> Self {
        let mut buffer = Vec::with_capacity((columns + 1) * rows);
        for _ in 0..rows {
            buffer.extend(std::iter::repeat(' ').take(columns));
            buffer.push('\n');
        }
        Self {
            columns,
            rows,
            buffer,
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Buffer offset of a cell, or `None` outside the canvas
    pub fn offset(&self, p: GridPoint) -> Option<usize> {
        let col = usize::try_from(p.col).ok()?;
        let row = usize::try_from(p.row).ok()?;
        if col >= self.columns || row >= self.rows {
            return None;
        }
        // One newline per preceding row
        Some(row * (self.columns + 1) + col)
    }

    /// Write a character; cells outside the canvas are dropped
    ///
    /// Returns whether the cell was written.
    pub fn set_char(&mut self, p: GridPoint, c: char) -> bool {
        match self.offset(p) {
            Some(offset) => {
                self.buffer[offset] = c;
                true
            }
            None => false,
        }
    }

    /// Get the character at the specified position
    pub fn get_char(&self, p: GridPoint) -> char {
        self.offset(p).map_or(' ', |offset| self.buffer[offset])
    }

    /// Text of the cells inside `area`, one row per line, joined by newlines
    ///
    /// The area is clipped to the canvas; an area entirely off-canvas yields
    /// an empty string.
    pub fn crop(&self, area: &Rect) -> String {
        if self.columns == 0 || self.rows == 0 {
            return String::new();
        }
        let max_col = self.columns as i32 - 1;
        let max_row = self.rows as i32 - 1;
        let min_col = area.min_col.max(0);
        let min_row = area.min_row.max(0);
        let last_col = area.max_col.min(max_col);
        let last_row = area.max_row.min(max_row);
        if min_col > last_col || min_row > last_row {
            return String::new();
        }

        let width = (last_col - min_col + 1) as usize;
        (min_row..=last_row)
            .filter_map(|row| {
                let start = self.offset(GridPoint::new(min_col, row))?;
                Some(self.buffer[start..start + width].iter().collect::<String>())
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for AsciiCanvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text: String = self.buffer.iter().collect();
        f.write_str(&text)
    }
}
