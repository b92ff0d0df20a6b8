//! Character-grid display abstraction
//!
//! The live renderer draws through [`GridDisplay`]; a terminal, a browser
//! canvas or the in-memory [`TextDisplay`] can sit behind it.

use std::fmt;

use super::GridPoint;

/// Colors a display may be asked to draw with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    /// The display's default color
    #[default]
    Reset,
    Black,
    White,
    Grey,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
}

/// Phase of a pointer gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    Down,
    Drag,
    Up,
}

/// A pointer event in display coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointerEvent {
    pub x: u16,
    pub y: u16,
    pub kind: PointerKind,
}

impl PointerEvent {
    pub fn new(x: u16, y: u16, kind: PointerKind) -> Self {
        Self { x, y, kind }
    }
}

/// A grid of character cells that can be drawn on
pub trait GridDisplay {
    /// Write one cell
    fn draw(&mut self, col: i32, row: i32, glyph: char, fg: Color, bg: Option<Color>);

    /// Reset every visible cell
    fn clear(&mut self);

    /// Grid cell under a pointer event, or `None` outside the drawing area
    fn event_to_position(&self, event: &PointerEvent) -> Option<GridPoint>;
}

/// One cell of a [`TextDisplay`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    pub fg: Color,
    pub bg: Option<Color>,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            glyph: ' ',
            fg: Color::Reset,
            bg: None,
        }
    }
}

/// In-memory display, useful for tests and headless rendering
#[derive(Debug, Clone)]
pub struct TextDisplay {
    columns: usize,
    rows: usize,
    cells: Vec<Cell>,
}

impl TextDisplay {
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            columns,
            rows,
            cells: vec![Cell::default(); columns * rows],
        }
    }

    fn index(&self, col: i32, row: i32) -> Option<usize> {
        let col = usize::try_from(col).ok()?;
        let row = usize::try_from(row).ok()?;
        (col < self.columns && row < self.rows).then_some(row * self.columns + col)
    }

    pub fn cell(&self, col: i32, row: i32) -> Option<&Cell> {
        self.index(col, row).map(|i| &self.cells[i])
    }

    /// Glyph at a cell, or a space outside the display
    pub fn glyph(&self, col: i32, row: i32) -> char {
        self.cell(col, row).map_or(' ', |c| c.glyph)
    }
}

impl GridDisplay for TextDisplay {
    fn draw(&mut self, col: i32, row: i32, glyph: char, fg: Color, bg: Option<Color>) {
        if let Some(i) = self.index(col, row) {
            self.cells[i] = Cell { glyph, fg, bg };
        }
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    fn event_to_position(&self, event: &PointerEvent) -> Option<GridPoint> {
        let (col, row) = (usize::from(event.x), usize::from(event.y));
        (col < self.columns && row < self.rows)
            .then(|| GridPoint::new(i32::from(event.x), i32::from(event.y)))
    }
}

impl fmt::Display for TextDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.columns == 0 {
            return Ok(());
        }
        let rows: Vec<String> = self
            .cells
            .chunks(self.columns)
            .map(|row| {
                let s: String = row.iter().map(|c| c.glyph).collect();
                s.trim_end().to_string()
            })
            .collect();
        write!(f, "{}", rows.join("\n").trim_end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_and_clear() {
        let mut display = TextDisplay::new(4, 3);
        display.draw(1, 2, 'x', Color::Cyan, Some(Color::Black));
        assert_eq!(display.glyph(1, 2), 'x');
        assert_eq!(display.cell(1, 2).unwrap().fg, Color::Cyan);

        display.clear();
        assert_eq!(display.glyph(1, 2), ' ');
        assert_eq!(display.cell(1, 2), Some(&Cell::default()));
    }

    #[test]
    fn test_out_of_range_draw_is_ignored() {
        let mut display = TextDisplay::new(2, 2);
        display.draw(-1, 0, 'x', Color::Reset, None);
        display.draw(2, 0, 'x', Color::Reset, None);
        assert_eq!(display.to_string(), "");
    }

    #[test]
    fn test_event_to_position() {
        let display = TextDisplay::new(10, 5);
        let inside = PointerEvent::new(3, 4, PointerKind::Down);
        let outside = PointerEvent::new(10, 0, PointerKind::Down);
        assert_eq!(display.event_to_position(&inside), Some(GridPoint::new(3, 4)));
        assert_eq!(display.event_to_position(&outside), None);
    }
}
