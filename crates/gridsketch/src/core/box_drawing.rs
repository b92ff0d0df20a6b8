//! Shared box drawing characters for diagram rendering
//!
//! This module provides the character tables used for box borders and
//! routed lines, in both Unicode and ASCII modes.

use super::{CharacterSet, Direction};

/// Box drawing characters for rendering rectangular shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxChars {
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
    pub horizontal: char,
    pub vertical: char,
}

impl BoxChars {
    /// Box characters for the live screen renderer
    pub fn screen(style: CharacterSet) -> Self {
        match style {
            CharacterSet::Ascii => Self::ascii(),
            CharacterSet::Unicode => Self::unicode(),
        }
    }

    /// Box characters for text export
    ///
    /// Exported boxes keep Unicode corners and verticals but use a plain
    /// hyphen for horizontal edges.
    pub fn export(style: CharacterSet) -> Self {
        match style {
            CharacterSet::Ascii => Self::ascii(),
            CharacterSet::Unicode => Self {
                horizontal: '-',
                ..Self::unicode()
            },
        }
    }

    /// ASCII-only box characters
    pub fn ascii() -> Self {
        Self {
            top_left: '+',
            top_right: '+',
            bottom_left: '+',
            bottom_right: '+',
            horizontal: '-',
            vertical: '|',
        }
    }

    /// Unicode box-drawing characters
    pub fn unicode() -> Self {
        Self {
            top_left: '┌',
            top_right: '┐',
            bottom_left: '└',
            bottom_right: '┘',
            horizontal: '─',
            vertical: '│',
        }
    }
}

impl Default for BoxChars {
    fn default() -> Self {
        Self::unicode()
    }
}

/// Character set for routed lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeChars {
    pub horizontal: char,
    pub vertical: char,
    pub corner_top_left: char,     // ┌ (goes RIGHT and DOWN)
    pub corner_top_right: char,    // ┐ (goes LEFT and DOWN)
    pub corner_bottom_left: char,  // └ (goes RIGHT and UP)
    pub corner_bottom_right: char, // ┘ (goes LEFT and UP)
    pub junction_down: char,       // ┬ (line leaves a bottom edge)
    pub junction_up: char,         // ┴ (line leaves a top edge)
    pub junction_right: char,      // ├ (line leaves a right edge)
    pub junction_left: char,       // ┤ (line leaves a left edge)
    pub arrow_up: char,
    pub arrow_down: char,
    pub arrow_left: char,
    pub arrow_right: char,
}

impl EdgeChars {
    /// Get edge characters for the given style
    pub fn for_style(style: CharacterSet) -> Self {
        if style.is_ascii() {
            Self::ascii()
        } else {
            Self::unicode()
        }
    }

    /// ASCII edge characters
    pub fn ascii() -> Self {
        Self {
            horizontal: '-',
            vertical: '|',
            corner_top_left: '+',
            corner_top_right: '+',
            corner_bottom_left: '+',
            corner_bottom_right: '+',
            junction_down: '+',
            junction_up: '+',
            junction_right: '+',
            junction_left: '+',
            arrow_up: '^',
            arrow_down: 'v',
            arrow_left: '<',
            arrow_right: '>',
        }
    }

    /// Unicode box-drawing edge characters
    pub fn unicode() -> Self {
        Self {
            horizontal: '─',
            vertical: '│',
            corner_top_left: '┌',
            corner_top_right: '┐',
            corner_bottom_left: '└',
            corner_bottom_right: '┘',
            junction_down: '┬',
            junction_up: '┴',
            junction_right: '├',
            junction_left: '┤',
            arrow_up: '▲',
            arrow_down: '▼',
            arrow_left: '◀',
            arrow_right: '▶',
        }
    }

    /// Tee drawn where a line leaves its source box
    pub fn tee(&self, direction: Direction) -> char {
        match direction {
            Direction::Left => self.junction_left,
            Direction::Right => self.junction_right,
            Direction::Up => self.junction_up,
            Direction::Down => self.junction_down,
        }
    }

    /// Arrowhead pointing in the direction of travel
    pub fn arrow(&self, direction: Direction) -> char {
        match direction {
            Direction::Left => self.arrow_left,
            Direction::Right => self.arrow_right,
            Direction::Up => self.arrow_up,
            Direction::Down => self.arrow_down,
        }
    }

    /// Straight run along the direction of travel
    pub fn straight(&self, direction: Direction) -> char {
        if direction.is_horizontal() {
            self.horizontal
        } else {
            self.vertical
        }
    }

    /// Corner for a 90° turn from `prev` into `next`
    ///
    /// Returns `None` for pairs that are not a quarter turn.
    pub fn corner(&self, prev: Direction, next: Direction) -> Option<char> {
        use Direction::*;
        match (prev, next) {
            (Right, Up) | (Down, Left) => Some(self.corner_bottom_right),
            (Left, Up) | (Down, Right) => Some(self.corner_bottom_left),
            (Left, Down) | (Up, Right) => Some(self.corner_top_left),
            (Right, Down) | (Up, Left) => Some(self.corner_top_right),
            _ => None,
        }
    }
}

impl Default for EdgeChars {
    fn default() -> Self {
        Self::unicode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_chars_ascii() {
        let chars = BoxChars::screen(CharacterSet::Ascii);
        assert_eq!(chars.top_left, '+');
        assert_eq!(chars.horizontal, '-');
    }

    #[test]
    fn test_box_chars_screen_unicode() {
        let chars = BoxChars::screen(CharacterSet::Unicode);
        assert_eq!(chars.top_left, '┌');
        assert_eq!(chars.horizontal, '─');
    }

    #[test]
    fn test_box_chars_export_uses_hyphen() {
        let chars = BoxChars::export(CharacterSet::Unicode);
        assert_eq!(chars.horizontal, '-');
        assert_eq!(chars.vertical, '│');
        assert_eq!(chars.bottom_right, '┘');
    }

    #[test]
    fn test_corner_table() {
        use Direction::*;
        let chars = EdgeChars::unicode();
        assert_eq!(chars.corner(Right, Up), Some('┘'));
        assert_eq!(chars.corner(Down, Left), Some('┘'));
        assert_eq!(chars.corner(Left, Up), Some('└'));
        assert_eq!(chars.corner(Down, Right), Some('└'));
        assert_eq!(chars.corner(Left, Down), Some('┌'));
        assert_eq!(chars.corner(Up, Right), Some('┌'));
        assert_eq!(chars.corner(Right, Down), Some('┐'));
        assert_eq!(chars.corner(Up, Left), Some('┐'));
        assert_eq!(chars.corner(Left, Right), None);
        assert_eq!(chars.corner(Up, Up), None);
    }

    #[test]
    fn test_tees_and_arrows() {
        let chars = EdgeChars::unicode();
        assert_eq!(chars.tee(Direction::Left), '┤');
        assert_eq!(chars.tee(Direction::Right), '├');
        assert_eq!(chars.tee(Direction::Up), '┴');
        assert_eq!(chars.tee(Direction::Down), '┬');
        assert_eq!(chars.arrow(Direction::Left), '◀');
        assert_eq!(chars.arrow(Direction::Right), '▶');
        assert_eq!(chars.arrow(Direction::Up), '▲');
        assert_eq!(chars.arrow(Direction::Down), '▼');
    }

    #[test]
    fn test_edge_chars_ascii() {
        let chars = EdgeChars::for_style(CharacterSet::Ascii);
        assert_eq!(chars.straight(Direction::Up), '|');
        assert_eq!(chars.arrow(Direction::Right), '>');
    }
}
