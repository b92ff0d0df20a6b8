//! Interaction modes and the transition table between them

use std::fmt;

/// The active editing tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    Normal,
    DrawingBox,
    DrawingLine,
    Labeling,
    MovingBox,
    MovingLabel,
    ResizingBox,
    Deleting,
    /// Transient: entered for the duration of one export
    Exporting,
}

/// UI events that switch tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModeEvent {
    DrawBox,
    ToggleLineDraw,
    ToggleLabel,
    ToggleMove,
    ToggleMoveText,
    ToggleResizeBox,
    Delete,
    Export,
    /// Back to normal from any mode
    Cancel,
}

impl Mode {
    /// Mode after `event`
    ///
    /// Tool events enter their mode, or fall back to `Normal` when that mode is
    /// already active. `Export` always lands in `Exporting`; the editor leaves
    /// it again once the export is produced.
    pub fn next(self, event: ModeEvent) -> Mode {
        let target = match event {
            ModeEvent::Cancel => return Mode::Normal,
            ModeEvent::Export => return Mode::Exporting,
            ModeEvent::DrawBox => Mode::DrawingBox,
            ModeEvent::ToggleLineDraw => Mode::DrawingLine,
            ModeEvent::ToggleLabel => Mode::Labeling,
            ModeEvent::ToggleMove => Mode::MovingBox,
            ModeEvent::ToggleMoveText => Mode::MovingLabel,
            ModeEvent::ToggleResizeBox => Mode::ResizingBox,
            ModeEvent::Delete => Mode::Deleting,
        };
        if self == target {
            Mode::Normal
        } else {
            target
        }
    }

    /// One-line usage hint for the UI chrome
    pub fn hint(&self) -> &'static str {
        match self {
            Mode::Normal => "pick a tool",
            Mode::DrawingBox => "drag to draw a box",
            Mode::DrawingLine => "drag from a box to draw a line",
            Mode::Labeling => "click a box or line, then type; Esc to finish",
            Mode::MovingBox => "drag a box to move it",
            Mode::MovingLabel => "drag a label to move it",
            Mode::ResizingBox => "drag inside a box to set its bottom-right corner",
            Mode::Deleting => "click a label, line or box to delete it",
            Mode::Exporting => "exporting",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Normal => "normal",
            Mode::DrawingBox => "box",
            Mode::DrawingLine => "line",
            Mode::Labeling => "label",
            Mode::MovingBox => "move",
            Mode::MovingLabel => "move label",
            Mode::ResizingBox => "resize",
            Mode::Deleting => "delete",
            Mode::Exporting => "export",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_enters_and_leaves() {
        let mode = Mode::Normal.next(ModeEvent::ToggleLineDraw);
        assert_eq!(mode, Mode::DrawingLine);
        assert_eq!(mode.next(ModeEvent::ToggleLineDraw), Mode::Normal);
    }

    #[test]
    fn test_switch_between_tools() {
        let mode = Mode::DrawingBox.next(ModeEvent::ToggleResizeBox);
        assert_eq!(mode, Mode::ResizingBox);
        assert_eq!(mode.next(ModeEvent::Delete), Mode::Deleting);
        assert_eq!(Mode::Deleting.next(ModeEvent::Delete), Mode::Normal);
    }

    #[test]
    fn test_export_and_cancel() {
        assert_eq!(Mode::Labeling.next(ModeEvent::Export), Mode::Exporting);
        assert_eq!(Mode::MovingLabel.next(ModeEvent::Cancel), Mode::Normal);
        assert_eq!(Mode::Normal.next(ModeEvent::Cancel), Mode::Normal);
    }

    #[test]
    fn test_every_mode_has_a_hint() {
        let modes = [
            Mode::Normal,
            Mode::DrawingBox,
            Mode::DrawingLine,
            Mode::Labeling,
            Mode::MovingBox,
            Mode::MovingLabel,
            Mode::ResizingBox,
            Mode::Deleting,
            Mode::Exporting,
        ];
        for mode in modes {
            assert!(!mode.hint().is_empty());
            assert!(!mode.to_string().is_empty());
        }
    }
}
