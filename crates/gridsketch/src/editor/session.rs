//! Editing session
//!
//! An [`Editor`] owns one diagram for the lifetime of an editing session and
//! turns pointer gestures and key presses into model mutations according to the
//! active [`Mode`].

use tracing::{debug, info};

use super::{Mode, ModeEvent};
use crate::core::{
    AsciiExporter, Attachment, BoxId, Diagram, Draft, Export, GridDisplay, GridPoint, Label,
    LabelOwner, LabelRef, LineRoute, PointerEvent, PointerKind, Rect, Result,
};

/// A drag in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gesture {
    DrawBox { anchor: GridPoint, current: GridPoint },
    DrawLine { start: Attachment, current: GridPoint },
    MoveBox { id: BoxId, last: GridPoint },
    /// `grab` is the pointer position relative to the label's first character
    MoveLabel { label: LabelRef, grab: GridPoint },
    Resize { id: BoxId },
}

/// Label text being typed, not yet attached to its owner
#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingLabel {
    owner: LabelOwner,
    offset: GridPoint,
    text: String,
}

/// Interactive editing state over one diagram
#[derive(Debug, Clone, Default)]
pub struct Editor {
    diagram: Diagram,
    mode: Mode,
    gesture: Option<Gesture>,
    pending_label: Option<PendingLabel>,
    exporter: AsciiExporter,
}

fn delta(from: GridPoint, to: GridPoint) -> GridPoint {
    GridPoint::new(to.col - from.col, to.row - from.row)
}

impl Editor {
    /// Start a session on an empty diagram
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session with a specific exporter
    pub fn with_exporter(exporter: AsciiExporter) -> Self {
        Self {
            exporter,
            ..Self::default()
        }
    }

    /// Start a session on an existing diagram
    pub fn with_diagram(diagram: Diagram) -> Self {
        Self {
            diagram,
            ..Self::default()
        }
    }

    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    pub fn diagram_mut(&mut self) -> &mut Diagram {
        &mut self.diagram
    }

    pub fn into_diagram(self) -> Diagram {
        self.diagram
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// True while label text is being typed
    pub fn is_typing(&self) -> bool {
        self.pending_label.is_some()
    }

    /// Apply a mode event
    ///
    /// Any pending label is committed and any unfinished drag is dropped.
    /// `Export` returns the exported diagram and leaves the mode unchanged.
    pub fn apply(&mut self, event: ModeEvent) -> Result<Option<Export>> {
        self.commit_label()?;
        self.gesture = None;

        let previous = self.mode;
        self.mode = previous.next(event);
        debug!(from = %previous, to = %self.mode, ?event, "Mode transition");

        if self.mode == Mode::Exporting {
            let export = self.exporter.export(&self.diagram);
            self.mode = previous;
            info!(mode = %self.mode, "Exported diagram");
            return Ok(Some(export));
        }
        Ok(None)
    }

    /// Feed a raw display event through the display's coordinate mapping
    ///
    /// A release outside the drawing area abandons the current drag.
    pub fn handle_pointer<D: GridDisplay + ?Sized>(
        &mut self,
        display: &D,
        event: &PointerEvent,
    ) -> Result<()> {
        match display.event_to_position(event) {
            Some(pos) => self.pointer(event.kind, pos),
            None => {
                if event.kind == PointerKind::Up {
                    self.gesture = None;
                }
                Ok(())
            }
        }
    }

    /// Handle a pointer event at a grid position
    pub fn pointer(&mut self, kind: PointerKind, pos: GridPoint) -> Result<()> {
        match kind {
            PointerKind::Down => self.pointer_down(pos),
            PointerKind::Drag => self.pointer_drag(pos),
            PointerKind::Up => {
                self.pointer_drag(pos)?;
                self.pointer_up(pos)
            }
        }
    }

    fn pointer_down(&mut self, pos: GridPoint) -> Result<()> {
        self.gesture = None;
        match self.mode {
            Mode::Normal | Mode::Exporting => {}
            Mode::DrawingBox => {
                self.gesture = Some(Gesture::DrawBox {
                    anchor: pos,
                    current: pos,
                });
            }
            Mode::DrawingLine => {
                if let Some(id) = self.diagram.box_at(pos) {
                    let start = self.diagram.attachment_for(id, pos)?;
                    self.gesture = Some(Gesture::DrawLine {
                        start,
                        current: pos,
                    });
                }
            }
            Mode::Labeling => self.begin_label(pos)?,
            Mode::MovingBox => {
                if let Some(id) = self.diagram.box_at(pos) {
                    self.gesture = Some(Gesture::MoveBox { id, last: pos });
                }
            }
            Mode::MovingLabel => {
                if let Some(label) = self.diagram.label_at(pos) {
                    if let Some(at) = self.diagram.label_position(label) {
                        self.gesture = Some(Gesture::MoveLabel {
                            label,
                            grab: delta(at, pos),
                        });
                    }
                }
            }
            Mode::ResizingBox => {
                if let Some(id) = self.diagram.box_at(pos) {
                    self.gesture = Some(Gesture::Resize { id });
                }
            }
            Mode::Deleting => self.delete_at(pos)?,
        }
        Ok(())
    }

    fn pointer_drag(&mut self, pos: GridPoint) -> Result<()> {
        let Some(gesture) = self.gesture.as_mut() else {
            return Ok(());
        };
        match gesture {
            Gesture::DrawBox { current, .. } | Gesture::DrawLine { current, .. } => {
                *current = pos;
            }
            Gesture::MoveBox { id, last } => {
                let step = delta(*last, pos);
                *last = pos;
                let id = *id;
                if step != GridPoint::default() {
                    self.diagram.move_box(id, step.col, step.row)?;
                }
            }
            Gesture::MoveLabel { label, grab } => {
                let (label, grab) = (*label, *grab);
                if let Some(origin) = self.diagram.label_origin(label.owner) {
                    let at = delta(grab, pos);
                    self.diagram.move_label(label, delta(origin, at))?;
                }
            }
            Gesture::Resize { id } => {
                let id = *id;
                self.diagram.resize_box(id, pos)?;
            }
        }
        Ok(())
    }

    fn pointer_up(&mut self, pos: GridPoint) -> Result<()> {
        match self.gesture.take() {
            Some(Gesture::DrawBox { anchor, .. }) => {
                let bounds = Rect::from_corners(anchor, pos);
                if bounds.has_interior() {
                    self.diagram.add_box(bounds)?;
                } else {
                    debug!(?bounds, "Ignoring box without interior");
                }
            }
            Some(Gesture::DrawLine { start, .. }) => {
                let end = self.diagram.endpoint_at(pos);
                self.diagram.add_line(start, end)?;
            }
            Some(_) | None => {}
        }
        Ok(())
    }

    fn delete_at(&mut self, pos: GridPoint) -> Result<()> {
        if let Some(label) = self.diagram.label_at(pos) {
            self.diagram.delete_label(label)?;
        } else if let Some(line) = self.diagram.line_at(pos) {
            self.diagram.delete_line(line)?;
        } else if let Some(id) = self.diagram.box_at(pos) {
            self.diagram.delete_box(id)?;
        }
        Ok(())
    }

    // --- labels ------------------------------------------------------------

    fn begin_label(&mut self, pos: GridPoint) -> Result<()> {
        self.commit_label()?;

        let owner = self
            .diagram
            .line_at(pos)
            .map(LabelOwner::Line)
            .or_else(|| self.diagram.box_at(pos).map(LabelOwner::Box));
        let Some(owner) = owner else {
            return Ok(());
        };
        let Some(origin) = self.diagram.label_origin(owner) else {
            return Ok(());
        };

        self.pending_label = Some(PendingLabel {
            owner,
            offset: delta(origin, pos),
            text: String::new(),
        });
        debug!(%owner, "Started label");
        Ok(())
    }

    /// Append a character to the label being typed
    pub fn type_char(&mut self, c: char) {
        if let Some(pending) = self.pending_label.as_mut() {
            pending.text.push(c);
        }
    }

    /// Start a new row in the label being typed
    pub fn newline(&mut self) {
        self.type_char('\n');
    }

    /// Remove the last character of the label being typed
    pub fn backspace(&mut self) {
        if let Some(pending) = self.pending_label.as_mut() {
            pending.text.pop();
        }
    }

    /// Attach the label being typed to its owner
    ///
    /// Empty labels are discarded. Returns the new label, if one was added.
    pub fn commit_label(&mut self) -> Result<Option<LabelRef>> {
        let Some(pending) = self.pending_label.take() else {
            return Ok(None);
        };
        if pending.text.is_empty() {
            return Ok(None);
        }
        let label_ref = self
            .diagram
            .add_label(pending.owner, Label::new(pending.offset, pending.text))?;
        Ok(Some(label_ref))
    }

    /// Drop the label being typed
    pub fn cancel_label(&mut self) {
        self.pending_label = None;
    }

    // --- preview -------------------------------------------------------------

    /// The in-progress gesture or label, for the frame renderer
    pub fn draft(&self) -> Option<Draft> {
        if let Some(pending) = &self.pending_label {
            let origin = self.diagram.label_origin(pending.owner)?;
            return Some(Draft::Label {
                origin,
                label: Label::new(pending.offset, pending.text.clone()),
            });
        }

        match self.gesture? {
            Gesture::DrawBox { anchor, current } => {
                Some(Draft::Box(Rect::from_corners(anchor, current)))
            }
            Gesture::DrawLine { start, current } => {
                let from = self.diagram.resolve_attachment(&start)?;
                Some(Draft::Line(LineRoute::new(from, start.anchor.side, current)))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Endpoint, Side, TextDisplay};

    fn drag(editor: &mut Editor, from: (i32, i32), to: (i32, i32)) {
        editor.pointer(PointerKind::Down, from.into()).unwrap();
        editor.pointer(PointerKind::Drag, to.into()).unwrap();
        editor.pointer(PointerKind::Up, to.into()).unwrap();
    }

    fn editor_with_two_boxes() -> Editor {
        let mut editor = Editor::new();
        editor.apply(ModeEvent::DrawBox).unwrap();
        drag(&mut editor, (0, 0), (4, 4));
        drag(&mut editor, (14, 4), (10, 0));
        editor
    }

    #[test]
    fn test_draw_boxes() {
        let editor = editor_with_two_boxes();
        let bounds: Vec<Rect> = editor.diagram().boxes().map(|b| b.bounds).collect();
        assert_eq!(bounds, vec![Rect::new(0, 0, 4, 4), Rect::new(10, 0, 14, 4)]);
    }

    #[test]
    fn test_flat_drag_creates_no_box() {
        let mut editor = Editor::new();
        editor.apply(ModeEvent::DrawBox).unwrap();
        drag(&mut editor, (0, 0), (6, 0));
        assert_eq!(editor.diagram().box_count(), 0);
    }

    #[test]
    fn test_draft_box_while_dragging() {
        let mut editor = Editor::new();
        editor.apply(ModeEvent::DrawBox).unwrap();
        editor.pointer(PointerKind::Down, (2, 2).into()).unwrap();
        editor.pointer(PointerKind::Drag, (5, 6).into()).unwrap();
        assert_eq!(editor.draft(), Some(Draft::Box(Rect::new(2, 2, 5, 6))));
    }

    #[test]
    fn test_draw_line_between_boxes() {
        let mut editor = editor_with_two_boxes();
        editor.apply(ModeEvent::ToggleLineDraw).unwrap();
        editor.pointer(PointerKind::Down, (4, 2).into()).unwrap();
        editor.pointer(PointerKind::Drag, (8, 2).into()).unwrap();
        assert!(matches!(editor.draft(), Some(Draft::Line(_))));
        editor.pointer(PointerKind::Up, (10, 2).into()).unwrap();

        let line = editor.diagram().lines().next().unwrap();
        assert_eq!(line.start.anchor.side, Side::Right);
        assert!(matches!(line.end, Endpoint::Attached(_)));
        assert!(editor.draft().is_none());
    }

    #[test]
    fn test_session_on_existing_diagram() {
        let mut diagram = Diagram::new();
        diagram.add_box(Rect::new(0, 0, 4, 4)).unwrap();
        let mut editor = Editor::with_diagram(diagram);
        editor.diagram_mut().add_box(Rect::new(10, 0, 14, 4)).unwrap();
        assert_eq!(editor.diagram().box_count(), 2);

        editor.apply(ModeEvent::ToggleLineDraw).unwrap();
        drag(&mut editor, (4, 2), (10, 2));

        let diagram = editor.into_diagram();
        assert_eq!(diagram.line_count(), 1);
        let line = diagram.lines().next().unwrap();
        assert!(matches!(line.end, Endpoint::Attached(_)));
    }

    #[test]
    fn test_line_must_start_on_box() {
        let mut editor = editor_with_two_boxes();
        editor.apply(ModeEvent::ToggleLineDraw).unwrap();
        drag(&mut editor, (7, 7), (2, 2));
        assert_eq!(editor.diagram().line_count(), 0);
    }

    #[test]
    fn test_label_typing_and_commit_on_mode_change() {
        let mut editor = editor_with_two_boxes();
        editor.apply(ModeEvent::ToggleLabel).unwrap();
        editor.pointer(PointerKind::Down, (1, 1).into()).unwrap();
        assert!(editor.is_typing());
        editor.type_char('A');
        editor.type_char('B');
        editor.type_char('X');
        editor.backspace();
        editor.newline();
        editor.type_char('C');
        assert!(matches!(editor.draft(), Some(Draft::Label { .. })));

        editor.apply(ModeEvent::Cancel).unwrap();
        assert!(!editor.is_typing());
        let labels = editor.diagram().boxes().next().unwrap().labels.clone();
        assert_eq!(labels, vec![Label::new(GridPoint::new(1, 1), "AB\nC")]);
    }

    #[test]
    fn test_empty_label_is_discarded() {
        let mut editor = editor_with_two_boxes();
        editor.apply(ModeEvent::ToggleLabel).unwrap();
        editor.pointer(PointerKind::Down, (1, 1).into()).unwrap();
        assert_eq!(editor.commit_label().unwrap(), None);
        assert!(editor.diagram().boxes().all(|b| b.labels.is_empty()));
    }

    #[test]
    fn test_move_box() {
        let mut editor = editor_with_two_boxes();
        editor.apply(ModeEvent::ToggleMove).unwrap();
        editor.pointer(PointerKind::Down, (2, 2).into()).unwrap();
        editor.pointer(PointerKind::Drag, (3, 4).into()).unwrap();
        editor.pointer(PointerKind::Up, (4, 6).into()).unwrap();
        let first = editor.diagram().boxes().next().unwrap();
        assert_eq!(first.bounds, Rect::new(2, 4, 6, 8));
    }

    #[test]
    fn test_resize_box() {
        let mut editor = editor_with_two_boxes();
        editor.apply(ModeEvent::ToggleResizeBox).unwrap();
        drag(&mut editor, (2, 2), (7, 9));
        let first = editor.diagram().boxes().next().unwrap();
        assert_eq!(first.bounds, Rect::new(0, 0, 7, 9));
    }

    #[test]
    fn test_move_label() {
        let mut editor = editor_with_two_boxes();
        editor.apply(ModeEvent::ToggleLabel).unwrap();
        editor.pointer(PointerKind::Down, (1, 1).into()).unwrap();
        editor.type_char('h');
        editor.type_char('i');
        editor.apply(ModeEvent::ToggleMoveText).unwrap();

        // Grab the 'i' and drag it one cell right and one down
        drag(&mut editor, (2, 1), (3, 2));
        let label = &editor.diagram().boxes().next().unwrap().labels[0];
        assert_eq!(label.offset, GridPoint::new(2, 2));
    }

    #[test]
    fn test_delete_prefers_label_then_line_then_box() {
        let mut editor = editor_with_two_boxes();
        editor.apply(ModeEvent::ToggleLineDraw).unwrap();
        drag(&mut editor, (4, 2), (10, 2));
        editor.apply(ModeEvent::ToggleLabel).unwrap();
        editor.pointer(PointerKind::Down, (11, 1).into()).unwrap();
        editor.type_char('x');

        editor.apply(ModeEvent::Delete).unwrap();
        editor.pointer(PointerKind::Down, (11, 1).into()).unwrap();
        assert!(editor.diagram().boxes().all(|b| b.labels.is_empty()));
        assert_eq!(editor.diagram().box_count(), 2);

        editor.pointer(PointerKind::Down, (7, 2).into()).unwrap();
        assert_eq!(editor.diagram().line_count(), 0);

        editor.pointer(PointerKind::Down, (12, 2).into()).unwrap();
        assert_eq!(editor.diagram().box_count(), 1);
    }

    #[test]
    fn test_export_keeps_mode() {
        let mut editor = editor_with_two_boxes();
        let export = editor.apply(ModeEvent::Export).unwrap().unwrap();
        assert_eq!(editor.mode(), Mode::DrawingBox);
        assert_eq!(export.bounds, Some(Rect::new(0, 0, 14, 4)));
        assert!(export.text.starts_with("┌---┐"));
    }

    #[test]
    fn test_handle_pointer_outside_display_abandons_drag() {
        let display = TextDisplay::new(20, 10);
        let mut editor = Editor::new();
        editor.apply(ModeEvent::DrawBox).unwrap();
        editor
            .handle_pointer(&display, &PointerEvent::new(1, 1, PointerKind::Down))
            .unwrap();
        editor
            .handle_pointer(&display, &PointerEvent::new(50, 50, PointerKind::Up))
            .unwrap();
        assert!(editor.draft().is_none());
        assert_eq!(editor.diagram().box_count(), 0);
    }
}
