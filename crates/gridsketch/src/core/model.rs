//! Diagram model
//!
//! Stores boxes, the lines connecting them and the labels attached to either.
//! Lines refer to boxes by id; every mutation that could leave a line pointing
//! at a missing box or a stale edge fixes the line up before returning.

use std::fmt;

use tracing::{debug, trace};

use super::{
    closest_point_on_box, Anchor, DiagramError, GridPoint, LineRoute, PathCell, Rect, Result,
};

/// Stable identifier of a box within one diagram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoxId(pub usize);

impl fmt::Display for BoxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "box#{}", self.0)
    }
}

/// Stable identifier of a line within one diagram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(pub usize);

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line#{}", self.0)
    }
}

/// A block of text placed relative to its owner
///
/// The offset is measured from the owning box's top-left corner, or from the
/// owning line's start point. Each `\n` starts a new row below the previous one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub offset: GridPoint,
    pub text: String,
}

impl Label {
    pub fn new(offset: GridPoint, text: impl Into<String>) -> Self {
        Self {
            offset,
            text: text.into(),
        }
    }

    /// Every character of the label with its absolute position
    pub fn glyphs(&self, origin: GridPoint) -> impl Iterator<Item = (GridPoint, char)> + '_ {
        let start = origin.offset(self.offset.col, self.offset.row);
        self.text.split('\n').enumerate().flat_map(move |(row, line)| {
            line.chars()
                .enumerate()
                .map(move |(col, c)| (start.offset(col as i32, row as i32), c))
        })
    }
}

/// What a label is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelOwner {
    Box(BoxId),
    Line(LineId),
}

impl fmt::Display for LabelOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelOwner::Box(id) => write!(f, "{}", id),
            LabelOwner::Line(id) => write!(f, "{}", id),
        }
    }
}

/// Position of a label in its owner's label list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LabelRef {
    pub owner: LabelOwner,
    pub index: usize,
}

impl LabelRef {
    pub fn new(owner: LabelOwner, index: usize) -> Self {
        Self { owner, index }
    }
}

impl fmt::Display for LabelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/label#{}", self.owner, self.index)
    }
}

/// A rectangle on the grid with its labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoxData {
    pub id: BoxId,
    pub bounds: Rect,
    pub labels: Vec<Label>,
}

/// A line endpoint pinned to a box edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attachment {
    pub box_id: BoxId,
    pub anchor: Anchor,
}

impl Attachment {
    pub fn new(box_id: BoxId, anchor: Anchor) -> Self {
        Self { box_id, anchor }
    }
}

/// The far end of a line: either pinned to a box or a free grid point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Attached(Attachment),
    Free(GridPoint),
}

impl Endpoint {
    /// Box this endpoint is pinned to, if any
    pub fn box_id(&self) -> Option<BoxId> {
        match self {
            Endpoint::Attached(attachment) => Some(attachment.box_id),
            Endpoint::Free(_) => None,
        }
    }
}

/// A routed connector that always starts on a box
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineData {
    pub id: LineId,
    pub start: Attachment,
    pub end: Endpoint,
    pub labels: Vec<Label>,
}

impl LineData {
    /// True when either end of the line is pinned to `box_id`
    pub fn touches(&self, box_id: BoxId) -> bool {
        self.start.box_id == box_id || self.end.box_id() == Some(box_id)
    }
}

/// The diagram being edited
///
/// Boxes and lines are kept in insertion order; later items are drawn on top
/// and win hit-tests.
#[derive(Debug, Default, Clone)]
pub struct Diagram {
    boxes: Vec<BoxData>,
    lines: Vec<LineData>,
    next_box: usize,
    next_line: usize,
}

impl Diagram {
    /// Create a new empty diagram
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty() && self.lines.is_empty()
    }

    pub fn box_count(&self) -> usize {
        self.boxes.len()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Iterate over all boxes in drawing order
    pub fn boxes(&self) -> impl Iterator<Item = &BoxData> {
        self.boxes.iter()
    }

    /// Iterate over all lines in drawing order
    pub fn lines(&self) -> impl Iterator<Item = &LineData> {
        self.lines.iter()
    }

    pub fn get_box(&self, id: BoxId) -> Option<&BoxData> {
        self.boxes.iter().find(|b| b.id == id)
    }

    pub fn get_line(&self, id: LineId) -> Option<&LineData> {
        self.lines.iter().find(|l| l.id == id)
    }

    fn box_mut(&mut self, id: BoxId) -> Result<&mut BoxData> {
        self.boxes
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(DiagramError::unknown_box(id))
    }

    fn line_mut(&mut self, id: LineId) -> Result<&mut LineData> {
        self.lines
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(DiagramError::unknown_line(id))
    }

    /// Remove every box, line and label
    pub fn clear(&mut self) {
        self.boxes.clear();
        self.lines.clear();
    }

    // --- boxes -------------------------------------------------------------

    /// Add a box; it must have at least one interior cell on each axis
    pub fn add_box(&mut self, bounds: Rect) -> Result<BoxId> {
        if !bounds.has_interior() {
            return Err(DiagramError::DegenerateBox { bounds });
        }
        let id = BoxId(self.next_box);
        self.next_box += 1;
        self.boxes.push(BoxData {
            id,
            bounds,
            labels: Vec::new(),
        });
        debug!(%id, ?bounds, "Added box");
        Ok(id)
    }

    /// Translate a box
    ///
    /// Anchors are box-relative, so attached lines follow without changes.
    pub fn move_box(&mut self, id: BoxId, dcol: i32, drow: i32) -> Result<()> {
        let data = self.box_mut(id)?;
        data.bounds = data.bounds.translated(dcol, drow);
        trace!(%id, dcol, drow, "Moved box");
        Ok(())
    }

    /// Replace a box's bounds and re-anchor every line attached to it
    ///
    /// Each anchor keeps its previous absolute position projected onto the
    /// nearest edge of the new bounds, clamped to that edge's span.
    pub fn set_box_bounds(&mut self, id: BoxId, bounds: Rect) -> Result<()> {
        if !bounds.has_interior() {
            return Err(DiagramError::DegenerateBox { bounds });
        }
        let data = self.box_mut(id)?;
        let old = data.bounds;
        data.bounds = bounds;

        let reanchor = |attachment: &mut Attachment| {
            if attachment.box_id == id {
                let absolute = attachment.anchor.resolve(&old);
                attachment.anchor = closest_point_on_box(absolute, &bounds).clamped_to(&bounds);
            }
        };
        for line in &mut self.lines {
            reanchor(&mut line.start);
            if let Endpoint::Attached(end) = &mut line.end {
                reanchor(end);
            }
        }
        debug!(%id, ?old, new = ?bounds, "Changed box bounds");
        Ok(())
    }

    /// Drag a box's bottom-right corner to `corner`
    ///
    /// The corner is clamped so the box keeps a one-cell interior. Returns the
    /// resulting bounds.
    pub fn resize_box(&mut self, id: BoxId, corner: GridPoint) -> Result<Rect> {
        let current = self
            .get_box(id)
            .ok_or(DiagramError::unknown_box(id))?
            .bounds;
        let bounds = Rect::new(
            current.min_col,
            current.min_row,
            corner.col.max(current.min_col + 1),
            corner.row.max(current.min_row + 1),
        );
        self.set_box_bounds(id, bounds)?;
        Ok(bounds)
    }

    /// Delete a box and every line attached to it
    ///
    /// Returns the ids of the lines removed along with the box.
    pub fn delete_box(&mut self, id: BoxId) -> Result<Vec<LineId>> {
        let position = self
            .boxes
            .iter()
            .position(|b| b.id == id)
            .ok_or(DiagramError::unknown_box(id))?;
        self.boxes.remove(position);

        let mut removed = Vec::new();
        self.lines.retain(|line| {
            if line.touches(id) {
                removed.push(line.id);
                false
            } else {
                true
            }
        });
        debug!(%id, removed_lines = removed.len(), "Deleted box");
        Ok(removed)
    }

    // --- lines -------------------------------------------------------------

    /// Add a line between existing endpoints
    pub fn add_line(&mut self, start: Attachment, end: Endpoint) -> Result<LineId> {
        if self.get_box(start.box_id).is_none() {
            return Err(DiagramError::unknown_box(start.box_id));
        }
        if let Some(end_box) = end.box_id() {
            if self.get_box(end_box).is_none() {
                return Err(DiagramError::unknown_box(end_box));
            }
        }
        let id = LineId(self.next_line);
        self.next_line += 1;
        self.lines.push(LineData {
            id,
            start,
            end,
            labels: Vec::new(),
        });
        debug!(%id, from = %start.box_id, "Added line");
        Ok(id)
    }

    /// Connect the box under `from` to whatever lies under `to`
    ///
    /// The start is anchored to the nearest edge of the box under `from`. The
    /// end is anchored to the box under `to` if there is one, otherwise it
    /// stays a free point.
    pub fn connect(&mut self, from: GridPoint, to: GridPoint) -> Result<LineId> {
        let start_box = self.box_at(from).ok_or(DiagramError::LineMustStartOnBox)?;
        let start = self.attachment_for(start_box, from)?;
        let end = self.endpoint_at(to);
        self.add_line(start, end)
    }

    /// Anchor for `point` projected onto the nearest edge of `box_id`
    pub fn attachment_for(&self, box_id: BoxId, point: GridPoint) -> Result<Attachment> {
        let data = self
            .get_box(box_id)
            .ok_or(DiagramError::unknown_box(box_id))?;
        Ok(Attachment::new(
            box_id,
            closest_point_on_box(point, &data.bounds),
        ))
    }

    /// Endpoint a line dropped at `point` would get
    pub fn endpoint_at(&self, point: GridPoint) -> Endpoint {
        match self.box_at(point).and_then(|id| self.attachment_for(id, point).ok()) {
            Some(attachment) => Endpoint::Attached(attachment),
            None => Endpoint::Free(point),
        }
    }

    /// Delete a line and its labels
    pub fn delete_line(&mut self, id: LineId) -> Result<LineData> {
        let position = self
            .lines
            .iter()
            .position(|l| l.id == id)
            .ok_or(DiagramError::unknown_line(id))?;
        debug!(%id, "Deleted line");
        Ok(self.lines.remove(position))
    }

    // --- labels ------------------------------------------------------------

    /// Labels attached to `owner`, if the owner exists
    pub fn labels_of(&self, owner: LabelOwner) -> Option<&[Label]> {
        match owner {
            LabelOwner::Box(id) => self.get_box(id).map(|b| b.labels.as_slice()),
            LabelOwner::Line(id) => self.get_line(id).map(|l| l.labels.as_slice()),
        }
    }

    fn labels_mut(&mut self, owner: LabelOwner) -> Result<&mut Vec<Label>> {
        match owner {
            LabelOwner::Box(id) => Ok(&mut self.box_mut(id)?.labels),
            LabelOwner::Line(id) => Ok(&mut self.line_mut(id)?.labels),
        }
    }

    /// Append a finished label to its owner
    pub fn add_label(&mut self, owner: LabelOwner, label: Label) -> Result<LabelRef> {
        let labels = self.labels_mut(owner)?;
        labels.push(label);
        let label_ref = LabelRef::new(owner, labels.len() - 1);
        debug!(label = %label_ref, "Added label");
        Ok(label_ref)
    }

    pub fn label(&self, label_ref: LabelRef) -> Option<&Label> {
        self.labels_of(label_ref.owner)?.get(label_ref.index)
    }

    /// Move a label to a new offset relative to its owner
    pub fn move_label(&mut self, label_ref: LabelRef, offset: GridPoint) -> Result<()> {
        let label = self
            .labels_mut(label_ref.owner)?
            .get_mut(label_ref.index)
            .ok_or(DiagramError::unknown_label(label_ref))?;
        label.offset = offset;
        trace!(label = %label_ref, %offset, "Moved label");
        Ok(())
    }

    /// Remove a label; later labels of the same owner shift down one index
    pub fn delete_label(&mut self, label_ref: LabelRef) -> Result<Label> {
        let labels = self.labels_mut(label_ref.owner)?;
        if label_ref.index >= labels.len() {
            return Err(DiagramError::unknown_label(label_ref));
        }
        debug!(label = %label_ref, "Deleted label");
        Ok(labels.remove(label_ref.index))
    }

    // --- resolution ----------------------------------------------------------

    /// Absolute position of a box anchor
    pub fn resolve_attachment(&self, attachment: &Attachment) -> Option<GridPoint> {
        self.get_box(attachment.box_id)
            .map(|b| attachment.anchor.resolve(&b.bounds))
    }

    /// Absolute position of a line end
    pub fn resolve_endpoint(&self, endpoint: &Endpoint) -> Option<GridPoint> {
        match endpoint {
            Endpoint::Attached(attachment) => self.resolve_attachment(attachment),
            Endpoint::Free(point) => Some(*point),
        }
    }

    /// Resolved route for a line, or `None` if one of its boxes is gone
    pub fn route(&self, line: &LineData) -> Option<LineRoute> {
        let start = self.resolve_attachment(&line.start)?;
        let end = self.resolve_endpoint(&line.end)?;
        Some(LineRoute::new(start, line.start.anchor.side, end))
    }

    /// Cells occupied by a line
    pub fn line_cells(&self, id: LineId) -> Result<Vec<PathCell>> {
        let line = self.get_line(id).ok_or(DiagramError::unknown_line(id))?;
        Ok(self.route(line).map(|r| r.cells()).unwrap_or_default())
    }

    /// Point that label offsets of `owner` are measured from
    pub fn label_origin(&self, owner: LabelOwner) -> Option<GridPoint> {
        match owner {
            LabelOwner::Box(id) => self.get_box(id).map(|b| b.bounds.origin()),
            LabelOwner::Line(id) => self
                .get_line(id)
                .and_then(|l| self.resolve_attachment(&l.start)),
        }
    }

    /// Absolute position of a label's first character
    pub fn label_position(&self, label_ref: LabelRef) -> Option<GridPoint> {
        let origin = self.label_origin(label_ref.owner)?;
        let label = self.label(label_ref)?;
        Some(origin.offset(label.offset.col, label.offset.row))
    }

    // --- hit testing -----------------------------------------------------------

    /// Topmost box whose bounds (border included) contain `point`
    pub fn box_at(&self, point: GridPoint) -> Option<BoxId> {
        self.boxes
            .iter()
            .rev()
            .find(|b| b.bounds.contains(point))
            .map(|b| b.id)
    }

    /// Topmost line with a path cell at `point`
    pub fn line_at(&self, point: GridPoint) -> Option<LineId> {
        self.lines
            .iter()
            .rev()
            .find(|line| {
                self.route(line)
                    .is_some_and(|r| r.cells().iter().any(|c| c.pos == point))
            })
            .map(|line| line.id)
    }

    /// Topmost label with a character at `point`
    ///
    /// Line labels are drawn after box labels, so they are checked first.
    pub fn label_at(&self, point: GridPoint) -> Option<LabelRef> {
        let line_owners = self.lines.iter().rev().map(|l| LabelOwner::Line(l.id));
        let box_owners = self.boxes.iter().rev().map(|b| LabelOwner::Box(b.id));

        for owner in line_owners.chain(box_owners) {
            let (Some(origin), Some(labels)) = (self.label_origin(owner), self.labels_of(owner))
            else {
                continue;
            };
            let hit = labels
                .iter()
                .enumerate()
                .rev()
                .find(|(_, label)| label.glyphs(origin).any(|(p, _)| p == point));
            if let Some((index, _)) = hit {
                return Some(LabelRef::new(owner, index));
            }
        }
        None
    }
}
