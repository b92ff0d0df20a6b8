//! Bounding box of diagram content
//!
//! Used by the exporter to crop the text canvas down to what was drawn.

use super::{Diagram, Rect};

/// Minimal rectangle covering every box and every resolved line endpoint
///
/// Labels are not included. Returns `None` for a diagram with nothing to
/// cover.
pub fn bounding_box(diagram: &Diagram) -> Option<Rect> {
    let box_rects = diagram.boxes().map(|b| b.bounds);
    let endpoint_rects = diagram.lines().flat_map(|line| {
        let start = diagram.resolve_attachment(&line.start);
        let end = diagram.resolve_endpoint(&line.end);
        start.into_iter().chain(end).map(Rect::from_point)
    });

    box_rects.chain(endpoint_rects).reduce(|mut acc, rect| {
        acc.include_rect(&rect);
        acc
    })
}

impl Diagram {
    /// See [`bounding_box`]
    pub fn bounding_box(&self) -> Option<Rect> {
        bounding_box(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GridPoint;

    #[test]
    fn test_empty_diagram_has_no_bounds() {
        assert_eq!(bounding_box(&Diagram::new()), None);
    }

    #[test]
    fn test_single_box() {
        let mut diagram = Diagram::new();
        diagram.add_box(Rect::new(0, 0, 5, 5)).unwrap();
        assert_eq!(diagram.bounding_box(), Some(Rect::new(0, 0, 5, 5)));
    }

    #[test]
    fn test_free_endpoint_extends_bounds() {
        let mut diagram = Diagram::new();
        diagram.add_box(Rect::new(2, 2, 6, 5)).unwrap();
        diagram
            .connect(GridPoint::new(6, 3), GridPoint::new(20, 9))
            .unwrap();
        assert_eq!(diagram.bounding_box(), Some(Rect::new(2, 2, 20, 9)));
    }

    #[test]
    fn test_order_does_not_matter() {
        let mut forward = Diagram::new();
        forward.add_box(Rect::new(0, 0, 3, 3)).unwrap();
        forward.add_box(Rect::new(10, -4, 12, 1)).unwrap();

        let mut backward = Diagram::new();
        backward.add_box(Rect::new(10, -4, 12, 1)).unwrap();
        backward.add_box(Rect::new(0, 0, 3, 3)).unwrap();

        assert_eq!(forward.bounding_box(), backward.bounding_box());
        assert_eq!(forward.bounding_box(), Some(Rect::new(0, -4, 12, 3)));
    }
}
