//! Model walk shared by the exporter and the live frame renderer
//!
//! The painter turns boxes, lines and labels into positioned glyphs and hands
//! them to a [`GlyphSink`]. Sinks decide where the glyphs land: a text canvas
//! for export, a display for live rendering.

use tracing::warn;

use super::{
    path_glyphs, BoxChars, CharacterSet, Diagram, EdgeChars, GridPoint, Label, LineRoute, Rect,
};

/// What a painted glyph belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    BoxBorder,
    Line,
    Label,
    /// In-progress gesture preview
    Draft,
}

/// Receiver for painted glyphs
pub trait GlyphSink {
    fn put(&mut self, pos: GridPoint, glyph: char, layer: Layer);
}

impl GlyphSink for super::AsciiCanvas {
    fn put(&mut self, pos: GridPoint, glyph: char, _layer: Layer) {
        self.set_char(pos, glyph);
    }
}

/// Paints diagram items with a fixed set of box and line characters
#[derive(Debug, Clone, Copy)]
pub struct Painter {
    pub box_chars: BoxChars,
    pub edge_chars: EdgeChars,
}

impl Painter {
    /// Painter for text export (hyphens on horizontal box edges)
    pub fn for_export(style: CharacterSet) -> Self {
        Self {
            box_chars: BoxChars::export(style),
            edge_chars: EdgeChars::for_style(style),
        }
    }

    /// Painter for the live screen renderer
    pub fn for_screen(style: CharacterSet) -> Self {
        Self {
            box_chars: BoxChars::screen(style),
            edge_chars: EdgeChars::for_style(style),
        }
    }

    /// Paint every box (with its labels), then every line (with its labels)
    pub fn paint_diagram(&self, diagram: &Diagram, sink: &mut impl GlyphSink) {
        for data in diagram.boxes() {
            self.paint_box(&data.bounds, Layer::BoxBorder, sink);
            self.paint_labels(data.bounds.origin(), &data.labels, Layer::Label, sink);
        }

        for line in diagram.lines() {
            let Some(route) = diagram.route(line) else {
                warn!(id = %line.id, "Skipping line attached to a missing box");
                continue;
            };
            self.paint_route(&route, Layer::Line, sink);
            self.paint_labels(route.start, &line.labels, Layer::Label, sink);
        }
    }

    /// Paint a box border: corners, horizontal edges, vertical edges
    pub fn paint_box(&self, bounds: &Rect, layer: Layer, sink: &mut impl GlyphSink) {
        let chars = &self.box_chars;
        let Rect {
            min_col,
            min_row,
            max_col,
            max_row,
        } = *bounds;

        sink.put(GridPoint::new(min_col, min_row), chars.top_left, layer);
        sink.put(GridPoint::new(max_col, max_row), chars.bottom_right, layer);
        sink.put(GridPoint::new(max_col, min_row), chars.top_right, layer);
        sink.put(GridPoint::new(min_col, max_row), chars.bottom_left, layer);

        for col in min_col + 1..max_col {
            sink.put(GridPoint::new(col, min_row), chars.horizontal, layer);
            sink.put(GridPoint::new(col, max_row), chars.horizontal, layer);
        }
        for row in min_row + 1..max_row {
            sink.put(GridPoint::new(min_col, row), chars.vertical, layer);
            sink.put(GridPoint::new(max_col, row), chars.vertical, layer);
        }
    }

    /// Paint a routed line cell by cell
    pub fn paint_route(&self, route: &LineRoute, layer: Layer, sink: &mut impl GlyphSink) {
        for (pos, glyph) in path_glyphs(&route.cells(), &self.edge_chars) {
            sink.put(pos, glyph, layer);
        }
    }

    /// Paint labels measured from `origin`
    pub fn paint_labels(
        &self,
        origin: GridPoint,
        labels: &[Label],
        layer: Layer,
        sink: &mut impl GlyphSink,
    ) {
        for label in labels {
            for (pos, c) in label.glyphs(origin) {
                sink.put(pos, c, layer);
            }
        }
    }
}
