//! Live frame renderer
//!
//! Draws the diagram, plus any in-progress gesture, onto a [`GridDisplay`]
//! once per frame.

use tracing::trace;

use super::{
    CharacterSet, Color, Diagram, GlyphSink, GridDisplay, GridPoint, Label, Layer, LineRoute,
    Painter, Rect,
};

/// Colors used for each drawing layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub box_border: Color,
    pub line: Color,
    pub label: Color,
    pub draft: Color,
    pub background: Option<Color>,
}

impl Theme {
    pub fn color_for(&self, layer: Layer) -> Color {
        match layer {
            Layer::BoxBorder => self.box_border,
            Layer::Line => self.line,
            Layer::Label => self.label,
            Layer::Draft => self.draft,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            box_border: Color::Cyan,
            line: Color::Yellow,
            label: Color::Reset,
            draft: Color::Magenta,
            background: None,
        }
    }
}

/// Preview of a gesture that has not been committed to the diagram yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Draft {
    Box(Rect),
    Line(LineRoute),
    Label { origin: GridPoint, label: Label },
}

struct DisplaySink<'a, D: GridDisplay + ?Sized> {
    display: &'a mut D,
    theme: &'a Theme,
}

impl<D: GridDisplay + ?Sized> GlyphSink for DisplaySink<'_, D> {
    fn put(&mut self, pos: GridPoint, glyph: char, layer: Layer) {
        self.display.draw(
            pos.col,
            pos.row,
            glyph,
            self.theme.color_for(layer),
            self.theme.background,
        );
    }
}

/// Renders diagrams onto a display
#[derive(Debug, Clone, Copy)]
pub struct FrameRenderer {
    painter: Painter,
    theme: Theme,
}

impl FrameRenderer {
    /// Create a renderer with the default theme
    pub fn new(style: CharacterSet) -> Self {
        Self::with_theme(style, Theme::default())
    }

    pub fn with_theme(style: CharacterSet, theme: Theme) -> Self {
        Self {
            painter: Painter::for_screen(style),
            theme,
        }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Clear the display and draw one full frame
    pub fn render<D: GridDisplay + ?Sized>(
        &self,
        diagram: &Diagram,
        draft: Option<&Draft>,
        display: &mut D,
    ) {
        display.clear();
        let mut sink = DisplaySink {
            display,
            theme: &self.theme,
        };
        self.painter.paint_diagram(diagram, &mut sink);

        if let Some(draft) = draft {
            trace!(?draft, "Drawing draft");
            match draft {
                Draft::Box(bounds) => self.painter.paint_box(bounds, Layer::Draft, &mut sink),
                Draft::Line(route) => self.painter.paint_route(route, Layer::Draft, &mut sink),
                Draft::Label { origin, label } => self.painter.paint_labels(
                    *origin,
                    std::slice::from_ref(label),
                    Layer::Draft,
                    &mut sink,
                ),
            }
        }
    }
}
