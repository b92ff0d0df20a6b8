//! Gridsketch - box-and-line diagrams on a character grid
//!
//! A library for editing diagrams made of rectangles and orthogonal
//! connectors on an integer grid, and exporting them as box-drawing text.
//!
//! # Quick Start
//!
//! ```rust
//! use gridsketch::{export_to_ascii, Diagram, GridPoint, Rect};
//!
//! let mut diagram = Diagram::new();
//! diagram.add_box(Rect::new(0, 0, 4, 2)).unwrap();
//! diagram.add_box(Rect::new(10, 0, 14, 2)).unwrap();
//! diagram
//!     .connect(GridPoint::new(4, 1), GridPoint::new(10, 1))
//!     .unwrap();
//!
//! let text = export_to_ascii(&diagram);
//! assert_eq!(text.lines().nth(1), Some("│   ├─────▶   │"));
//! ```
//!
//! # Interactive Editing
//!
//! The [`editor::Editor`] turns pointer gestures into model mutations, and a
//! [`FrameRenderer`] draws the model plus the gesture in progress onto any
//! [`GridDisplay`]:
//!
//! ```rust
//! use gridsketch::prelude::*;
//!
//! let mut editor = Editor::new();
//! editor.apply(ModeEvent::DrawBox).unwrap();
//! editor.pointer(PointerKind::Down, GridPoint::new(0, 0)).unwrap();
//! editor.pointer(PointerKind::Up, GridPoint::new(3, 2)).unwrap();
//!
//! let mut display = TextDisplay::new(10, 4);
//! FrameRenderer::new(CharacterSet::Unicode).render(editor.diagram(), None, &mut display);
//! assert_eq!(display.to_string(), "┌──┐\n│  │\n└──┘");
//! ```

pub mod core;
pub mod editor;

pub use core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        AsciiExporter, CharacterSet, Color, Diagram, DiagramError, Draft, Export, ExportConfig,
        FrameRenderer, GridDisplay, GridPoint, Label, LabelOwner, PointerEvent, PointerKind,
        Rect, Side, TextDisplay,
    };
    pub use crate::editor::{Editor, Mode, ModeEvent};
}

/// Export a diagram with a specific character set and the default canvas size
///
/// # Example
/// ```rust
/// use gridsketch::{export_with_style, CharacterSet, Diagram, Rect};
///
/// let mut diagram = Diagram::new();
/// diagram.add_box(Rect::new(0, 0, 2, 2)).unwrap();
/// assert_eq!(export_with_style(&diagram, CharacterSet::Ascii), "+-+\n| |\n+-+");
/// ```
pub fn export_with_style(diagram: &Diagram, style: CharacterSet) -> String {
    AsciiExporter::with_config(ExportConfig::default().with_style(style))
        .map(|exporter| exporter.export(diagram).text)
        .unwrap_or_default()
}
