//! Text export
//!
//! Rasterizes a diagram onto a fixed-size [`AsciiCanvas`] and crops the result
//! to the diagram's bounding box.

use std::io::Write;

use serde::Serialize;
use tracing::{debug, info, span, Level};

use super::{AsciiCanvas, CharacterSet, Diagram, DiagramError, Painter, Rect, Result};

/// Default virtual canvas width in cells
pub const DEFAULT_COLUMNS: usize = 200;
/// Default virtual canvas height in cells
pub const DEFAULT_ROWS: usize = 100;

/// Configuration for text export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportConfig {
    pub columns: usize,
    pub rows: usize,
    pub style: CharacterSet,
}

impl ExportConfig {
    pub fn new(columns: usize, rows: usize, style: CharacterSet) -> Self {
        Self {
            columns,
            rows,
            style,
        }
    }

    pub fn with_size(mut self, columns: usize, rows: usize) -> Self {
        self.columns = columns;
        self.rows = rows;
        self
    }

    pub fn with_style(mut self, style: CharacterSet) -> Self {
        self.style = style;
        self
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self::new(DEFAULT_COLUMNS, DEFAULT_ROWS, CharacterSet::default())
    }
}

/// Result of an export: the cropped text and the area it was cropped to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Export {
    pub text: String,
    /// `None` when the diagram was empty
    pub bounds: Option<Rect>,
}

impl Export {
    /// Write the exported text followed by a trailing newline
    pub fn write_to(&self, mut writer: impl Write) -> Result<()> {
        writer.write_all(self.text.as_bytes())?;
        if !self.text.is_empty() {
            writer.write_all(b"\n")?;
        }
        writer.flush().map_err(DiagramError::from)
    }
}

/// Exports diagrams to box-drawing text
#[derive(Debug, Clone, Copy, Default)]
pub struct AsciiExporter {
    config: ExportConfig,
}

impl AsciiExporter {
    /// Create an exporter with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an exporter with a custom configuration
    ///
    /// Both canvas dimensions must be positive.
    pub fn with_config(config: ExportConfig) -> Result<Self> {
        if config.columns == 0 || config.rows == 0 {
            return Err(DiagramError::invalid_canvas(config.columns, config.rows));
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Rasterize the whole diagram onto a fresh canvas
    pub fn rasterize(&self, diagram: &Diagram) -> AsciiCanvas {
        let mut canvas = AsciiCanvas::new(self.config.columns, self.config.rows);
        Painter::for_export(self.config.style).paint_diagram(diagram, &mut canvas);
        canvas
    }

    /// Export the diagram, cropped to its bounding box
    pub fn export(&self, diagram: &Diagram) -> Export {
        let export_span = span!(
            Level::INFO,
            "export",
            boxes = diagram.box_count(),
            lines = diagram.line_count()
        );
        let _enter = export_span.enter();

        let Some(bounds) = diagram.bounding_box() else {
            debug!("Nothing to export");
            return Export {
                text: String::new(),
                bounds: None,
            };
        };

        let canvas = self.rasterize(diagram);
        let text = canvas.crop(&bounds);
        info!(?bounds, bytes = text.len(), "Export completed");
        Export {
            text,
            bounds: Some(bounds),
        }
    }
}

/// Export a diagram with the default configuration
///
/// Rows are joined by `\n` with no final newline; [`Export::write_to`] adds
/// one when writing.
///
/// # Example
/// ```rust
/// use gridsketch::{export_to_ascii, Diagram, GridPoint, Rect};
///
/// let mut diagram = Diagram::new();
/// diagram.add_box(Rect::new(0, 0, 4, 2)).unwrap();
/// diagram.add_box(Rect::new(10, 0, 14, 2)).unwrap();
/// diagram.connect(GridPoint::new(4, 1), GridPoint::new(10, 1)).unwrap();
///
/// assert_eq!(
///     export_to_ascii(&diagram),
///     "┌---┐     ┌---┐\n│   ├─────▶   │\n└---┘     └---┘"
/// );
/// ```
pub fn export_to_ascii(diagram: &Diagram) -> String {
    AsciiExporter::new().export(diagram).text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GridPoint, Label, LabelOwner};

    #[test]
    fn test_empty_diagram_exports_empty_string() {
        let export = AsciiExporter::new().export(&Diagram::new());
        assert_eq!(export.text, "");
        assert_eq!(export.bounds, None);
    }

    #[test]
    fn test_zero_sized_canvas_rejected() {
        let result = AsciiExporter::with_config(ExportConfig::default().with_size(0, 10));
        assert!(matches!(result, Err(DiagramError::InvalidCanvas { .. })));
    }

    #[test]
    fn test_single_box() {
        let mut diagram = Diagram::new();
        diagram.add_box(Rect::new(3, 2, 6, 4)).unwrap();
        assert_eq!(export_to_ascii(&diagram), "┌--┐\n│  │\n└--┘");
    }

    #[test]
    fn test_multiline_box_label() {
        let mut diagram = Diagram::new();
        let id = diagram.add_box(Rect::new(2, 3, 7, 6)).unwrap();
        diagram
            .add_label(LabelOwner::Box(id), Label::new(GridPoint::new(1, 1), "AB\nC"))
            .unwrap();

        let text = export_to_ascii(&diagram);
        let rows: Vec<&str> = text.lines().collect();
        assert_eq!(rows[1], "│AB  │");
        assert_eq!(rows[2], "│C   │");
    }

    #[test]
    fn test_ascii_style() {
        let mut diagram = Diagram::new();
        diagram.add_box(Rect::new(0, 0, 2, 2)).unwrap();
        diagram
            .connect(GridPoint::new(2, 1), GridPoint::new(5, 1))
            .unwrap();

        let exporter =
            AsciiExporter::with_config(ExportConfig::default().with_style(CharacterSet::Ascii))
                .unwrap();
        assert_eq!(exporter.export(&diagram).text, "+-+   \n| +-->\n+-+   ");
    }

    #[test]
    fn test_content_outside_canvas_is_clipped() {
        let mut diagram = Diagram::new();
        diagram.add_box(Rect::new(0, 0, 3, 2)).unwrap();
        diagram.add_box(Rect::new(8, 0, 11, 2)).unwrap();

        let exporter =
            AsciiExporter::with_config(ExportConfig::default().with_size(10, 3)).unwrap();
        let export = exporter.export(&diagram);
        assert_eq!(export.bounds, Some(Rect::new(0, 0, 11, 2)));
        assert_eq!(export.text, "┌--┐    ┌-\n│  │    │ \n└--┘    └-");
    }

    #[test]
    fn test_write_to_appends_newline() {
        let mut diagram = Diagram::new();
        diagram.add_box(Rect::new(0, 0, 1, 1)).unwrap();
        let export = AsciiExporter::new().export(&diagram);

        let mut out = Vec::new();
        export.write_to(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "┌┐\n└┘\n");
    }

    #[test]
    fn test_export_serializes_to_json() {
        let mut diagram = Diagram::new();
        diagram.add_box(Rect::new(0, 0, 1, 1)).unwrap();
        let export = AsciiExporter::new().export(&diagram);

        let value = serde_json::to_value(&export).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "text": "┌┐\n└┘",
                "bounds": {"min_col": 0, "min_row": 0, "max_col": 1, "max_row": 1},
            })
        );

        let empty = serde_json::to_value(AsciiExporter::new().export(&Diagram::new())).unwrap();
        assert_eq!(empty, serde_json::json!({"text": "", "bounds": null}));
    }
}
