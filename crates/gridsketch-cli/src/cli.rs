//! Command-line interface for the gridsketch utility
//!
//! Provides the terminal editor and a non-interactive demo export.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;

use gridsketch::core::logging::init_logging;
use gridsketch::{
    AsciiExporter, CharacterSet, Diagram, ExportConfig, GridPoint, Label, LabelOwner, Rect, Side,
    DEFAULT_COLUMNS, DEFAULT_ROWS,
};

use crate::tui;

/// Gridsketch - Draw box-and-line diagrams and export them as text
#[derive(Parser)]
#[command(name = "gridsketch")]
#[command(about = "A terminal editor for box-and-line diagrams with box-drawing text export")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive terminal editor
    Edit {
        /// File that exports are written to (default: print after exit)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Character set used for drawing and export
        #[arg(long, value_enum, default_value_t = StyleChoice::Unicode)]
        style: StyleChoice,
    },

    /// Export a built-in sample diagram
    Demo {
        /// Character set to use for the export
        #[arg(long, value_enum, default_value_t = StyleChoice::Unicode)]
        style: StyleChoice,

        /// Width of the virtual export canvas
        #[arg(long, default_value_t = DEFAULT_COLUMNS)]
        columns: usize,

        /// Height of the virtual export canvas
        #[arg(long, default_value_t = DEFAULT_ROWS)]
        rows: usize,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Output file (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Supported output character sets
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum StyleChoice {
    Ascii,
    Unicode,
}

impl From<StyleChoice> for CharacterSet {
    fn from(value: StyleChoice) -> Self {
        match value {
            StyleChoice::Ascii => CharacterSet::Ascii,
            StyleChoice::Unicode => CharacterSet::Unicode,
        }
    }
}

/// Demo output formats
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// The exported diagram text
    #[default]
    Text,
    /// Export text plus the diagram's geometry
    Json,
}

#[derive(Debug, Serialize)]
struct BoxSummary {
    id: usize,
    bounds: Rect,
    labels: Vec<String>,
}

#[derive(Debug, Serialize)]
struct LineSummary {
    id: usize,
    from_box: usize,
    to_box: Option<usize>,
    side: Side,
    start: GridPoint,
    end: GridPoint,
    labels: Vec<String>,
}

#[derive(Debug, Serialize)]
struct DemoReport {
    text: String,
    bounds: Option<Rect>,
    boxes: Vec<BoxSummary>,
    lines: Vec<LineSummary>,
}

impl DemoReport {
    fn new(diagram: &Diagram, text: String, bounds: Option<Rect>) -> Self {
        let label_texts =
            |labels: &[Label]| -> Vec<String> { labels.iter().map(|l| l.text.clone()).collect() };

        let boxes = diagram
            .boxes()
            .map(|b| BoxSummary {
                id: b.id.0,
                bounds: b.bounds,
                labels: label_texts(b.labels.as_slice()),
            })
            .collect();

        let lines = diagram
            .lines()
            .filter_map(|line| {
                let route = diagram.route(line)?;
                Some(LineSummary {
                    id: line.id.0,
                    from_box: line.start.box_id.0,
                    to_box: line.end.box_id().map(|id| id.0),
                    side: route.start_side,
                    start: route.start,
                    end: route.end,
                    labels: label_texts(line.labels.as_slice()),
                })
            })
            .collect();

        Self {
            text,
            bounds,
            boxes,
            lines,
        }
    }
}

/// Build the sample diagram used by the `demo` command
pub fn sample_diagram() -> Result<Diagram> {
    let mut diagram = Diagram::new();
    let client = diagram.add_box(Rect::new(0, 0, 9, 2))?;
    let server = diagram.add_box(Rect::new(20, 0, 29, 2))?;
    let store = diagram.add_box(Rect::new(20, 7, 29, 9))?;

    diagram.add_label(LabelOwner::Box(client), Label::new(GridPoint::new(2, 1), "client"))?;
    diagram.add_label(LabelOwner::Box(server), Label::new(GridPoint::new(2, 1), "server"))?;
    diagram.add_label(LabelOwner::Box(store), Label::new(GridPoint::new(2, 1), "store"))?;

    let request = diagram.connect(GridPoint::new(9, 1), GridPoint::new(20, 1))?;
    diagram.add_label(LabelOwner::Line(request), Label::new(GridPoint::new(2, -1), "GET"))?;
    let query = diagram.connect(GridPoint::new(24, 2), GridPoint::new(24, 7))?;
    diagram.add_label(LabelOwner::Line(query), Label::new(GridPoint::new(2, 2), "read"))?;
    diagram.connect(GridPoint::new(4, 2), GridPoint::new(20, 8))?;

    Ok(diagram)
}

/// Main CLI application
#[derive(Default)]
pub struct GridsketchApp;

impl GridsketchApp {
    /// Create a new application instance
    pub fn new() -> Self {
        Self
    }

    /// Run the application with the given CLI arguments
    pub fn run(&mut self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over CLI flags
        let log_level_str = std::env::var("GRIDSKETCH_LOG_LEVEL")
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .or_else(|| Some(cli.log_level.as_str().to_string()));

        let log_format_str = std::env::var("GRIDSKETCH_LOG_FORMAT")
            .ok()
            .or_else(|| Some(cli.log_format.as_str().to_string()));

        if let Err(e) = init_logging(log_level_str.as_deref(), log_format_str.as_deref()) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("Gridsketch v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Edit { output, style } => self.edit_command(output, style, cli.verbose),
            Commands::Demo {
                style,
                columns,
                rows,
                format,
                output,
            } => {
                let config = ExportConfig::new(columns, rows, style.into());
                self.demo_command(config, format, output, cli.verbose)
            }
        }
    }

    /// Handle the edit command
    fn edit_command(&self, output: Option<PathBuf>, style: StyleChoice, verbose: bool) -> Result<()> {
        let session = tui::run(style.into(), output.clone())?;

        if verbose {
            eprintln!(
                "Session ended with {} boxes, {} lines",
                session.diagram.box_count(),
                session.diagram.line_count()
            );
        }

        // Exports without an output file are printed once the terminal is restored
        if output.is_none() {
            if let Some(export) = session.last_export {
                self.write_output(None, &export.text)?;
            }
        }
        Ok(())
    }

    /// Handle the demo command
    fn demo_command(
        &self,
        config: ExportConfig,
        format: OutputFormat,
        output: Option<PathBuf>,
        verbose: bool,
    ) -> Result<()> {
        let exporter = AsciiExporter::with_config(config)?;
        let diagram = sample_diagram()?;
        let export = exporter.export(&diagram);

        if verbose {
            eprintln!(
                "Exported {} boxes and {} lines",
                diagram.box_count(),
                diagram.line_count()
            );
        }
        info!(style = %config.style, ?format, "Demo export");

        let content = match format {
            OutputFormat::Text => export.text,
            OutputFormat::Json => {
                let report = DemoReport::new(&diagram, export.text, export.bounds);
                serde_json::to_string_pretty(&report)?
            }
        };
        self.write_output(output, &content)
    }

    /// Write output to file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        let content = if content.is_empty() || content.ends_with('\n') {
            content.to_string()
        } else {
            format!("{}\n", content)
        };

        match output {
            Some(path) if path.to_string_lossy() != "-" => {
                fs::write(&path, &content).map_err(|e| {
                    anyhow!("Failed to write output file '{}': {}", path.display(), e)
                })?;
            }
            _ => {
                let mut stdout = io::stdout().lock();
                stdout
                    .write_all(content.as_bytes())
                    .context("Failed to write to stdout")?;
                stdout.flush()?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing_demo_command() {
        let args = vec![
            "gridsketch",
            "demo",
            "--style",
            "ascii",
            "--columns",
            "80",
            "--format",
            "json",
            "--output",
            "out.json",
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Demo {
                style,
                columns,
                rows,
                format,
                output,
            } => {
                assert_eq!(style, StyleChoice::Ascii);
                assert_eq!(columns, 80);
                assert_eq!(rows, DEFAULT_ROWS); // default
                assert_eq!(format, OutputFormat::Json);
                assert_eq!(output.unwrap().to_string_lossy(), "out.json");
            }
            _ => panic!("Expected Demo command"),
        }
    }

    #[test]
    fn test_cli_parsing_edit_command() {
        let args = vec!["gridsketch", "edit", "-o", "sketch.txt"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Edit { output, style } => {
                assert_eq!(output.unwrap().to_string_lossy(), "sketch.txt");
                assert_eq!(style, StyleChoice::Unicode);
            }
            _ => panic!("Expected Edit command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = vec!["gridsketch", "demo", "--verbose", "--log-level", "debug"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.log_level, LogLevel::Debug);
        assert_eq!(cli.log_format, LogFormat::Compact);
    }

    #[test]
    fn test_unknown_style_rejected() {
        let args = vec!["gridsketch", "demo", "--style", "braille"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_sample_diagram_exports() {
        let diagram = sample_diagram().unwrap();
        assert_eq!(diagram.box_count(), 3);
        assert_eq!(diagram.line_count(), 3);

        let text = AsciiExporter::new().export(&diagram).text;
        assert!(text.contains("client"));
        assert!(text.contains("GET"));
        assert!(text.contains('▶'));
        assert!(text.contains('▼'));
    }

    #[test]
    fn test_demo_writes_text_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("demo.txt");

        let app = GridsketchApp::new();
        app.demo_command(
            ExportConfig::default().with_style(CharacterSet::Ascii),
            OutputFormat::Text,
            Some(file_path.clone()),
            false,
        )
        .unwrap();

        let written = fs::read_to_string(&file_path).unwrap();
        assert!(written.ends_with('\n'));
        assert!(written.starts_with("+--------+"));
        assert!(!written.contains('┌'));
    }

    #[test]
    fn test_demo_writes_json_report() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("demo.json");

        let app = GridsketchApp::new();
        app.demo_command(
            ExportConfig::default(),
            OutputFormat::Json,
            Some(file_path.clone()),
            false,
        )
        .unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&file_path).unwrap()).unwrap();
        assert_eq!(json["boxes"].as_array().unwrap().len(), 3);
        assert_eq!(json["lines"][0]["side"], "right");
        assert_eq!(json["lines"][0]["to_box"], 1);
        assert_eq!(json["bounds"]["min_col"], 0);
        assert!(json["text"].as_str().unwrap().contains("server"));
    }

    #[test]
    fn test_demo_rejects_empty_canvas() {
        let app = GridsketchApp::new();
        let result = app.demo_command(
            ExportConfig::default().with_size(0, 0),
            OutputFormat::Text,
            None,
            false,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_write_output_to_file() {
        let app = GridsketchApp::new();
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("output.txt");

        app.write_output(Some(file_path.clone()), "┌┐\n└┘").unwrap();
        assert_eq!(fs::read_to_string(&file_path).unwrap(), "┌┐\n└┘\n");
    }
}
