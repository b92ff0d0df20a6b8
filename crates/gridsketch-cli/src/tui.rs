//! Full-screen terminal editor
//!
//! Draws the diagram with crossterm and feeds mouse and key events into an
//! [`Editor`]. The bottom row of the terminal is reserved for the mode hint.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::style::{self, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{cursor, execute, queue};
use tracing::{debug, warn};

use gridsketch::editor::{Editor, ModeEvent};
use gridsketch::{
    AsciiExporter, CharacterSet, Color, Diagram, Export, ExportConfig, FrameRenderer,
    GridDisplay, GridPoint, PointerEvent, PointerKind, TextDisplay,
};

/// What the user asked for with one key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Mode(ModeEvent),
    Type(char),
    Newline,
    Backspace,
    FinishLabel,
    Quit,
    Ignore,
}

/// Map a key press to an editor action
///
/// While a label is being typed every printable key is text; Esc finishes
/// the label instead of leaving the mode.
pub fn key_action(key: &KeyEvent, typing: bool) -> KeyAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyAction::Quit;
    }

    if typing {
        return match key.code {
            KeyCode::Esc => KeyAction::FinishLabel,
            KeyCode::Enter => KeyAction::Newline,
            KeyCode::Backspace => KeyAction::Backspace,
            KeyCode::Char(c) => KeyAction::Type(c),
            _ => KeyAction::Ignore,
        };
    }

    match key.code {
        KeyCode::Char('b') => KeyAction::Mode(ModeEvent::DrawBox),
        KeyCode::Char('l') => KeyAction::Mode(ModeEvent::ToggleLineDraw),
        KeyCode::Char('t') => KeyAction::Mode(ModeEvent::ToggleLabel),
        KeyCode::Char('m') => KeyAction::Mode(ModeEvent::ToggleMove),
        KeyCode::Char('M') => KeyAction::Mode(ModeEvent::ToggleMoveText),
        KeyCode::Char('r') => KeyAction::Mode(ModeEvent::ToggleResizeBox),
        KeyCode::Char('d') => KeyAction::Mode(ModeEvent::Delete),
        KeyCode::Char('e') => KeyAction::Mode(ModeEvent::Export),
        KeyCode::Esc => KeyAction::Mode(ModeEvent::Cancel),
        KeyCode::Char('q') => KeyAction::Quit,
        _ => KeyAction::Ignore,
    }
}

/// Pointer phase for a mouse event; only the left button draws
pub fn pointer_kind(kind: MouseEventKind) -> Option<PointerKind> {
    match kind {
        MouseEventKind::Down(MouseButton::Left) => Some(PointerKind::Down),
        MouseEventKind::Drag(MouseButton::Left) => Some(PointerKind::Drag),
        MouseEventKind::Up(MouseButton::Left) => Some(PointerKind::Up),
        _ => None,
    }
}

fn terminal_color(color: Color) -> style::Color {
    match color {
        Color::Reset => style::Color::Reset,
        Color::Black => style::Color::Black,
        Color::White => style::Color::White,
        Color::Grey => style::Color::Grey,
        Color::Red => style::Color::Red,
        Color::Green => style::Color::Green,
        Color::Yellow => style::Color::Yellow,
        Color::Blue => style::Color::Blue,
        Color::Magenta => style::Color::Magenta,
        Color::Cyan => style::Color::Cyan,
    }
}

/// Terminal-sized frame buffer with a status row underneath
pub struct TerminalDisplay {
    frame: TextDisplay,
    columns: u16,
    rows: u16,
}

impl TerminalDisplay {
    /// `rows` is the full terminal height; the last row holds the status line
    pub fn new(columns: u16, rows: u16) -> Self {
        let rows = rows.saturating_sub(1);
        Self {
            frame: TextDisplay::new(usize::from(columns), usize::from(rows)),
            columns,
            rows,
        }
    }

    /// Write the frame and the status line
    pub fn present(&self, out: &mut impl Write, status: &str) -> io::Result<()> {
        queue!(out, Clear(ClearType::All))?;
        for row in 0..self.rows {
            queue!(out, cursor::MoveTo(0, row))?;
            for col in 0..self.columns {
                let Some(cell) = self.frame.cell(i32::from(col), i32::from(row)) else {
                    continue;
                };
                queue!(out, SetForegroundColor(terminal_color(cell.fg)))?;
                if let Some(bg) = cell.bg {
                    queue!(out, SetBackgroundColor(terminal_color(bg)))?;
                }
                queue!(out, Print(cell.glyph), ResetColor)?;
            }
        }

        let status: String = status.chars().take(usize::from(self.columns)).collect();
        queue!(
            out,
            cursor::MoveTo(0, self.rows),
            SetForegroundColor(style::Color::Grey),
            Print(status),
            ResetColor
        )?;
        out.flush()
    }
}

impl GridDisplay for TerminalDisplay {
    fn draw(&mut self, col: i32, row: i32, glyph: char, fg: Color, bg: Option<Color>) {
        self.frame.draw(col, row, glyph, fg, bg);
    }

    fn clear(&mut self) {
        self.frame.clear();
    }

    fn event_to_position(&self, event: &PointerEvent) -> Option<GridPoint> {
        self.frame.event_to_position(event)
    }
}

/// Raw mode, alternate screen and mouse capture for the lifetime of the value
struct TerminalSession {
    stdout: io::Stdout,
}

impl TerminalSession {
    fn new() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture, cursor::Hide).map_err(
            |err| {
                teardown_terminal();
                anyhow!("Failed to set up terminal: {}", err)
            },
        )?;
        Ok(Self { stdout })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = execute!(self.stdout, cursor::Show, DisableMouseCapture);
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, LeaveAlternateScreen);
}

/// What is left once the editor closes
pub struct SessionOutcome {
    pub diagram: Diagram,
    pub last_export: Option<Export>,
}

fn status_line(editor: &Editor, message: Option<&str>) -> String {
    let mode = editor.mode();
    let mut status = format!(
        " [{}] {} | b box  l line  t text  m move  M move text  r resize  d delete  e export  q quit",
        mode,
        mode.hint()
    );
    if let Some(message) = message {
        status = format!("{} | {}", status, message);
    }
    status
}

/// Run the editor until the user quits
///
/// With `output` set, every export is written to that file straight away;
/// otherwise the most recent export is returned for printing.
pub fn run(style: CharacterSet, output: Option<PathBuf>) -> Result<SessionOutcome> {
    let exporter = AsciiExporter::with_config(ExportConfig::default().with_style(style))?;
    let mut editor = Editor::with_exporter(exporter);
    let renderer = FrameRenderer::new(style);
    let mut last_export = None;
    let mut message: Option<String> = None;

    let mut session = TerminalSession::new()?;
    let (columns, rows) = crossterm::terminal::size()?;
    let mut display = TerminalDisplay::new(columns, rows);

    loop {
        let draft = editor.draft();
        renderer.render(editor.diagram(), draft.as_ref(), &mut display);
        display.present(&mut session.stdout, &status_line(&editor, message.as_deref()))?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                message = None;
                match key_action(&key, editor.is_typing()) {
                    KeyAction::Quit => break,
                    KeyAction::Ignore => {}
                    KeyAction::Type(c) => editor.type_char(c),
                    KeyAction::Newline => editor.newline(),
                    KeyAction::Backspace => editor.backspace(),
                    KeyAction::FinishLabel => {
                        editor.commit_label()?;
                    }
                    KeyAction::Mode(mode_event) => {
                        if let Some(export) = editor.apply(mode_event)? {
                            message = Some(save_export(&export, output.as_ref()));
                            last_export = Some(export);
                        }
                    }
                }
            }
            Event::Mouse(MouseEvent {
                kind, column, row, ..
            }) => {
                if let Some(kind) = pointer_kind(kind) {
                    let pointer = PointerEvent::new(column, row, kind);
                    if let Err(err) = editor.handle_pointer(&display, &pointer) {
                        warn!(error = %err, "Pointer event rejected");
                        message = Some(err.to_string());
                    }
                }
            }
            Event::Resize(columns, rows) => {
                debug!(columns, rows, "Terminal resized");
                display = TerminalDisplay::new(columns, rows);
            }
            _ => {}
        }
    }

    editor.commit_label()?;
    drop(session);
    Ok(SessionOutcome {
        diagram: editor.into_diagram(),
        last_export,
    })
}

fn save_export(export: &Export, output: Option<&PathBuf>) -> String {
    let Some(path) = output else {
        return "exported; printed on exit".to_string();
    };
    let written = std::fs::File::create(path)
        .map_err(gridsketch::DiagramError::from)
        .and_then(|file| export.write_to(file));
    match written {
        Ok(()) => format!("exported to {}", path.display()),
        Err(err) => {
            warn!(error = %err, path = %path.display(), "Export failed");
            format!("export failed: {}", err)
        }
    }
}
