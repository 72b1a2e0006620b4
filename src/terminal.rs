use crate::app::{App, FolderPicker, MessageSink, OpenOutcome};
use crate::render;
use crate::scanner::{ScanError, ScanErrorKind};
use crate::types::{Column, UnknownColumn};
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Prints scan errors to stderr.
pub struct TerminalMessages;

impl MessageSink for TerminalMessages {
    fn error(&mut self, err: &ScanError) {
        let title = match err.kind() {
            ScanErrorKind::NotADirectory => "Folder not found:",
            ScanErrorKind::Empty => "Empty folder:",
            ScanErrorKind::Unreadable => "Unreadable folder:",
        };
        eprintln!("{} {}", title.red().bold(), err.user_message());
        eprintln!("  {}", err.to_string().dimmed());
    }
}

/// Asks for a folder on the session's input. An empty line or end of
/// input cancels.
pub struct LinePicker<'a, R: BufRead, W: Write> {
    input: &'a mut R,
    out: &'a mut W,
}

impl<'a, R: BufRead, W: Write> LinePicker<'a, R, W> {
    pub fn new(input: &'a mut R, out: &'a mut W) -> Self {
        LinePicker { input, out }
    }
}

impl<R: BufRead, W: Write> FolderPicker for LinePicker<'_, R, W> {
    fn pick(&mut self) -> Option<PathBuf> {
        write!(self.out, "Folder to search (empty to cancel): ").ok()?;
        self.out.flush().ok()?;

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => {
                let trimmed = line.trim();
                (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Open(Option<PathBuf>),
    Sort(Column),
    Show,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((w, r)) => (w, r.trim()),
        None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "open" | "o" => Ok(Command::Open(
            (!rest.is_empty()).then(|| PathBuf::from(rest)),
        )),
        "sort" | "s" => rest
            .parse()
            .map(Command::Sort)
            .map_err(|e: UnknownColumn| e.to_string()),
        "1" | "2" | "3" if rest.is_empty() => word
            .parse()
            .map(Command::Sort)
            .map_err(|e: UnknownColumn| e.to_string()),
        "show" | "ls" | "" => Ok(Command::Show),
        "help" | "h" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        _ => Err(format!("unknown command '{word}' (type 'help')")),
    }
}

const HELP: &str = "\
Commands:
  open [PATH]   scan PATH (prompts when omitted)
  sort COLUMN   sort by date, type or ver; repeat to reverse
  1 | 2 | 3     same as sort date | type | ver
  show          print the table again
  quit          leave";

pub fn print_view<W: Write>(app: &App, out: &mut W, styled: bool) -> io::Result<()> {
    match app.root() {
        Some(root) => {
            let title = format!("=== {} ({} folders) ===", root.display(), app.table().len());
            if styled {
                writeln!(out, "{}", title.cyan())?;
            } else {
                writeln!(out, "{title}")?;
            }
            if app.table().is_empty() {
                writeln!(out, "No folders with a date_type_version name.")?;
            } else {
                writeln!(out, "{}", render::render_table(app.table(), app.config(), styled))?;
            }

            let skipped = app.skipped();
            if !skipped.is_empty() {
                let note = format!(
                    "Skipped {} folder(s) not named date_type_version: {}",
                    skipped.len(),
                    skipped.join(", ")
                );
                if styled {
                    writeln!(out, "{}", note.yellow())?;
                } else {
                    writeln!(out, "{note}")?;
                }
            }
            Ok(())
        }
        None => writeln!(out, "No folder opened yet. Use 'open'."),
    }
}

fn show_outcome<W: Write>(
    app: &App,
    outcome: &OpenOutcome,
    out: &mut W,
    styled: bool,
) -> io::Result<()> {
    if let OpenOutcome::Loaded { rows, skipped } = outcome {
        log::info!("Loaded {rows} rows ({skipped} skipped)");
        print_view(app, out, styled)?;
    }
    Ok(())
}

/// Read commands until `quit` or end of input.
pub fn run_session<R: BufRead, W: Write>(
    app: &mut App,
    input: &mut R,
    out: &mut W,
    messages: &mut dyn MessageSink,
    styled: bool,
) -> io::Result<()> {
    writeln!(out, "{HELP}")?;

    loop {
        write!(out, "> ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        match parse_command(&line) {
            Ok(Command::Open(Some(path))) => {
                let outcome = app.load(path, messages);
                show_outcome(app, &outcome, out, styled)?;
            }
            Ok(Command::Open(None)) => {
                let outcome = {
                    let mut picker = LinePicker::new(input, out);
                    app.open_folder(&mut picker, messages)
                };
                show_outcome(app, &outcome, out, styled)?;
            }
            Ok(Command::Sort(column)) => {
                app.click_header(column);
                print_view(app, out, styled)?;
            }
            Ok(Command::Show) => print_view(app, out, styled)?,
            Ok(Command::Help) => writeln!(out, "{HELP}")?,
            Ok(Command::Quit) => break,
            Err(e) => writeln!(out, "{e}")?,
        }
    }

    Ok(())
}
