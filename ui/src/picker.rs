//! Line-oriented quick panel for `schemr pick`.
//!
//! The panel lists every entry, then reads one command per line:
//! `n`/`p` move the highlight, a number jumps to that entry, an empty line
//! or `y` selects the highlighted entry, `q` or end of input cancels.
//! With live preview on, every move also prints the scheme now applied.

use crate::error::AppResult;
use engine::preview::{PreviewOutcome, PreviewSession};
use std::io::{BufRead, Write};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelCommand {
    Next,
    Prev,
    /// Zero-based index.
    Jump(usize),
    Confirm,
    Cancel,
    Unknown(String),
}

impl PanelCommand {
    /// Parses one input line; entry numbers are 1-based.
    pub fn parse(line: &str) -> PanelCommand {
        let line = line.trim();
        match line.to_lowercase().as_str() {
            "" | "y" | "yes" => PanelCommand::Confirm,
            "n" | "next" | "j" => PanelCommand::Next,
            "p" | "prev" | "k" => PanelCommand::Prev,
            "q" | "quit" | "esc" => PanelCommand::Cancel,
            other => match other.parse::<usize>() {
                Ok(number) if number > 0 => PanelCommand::Jump(number - 1),
                _ => PanelCommand::Unknown(line.to_string()),
            },
        }
    }
}

pub struct QuickPanel<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> QuickPanel<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs the panel until the session is committed or cancelled.
    pub fn run(&mut self, session: &mut PreviewSession<'_>) -> AppResult<PreviewOutcome> {
        let len = session.items().len();
        let mut highlighted = session.initial_index();

        self.render(session, highlighted)?;
        session.on_highlight(highlighted)?;

        let mut line = String::new();
        loop {
            write!(
                self.output,
                "[{}/{len}] n: next, p: prev, <number>: jump, enter: select, q: cancel > ",
                highlighted + 1
            )?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                return Ok(session.on_confirm(None)?);
            }

            match PanelCommand::parse(&line) {
                PanelCommand::Confirm => return Ok(session.on_confirm(Some(highlighted))?),
                PanelCommand::Cancel => return Ok(session.on_confirm(None)?),
                PanelCommand::Next => highlighted = (highlighted + 1) % len,
                PanelCommand::Prev => highlighted = (highlighted + len - 1) % len,
                PanelCommand::Jump(index) if index < len => highlighted = index,
                PanelCommand::Jump(index) => {
                    writeln!(self.output, "No entry {}; choose 1-{len}", index + 1)?;
                    continue;
                }
                PanelCommand::Unknown(input) => {
                    writeln!(self.output, "Unknown command: {input}")?;
                    continue;
                }
            }

            session.on_highlight(highlighted)?;
            writeln!(self.output, "> {}", session.items()[highlighted].label)?;
            self.render_preview(session)?;
        }
    }

    /// Reports the scheme applied as a live preview; silent when preview is
    /// disabled.
    fn render_preview(&mut self, session: &PreviewSession<'_>) -> AppResult<()> {
        let Some(entry) = session.previewing() else {
            return Ok(());
        };
        match entry.metadata.background {
            Some(background) => writeln!(self.output, "Previewing: {} ({background})", entry.id())?,
            None => writeln!(self.output, "Previewing: {}", entry.id())?,
        }
        Ok(())
    }

    fn render(&mut self, session: &PreviewSession<'_>, highlighted: usize) -> AppResult<()> {
        let width = session.items().len().to_string().len();
        for (index, item) in session.items().iter().enumerate() {
            let marker = if index == highlighted { '>' } else { ' ' };
            writeln!(self.output, "{marker} {:>width$}. {}", index + 1, item.label)?;
        }
        Ok(())
    }
}
