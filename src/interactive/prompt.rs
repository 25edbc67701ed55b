//! Choice prompts.
//!
//! [`TerminalPrompt`] draws an arrow-key selector with crossterm and needs a
//! real terminal. [`LinePrompt`] asks for a number on any reader, which is
//! what the binary falls back to when stdin is piped and what tests script.

use std::io::{self, BufRead, Write};

use crossterm::cursor::{Hide, MoveToColumn, MoveUp, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::style::Stylize;
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{execute, queue};

/// Asks the user to make decisions.
pub trait Prompt {
    /// Pick one of `choices`. `None` means the user backed out.
    fn select(&mut self, message: &str, choices: &[String]) -> io::Result<Option<usize>>;

    /// Ask a yes/no question, defaulting to no.
    fn confirm(&mut self, message: &str) -> io::Result<bool>;
}

/// Numbered prompt over arbitrary input and output.
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Read one trimmed line, `None` at end of input.
    fn read_answer(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

impl<R: BufRead, W: Write> Prompt for LinePrompt<R, W> {
    fn select(&mut self, message: &str, choices: &[String]) -> io::Result<Option<usize>> {
        if choices.is_empty() {
            return Ok(None);
        }

        writeln!(self.output, "? {message}")?;
        for (i, choice) in choices.iter().enumerate() {
            writeln!(self.output, "  {}) {choice}", i + 1)?;
        }

        loop {
            write!(self.output, "Answer [1-{}]: ", choices.len())?;
            self.output.flush()?;

            let Some(answer) = self.read_answer()? else {
                return Ok(None);
            };
            if answer.eq_ignore_ascii_case("q") {
                return Ok(None);
            }
            match answer.parse::<usize>() {
                Ok(n) if (1..=choices.len()).contains(&n) => return Ok(Some(n - 1)),
                _ => writeln!(
                    self.output,
                    "Please enter a number between 1 and {}",
                    choices.len()
                )?,
            }
        }
    }

    fn confirm(&mut self, message: &str) -> io::Result<bool> {
        write!(self.output, "{message} [y/N]: ")?;
        self.output.flush()?;
        Ok(self
            .read_answer()?
            .is_some_and(|a| matches!(a.to_lowercase().as_str(), "y" | "yes")))
    }
}

/// Arrow-key selector drawn on stdout.
#[derive(Debug, Default)]
pub struct TerminalPrompt {
    styled: bool,
}

/// Restores the terminal when the selector exits, including on error.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), Hide)?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), Show);
        let _ = terminal::disable_raw_mode();
    }
}

impl TerminalPrompt {
    pub fn new(styled: bool) -> Self {
        Self { styled }
    }

    fn draw(&self, out: &mut impl Write, choices: &[String], selected: usize) -> io::Result<()> {
        for (i, choice) in choices.iter().enumerate() {
            queue!(out, MoveToColumn(0), Clear(ClearType::CurrentLine))?;
            if i == selected {
                let line = format!("❯ {choice}");
                if self.styled {
                    write!(out, "{}", line.cyan())?;
                } else {
                    write!(out, "{line}")?;
                }
            } else {
                write!(out, "  {choice}")?;
            }
            write!(out, "\r\n")?;
        }
        out.flush()
    }

    fn erase(out: &mut impl Write, lines: usize) -> io::Result<()> {
        let lines = u16::try_from(lines).unwrap_or(u16::MAX);
        if lines > 0 {
            queue!(out, MoveUp(lines))?;
        }
        queue!(out, MoveToColumn(0), Clear(ClearType::FromCursorDown))?;
        out.flush()
    }
}

impl Prompt for TerminalPrompt {
    fn select(&mut self, message: &str, choices: &[String]) -> io::Result<Option<usize>> {
        if choices.is_empty() {
            return Ok(None);
        }

        let mut out = io::stdout();
        if self.styled {
            writeln!(out, "{} {}", "?".green(), message.bold())?;
        } else {
            writeln!(out, "? {message}")?;
        }

        let _guard = RawModeGuard::enable()?;
        let mut selected = 0;
        self.draw(&mut out, choices, selected)?;

        let choice = loop {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    selected = (selected + choices.len() - 1) % choices.len();
                }
                KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => {
                    selected = (selected + 1) % choices.len();
                }
                KeyCode::Enter => break Some(selected),
                KeyCode::Esc | KeyCode::Char('q') => break None,
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break None,
                _ => continue,
            }
            Self::erase(&mut out, choices.len())?;
            self.draw(&mut out, choices, selected)?;
        };

        Self::erase(&mut out, choices.len())?;
        Ok(choice)
    }

    fn confirm(&mut self, message: &str) -> io::Result<bool> {
        let stdin = io::stdin();
        LinePrompt::new(stdin.lock(), io::stdout()).confirm(message)
    }
}
