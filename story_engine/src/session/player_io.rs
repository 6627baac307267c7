//! The player I/O collaborator: everything the session shows or asks.

use std::io::{self, BufRead, Write};
use story_rules::Outcome;

/// Display and input surface the session drives.
///
/// Implementations own all raw-input handling. In particular,
/// [`request_choice`](Self::request_choice) must keep asking until it has a
/// value in `[1, max]`; the session never sees malformed input.
pub trait PlayerIo {
    /// Display narrative text.
    fn show_text(&mut self, text: &str) -> io::Result<()>;

    /// Display choices numbered from 1 in the given order.
    fn show_options(&mut self, labels: &[&str]) -> io::Result<()>;

    /// Block until the player picks a number in `[1, max]`.
    fn request_choice(&mut self, max: usize) -> io::Result<usize>;

    /// Display final health and how the story ended.
    fn show_final_state(&mut self, health: i32, outcome: Outcome) -> io::Result<()>;
}

/// Line-based console I/O over any reader and writer.
pub struct ConsoleIo<R, W> {
    input: R,
    output: W,
}

impl ConsoleIo<io::StdinLock<'static>, io::Stdout> {
    /// Console I/O on the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsoleIo<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Give back the writer, e.g. to inspect captured output.
    pub fn into_output(self) -> W {
        self.output
    }
}

/// Parse one line of player input as a choice in `[1, max]`.
pub fn parse_choice(line: &str, max: usize) -> Option<usize> {
    line.trim()
        .parse::<usize>()
        .ok()
        .filter(|choice| (1..=max).contains(choice))
}

impl<R: BufRead, W: Write> PlayerIo for ConsoleIo<R, W> {
    fn show_text(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", text)
    }

    fn show_options(&mut self, labels: &[&str]) -> io::Result<()> {
        for (index, label) in labels.iter().enumerate() {
            writeln!(self.output, "{}) {}", index + 1, label)?;
        }
        Ok(())
    }

    fn request_choice(&mut self, max: usize) -> io::Result<usize> {
        if max == 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "no choices to pick from",
            ));
        }

        loop {
            write!(self.output, "Choose (1-{}): ", max)?;
            self.output.flush()?;

            let mut line = String::new();
            match self.input.read_line(&mut line) {
                Ok(0) => {
                    return Err(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "input closed before a choice was made",
                    ));
                }
                Ok(_) => {}
                // Not UTF-8; the bad line is consumed, so just ask again
                Err(err) if err.kind() == io::ErrorKind::InvalidData => {
                    writeln!(self.output, "Error reading input. Please try again.")?;
                    continue;
                }
                Err(err) => return Err(err),
            }

            if let Some(choice) = parse_choice(&line, max) {
                return Ok(choice);
            }

            tracing::debug!(input = line.trim(), max, "rejected choice");
            writeln!(
                self.output,
                "Invalid input! Please enter a number between 1 and {}.",
                max
            )?;
        }
    }

    fn show_final_state(&mut self, health: i32, outcome: Outcome) -> io::Result<()> {
        writeln!(self.output, "Final Health: {}", health)?;
        writeln!(self.output, "{}", outcome.banner())
    }
}
