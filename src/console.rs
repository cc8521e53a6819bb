//! Standard input/output seam
//!
//! `printf` writes one line per call and `scanf()` reads one line per call.
//! The interpreter talks to a [`Console`] so that tests can run programs
//! against a [`MockConsole`] with queued input and captured output.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Line-oriented program I/O
pub trait Console {
    /// Write `text` followed by a newline
    fn print_line(&mut self, text: &str) -> io::Result<()>;

    /// Read one line without its terminator; `None` at end of input
    fn read_line(&mut self) -> io::Result<Option<String>>;
}

/// The process's real stdin/stdout
#[derive(Debug, Default)]
pub struct StdConsole;

impl StdConsole {
    pub fn new() -> Self {
        StdConsole
    }
}

impl Console for StdConsole {
    fn print_line(&mut self, text: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", text)?;
        stdout.flush()
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(&['\n', '\r'][..]).to_string()))
    }
}

/// Mock console for capturing output and feeding input
#[derive(Debug, Clone, Default)]
pub struct MockConsole {
    input: VecDeque<String>,
    pub lines: Vec<String>,
}

impl MockConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Console whose `read_line` yields `input` in order
    pub fn with_input<I, S>(input: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MockConsole {
            input: input.into_iter().map(Into::into).collect(),
            lines: Vec::new(),
        }
    }

    /// Get all printed lines
    pub fn get_output(&self) -> &[String] {
        &self.lines
    }
}

impl Console for MockConsole {
    fn print_line(&mut self, text: &str) -> io::Result<()> {
        self.lines.push(text.to_string());
        Ok(())
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.input.pop_front())
    }
}

impl<C: Console + ?Sized> Console for &mut C {
    fn print_line(&mut self, text: &str) -> io::Result<()> {
        (**self).print_line(text)
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        (**self).read_line()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_console_round_trip() {
        let mut console = MockConsole::with_input(["12", "x"]);

        assert_eq!(console.read_line().unwrap().as_deref(), Some("12"));
        assert_eq!(console.read_line().unwrap().as_deref(), Some("x"));
        assert_eq!(console.read_line().unwrap(), None);

        console.print_line("a").unwrap();
        console.print_line("b").unwrap();
        assert_eq!(console.get_output(), ["a", "b"]);
    }
}
