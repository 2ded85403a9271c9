//! Standard output / input seam.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Where `show` writes and where `ask` reads.
pub trait Console {
    fn write(&mut self, text: &str) -> io::Result<()>;

    fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.write(text)?;
        self.write("\n")
    }

    /// Read one line without its line terminator. Returns an empty string
    /// once input is exhausted.
    fn read_line(&mut self) -> io::Result<String>;
}

/// The process's stdout and stdin.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdConsole;

impl Console for StdConsole {
    fn write(&mut self, text: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        out.write_all(text.as_bytes())?;
        // Prompts have no newline; flush so they appear before input is read.
        out.flush()
    }

    fn read_line(&mut self) -> io::Result<String> {
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(trim_line_ending(line))
    }
}

/// Captures output in memory and serves scripted input lines.
#[derive(Debug, Default, Clone)]
pub struct BufferConsole {
    output: String,
    input: VecDeque<String>,
}

impl BufferConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// A console whose `read_line` returns `lines` in order.
    pub fn with_input<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            output: String::new(),
            input: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Everything written so far.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Written output split into lines.
    pub fn lines(&self) -> Vec<&str> {
        self.output.lines().collect()
    }

    /// Take the captured output, leaving the buffer empty.
    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }
}

impl Console for BufferConsole {
    fn write(&mut self, text: &str) -> io::Result<()> {
        self.output.push_str(text);
        Ok(())
    }

    fn read_line(&mut self) -> io::Result<String> {
        Ok(self
            .input
            .pop_front()
            .map(trim_line_ending)
            .unwrap_or_default())
    }
}

fn trim_line_ending(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}
