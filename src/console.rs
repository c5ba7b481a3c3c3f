// Frenchy console: where `afficher` writes and where `pause` waits

use std::io::{self, BufRead, Write};

pub trait Console {
    /// Writes one line of program output.
    fn print_line(&mut self, text: &str) -> io::Result<()>;

    /// Blocks until one input event arrives.
    fn wait_for_input(&mut self) -> io::Result<()>;
}

/// The process's stdout and stdin.
#[derive(Debug, Default)]
pub struct StdConsole;

impl Console for StdConsole {
    fn print_line(&mut self, text: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "{}", text)?;
        out.flush()
    }

    fn wait_for_input(&mut self) -> io::Result<()> {
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(())
    }
}

/// Records output instead of writing it; pauses return immediately.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CapturedConsole {
    pub lines: Vec<String>,
    pub pauses: usize,
}

impl CapturedConsole {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Console for CapturedConsole {
    fn print_line(&mut self, text: &str) -> io::Result<()> {
        self.lines.push(text.to_string());
        Ok(())
    }

    fn wait_for_input(&mut self) -> io::Result<()> {
        self.pauses += 1;
        Ok(())
    }
}
