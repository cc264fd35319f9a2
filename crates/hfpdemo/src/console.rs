//! User-facing console output
//!
//! Everything the operator reads (confirmations, usage strings, event
//! reports, the prompt) goes through a [`Console`]. Diagnostics go through
//! `log` instead.

use crate::config::PROMPT;
use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

pub trait Console {
    /// Writes one line of text
    fn write_line(&mut self, line: &str);

    /// Redisplays the input prompt
    fn prompt(&mut self);
}

/// Console on the process standard output
#[derive(Debug, Default)]
pub struct StdoutConsole;

impl Console for StdoutConsole {
    fn write_line(&mut self, line: &str) {
        println!("{}", line);
    }

    fn prompt(&mut self) {
        print!("\n{}", PROMPT);
        let _ = io::stdout().flush();
    }
}

/// Console that keeps its output in memory
///
/// Clones share the same buffer, so a test can hand one clone to the shell
/// and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct BufferConsole {
    inner: Rc<RefCell<Buffer>>,
}

#[derive(Debug, Default)]
struct Buffer {
    lines: Vec<String>,
    prompts: usize,
}

impl BufferConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.inner.borrow().lines.clone()
    }

    /// Number of times the prompt was shown
    pub fn prompts(&self) -> usize {
        self.inner.borrow().prompts
    }

    /// Whether any line contains `text`
    pub fn contains(&self, text: &str) -> bool {
        self.inner.borrow().lines.iter().any(|l| l.contains(text))
    }

    pub fn clear(&self) {
        let mut buffer = self.inner.borrow_mut();
        buffer.lines.clear();
        buffer.prompts = 0;
    }
}

impl Console for BufferConsole {
    fn write_line(&mut self, line: &str) {
        self.inner.borrow_mut().lines.push(line.to_string());
    }

    fn prompt(&mut self) {
        self.inner.borrow_mut().prompts += 1;
    }
}
