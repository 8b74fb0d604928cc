//! Console that writes to any `io::Write`.

use std::backtrace::Backtrace;
use std::io::{self, Write};

use parking_lot::Mutex;

use crate::capabilities::ConsoleCapabilities;
use crate::console::{Console, indent};
use crate::line::Line;

struct WriterState<W> {
    writer: W,
    depth: usize,
}

/// Terminal-style console. Groups are rendered by indenting two spaces per level.
pub struct WriterConsole<W: Write + Send> {
    state: Mutex<WriterState<W>>,
    colors: bool,
}

impl<W: Write + Send> WriterConsole<W> {
    /// Create a console writing to `writer`, without colors.
    pub fn new(writer: W) -> Self {
        Self {
            state: Mutex::new(WriterState { writer, depth: 0 }),
            colors: false,
        }
    }

    /// Enable or disable ANSI colors for styled lines.
    pub fn with_colors(mut self, enabled: bool) -> Self {
        self.colors = enabled;
        self
    }

    /// Current group nesting depth.
    pub fn depth(&self) -> usize {
        self.state.lock().depth
    }

    /// Consume the console and return the writer.
    pub fn into_inner(self) -> W {
        self.state.into_inner().writer
    }

    fn write_line(&self, state: &mut WriterState<W>, line: &Line) {
        let text = match line.style {
            Some(style) if self.colors => style.paint(&line.text).to_string(),
            _ => line.text.clone(),
        };
        // Write errors are dropped.
        let _ = writeln!(state.writer, "{}{}", indent(state.depth), text);
    }
}

impl WriterConsole<io::Stdout> {
    /// Console on standard output, with colors.
    pub fn stdout() -> Self {
        Self::new(io::stdout()).with_colors(true)
    }
}

impl WriterConsole<io::Stderr> {
    /// Console on standard error, with colors.
    pub fn stderr() -> Self {
        Self::new(io::stderr()).with_colors(true)
    }
}

impl<W: Write + Send> Console for WriterConsole<W> {
    fn log(&self, line: &Line) {
        let mut state = self.state.lock();
        self.write_line(&mut state, line);
    }

    fn group_collapsed(&self, line: &Line) {
        let mut state = self.state.lock();
        self.write_line(&mut state, line);
        state.depth += 1;
    }

    fn group_end(&self) {
        let mut state = self.state.lock();
        state.depth = state.depth.saturating_sub(1);
    }

    fn trace(&self, backtrace: &Backtrace) {
        let mut state = self.state.lock();
        let prefix = indent(state.depth);
        let _ = writeln!(state.writer, "{}Trace", prefix);
        for frame in backtrace.to_string().lines() {
            let _ = writeln!(state.writer, "{}  {}", prefix, frame.trim_start());
        }
    }

    fn capabilities(&self) -> ConsoleCapabilities {
        ConsoleCapabilities::full()
    }
}

impl<W: Write + Send> std::fmt::Debug for WriterConsole<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WriterConsole")
            .field("depth", &self.depth())
            .field("colors", &self.colors)
            .finish()
    }
}
