//! The host console seam.

use std::backtrace::Backtrace;

use crate::capabilities::ConsoleCapabilities;
use crate::line::Line;

/// A host console that rendered output is written to.
///
/// Only [`Console::log`] is required. Hosts that support grouping or stack
/// dumps override the other methods and report them in
/// [`Console::capabilities`].
pub trait Console: Send + Sync {
    /// Write a plain line.
    fn log(&self, line: &Line);

    /// Open a collapsible group headed by `line`.
    fn group_collapsed(&self, line: &Line) {
        self.log(line);
    }

    /// Close the innermost group.
    fn group_end(&self) {}

    /// Write a structured record.
    fn dump(&self, record: &serde_json::Value) {
        self.log(&Line::plain(record.to_string()));
    }

    /// Write a call stack.
    fn trace(&self, _backtrace: &Backtrace) {}

    /// Features this console supports.
    fn capabilities(&self) -> ConsoleCapabilities {
        ConsoleCapabilities::flat()
    }
}

/// Indentation for a group nesting depth.
pub(crate) fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}
