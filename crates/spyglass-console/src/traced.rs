//! Console that forwards output to `tracing`.

use std::backtrace::Backtrace;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::capabilities::ConsoleCapabilities;
use crate::console::{Console, indent};
use crate::line::Line;

/// Routes rendered lines into the application's `tracing` subscriber.
///
/// Lines are emitted at `INFO` with target `spyglass` and a `depth` field.
/// Traces go out at `DEBUG`.
#[derive(Debug, Default)]
pub struct TracingConsole {
    depth: AtomicUsize,
}

impl TracingConsole {
    /// Create a new tracing console.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current group nesting depth.
    pub fn depth(&self) -> usize {
        self.depth.load(Ordering::Relaxed)
    }
}

impl Console for TracingConsole {
    fn log(&self, line: &Line) {
        let depth = self.depth();
        tracing::info!(
            target: "spyglass",
            depth = depth,
            "{}{}",
            indent(depth),
            line.text
        );
    }

    fn group_collapsed(&self, line: &Line) {
        self.log(line);
        self.depth.fetch_add(1, Ordering::Relaxed);
    }

    fn group_end(&self) {
        let _ = self
            .depth
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |d| d.checked_sub(1));
    }

    fn dump(&self, record: &serde_json::Value) {
        let depth = self.depth();
        tracing::info!(
            target: "spyglass",
            depth = depth,
            record = %record,
            "{}{}",
            indent(depth),
            record
        );
    }

    fn trace(&self, backtrace: &Backtrace) {
        tracing::debug!(target: "spyglass", depth = self.depth(), "Trace\n{}", backtrace);
    }

    fn capabilities(&self) -> ConsoleCapabilities {
        ConsoleCapabilities::full()
    }
}
