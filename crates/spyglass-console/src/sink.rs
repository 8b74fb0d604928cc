//! Output sink over a host console.

use std::backtrace::Backtrace;
use std::sync::Arc;

use crate::capabilities::ConsoleCapabilities;
use crate::console::Console;
use crate::line::Line;

/// Writes rendered output to a host console, degrading to flat logging
/// when the host lacks group or trace support.
#[derive(Clone)]
pub struct OutputSink {
    console: Arc<dyn Console>,
    capabilities: ConsoleCapabilities,
}

impl OutputSink {
    /// Create a sink that trusts the given capability descriptor.
    pub fn new(console: Arc<dyn Console>, capabilities: ConsoleCapabilities) -> Self {
        Self {
            console,
            capabilities,
        }
    }

    /// Create a sink, asking the console once what it supports.
    pub fn detect(console: Arc<dyn Console>) -> Self {
        let capabilities = ConsoleCapabilities::detect(console.as_ref());
        tracing::debug!(
            event = "console_detected",
            groups = capabilities.groups,
            traces = capabilities.traces,
            "Console capabilities detected"
        );
        Self::new(console, capabilities)
    }

    /// The capabilities this sink was built with.
    pub fn capabilities(&self) -> ConsoleCapabilities {
        self.capabilities
    }

    /// Open a collapsible group, or write a plain line if groups are unsupported.
    pub fn begin_group(&self, line: &Line) {
        if self.capabilities.groups {
            self.console.group_collapsed(line);
        } else {
            self.console.log(line);
        }
    }

    /// Close one group level. No-op if groups are unsupported.
    pub fn end_group(&self) {
        if self.capabilities.groups {
            self.console.group_end();
        }
    }

    /// Write a plain line.
    pub fn line(&self, line: &Line) {
        self.console.log(line);
    }

    /// Write a structured record as-is.
    pub fn dump(&self, record: &serde_json::Value) {
        self.console.dump(record);
    }

    /// Dump the current call stack. No-op if traces are unsupported.
    pub fn trace(&self) {
        if self.capabilities.traces {
            self.console.trace(&Backtrace::force_capture());
        }
    }
}

impl std::fmt::Debug for OutputSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutputSink")
            .field("capabilities", &self.capabilities)
            .finish()
    }
}
