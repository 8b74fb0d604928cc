//! Console that records calls for later inspection.

use std::backtrace::Backtrace;

use parking_lot::RwLock;

use crate::capabilities::ConsoleCapabilities;
use crate::console::Console;
use crate::line::Line;

/// A call received by a [`RecordingConsole`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCall {
    /// Plain line.
    Log(Line),
    /// Group header.
    GroupCollapsed(Line),
    /// Group close.
    GroupEnd,
    /// Structured record.
    Dump(serde_json::Value),
    /// Call stack dump.
    Trace,
}

/// A console that keeps every call it receives.
pub struct RecordingConsole {
    calls: RwLock<Vec<ConsoleCall>>,
    capabilities: ConsoleCapabilities,
}

impl RecordingConsole {
    /// Create a recording console with every feature available.
    pub fn new() -> Self {
        Self::with_capabilities(ConsoleCapabilities::full())
    }

    /// Create a recording console reporting the given features.
    pub fn with_capabilities(capabilities: ConsoleCapabilities) -> Self {
        Self {
            calls: RwLock::new(Vec::new()),
            capabilities,
        }
    }

    /// Get recorded calls.
    pub fn calls(&self) -> Vec<ConsoleCall> {
        self.calls.read().clone()
    }

    /// Text of every line and group header, in order.
    pub fn texts(&self) -> Vec<String> {
        self.calls
            .read()
            .iter()
            .filter_map(|call| match call {
                ConsoleCall::Log(line) | ConsoleCall::GroupCollapsed(line) => {
                    Some(line.text.clone())
                }
                _ => None,
            })
            .collect()
    }

    /// Clear recorded calls.
    pub fn clear(&self) {
        self.calls.write().clear();
    }

    /// Get call count.
    pub fn len(&self) -> usize {
        self.calls.read().len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.calls.read().is_empty()
    }

    fn record(&self, call: ConsoleCall) {
        self.calls.write().push(call);
    }
}

impl Default for RecordingConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for RecordingConsole {
    fn log(&self, line: &Line) {
        self.record(ConsoleCall::Log(line.clone()));
    }

    fn group_collapsed(&self, line: &Line) {
        self.record(ConsoleCall::GroupCollapsed(line.clone()));
    }

    fn group_end(&self) {
        self.record(ConsoleCall::GroupEnd);
    }

    fn dump(&self, record: &serde_json::Value) {
        self.record(ConsoleCall::Dump(record.clone()));
    }

    fn trace(&self, _backtrace: &Backtrace) {
        self.record(ConsoleCall::Trace);
    }

    fn capabilities(&self) -> ConsoleCapabilities {
        self.capabilities
    }
}

impl std::fmt::Debug for RecordingConsole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordingConsole")
            .field("call_count", &self.len())
            .field("capabilities", &self.capabilities)
            .finish()
    }
}
