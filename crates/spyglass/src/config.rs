//! Configuration for the change logger.

/// Controls what the renderer emits besides primary messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoggerConfig {
    /// Attach color hints to primary messages.
    pub styling: bool,

    /// Emit raw dumps of the salient payload fields.
    pub dumps: bool,

    /// Emit a call stack dump for kinds that carry one.
    ///
    /// Capturing a backtrace per event is slow; turn this off for
    /// chatty applications.
    pub traces: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self::verbose()
    }
}

impl LoggerConfig {
    /// Create a new logger configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable color hints.
    pub fn with_styling(mut self, enabled: bool) -> Self {
        self.styling = enabled;
        self
    }

    /// Enable or disable raw dumps.
    pub fn with_dumps(mut self, enabled: bool) -> Self {
        self.dumps = enabled;
        self
    }

    /// Enable or disable traces.
    pub fn with_traces(mut self, enabled: bool) -> Self {
        self.traces = enabled;
        self
    }

    /// Everything on.
    pub fn verbose() -> Self {
        Self {
            styling: true,
            dumps: true,
            traces: true,
        }
    }

    /// Primary messages only.
    pub fn compact() -> Self {
        Self {
            styling: true,
            dumps: false,
            traces: false,
        }
    }
}
