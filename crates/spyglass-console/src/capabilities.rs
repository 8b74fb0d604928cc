//! Host console capability descriptor.

/// Optional features a host console provides.
///
/// Plain logging is always available. Everything else is detected once per
/// host and handed to [`crate::OutputSink`] at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleCapabilities {
    /// Collapsible groups (`group_collapsed` / `group_end`).
    pub groups: bool,
    /// Call stack dumps.
    pub traces: bool,
}

impl Default for ConsoleCapabilities {
    fn default() -> Self {
        Self::full()
    }
}

impl ConsoleCapabilities {
    /// Create a descriptor with every feature available.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every feature available.
    pub fn full() -> Self {
        Self {
            groups: true,
            traces: true,
        }
    }

    /// Plain logging only.
    pub fn flat() -> Self {
        Self {
            groups: false,
            traces: false,
        }
    }

    /// Ask a console what it supports.
    pub fn detect(console: &dyn crate::Console) -> Self {
        console.capabilities()
    }

    /// Enable or disable group support.
    pub fn with_groups(mut self, enabled: bool) -> Self {
        self.groups = enabled;
        self
    }

    /// Enable or disable trace support.
    pub fn with_traces(mut self, enabled: bool) -> Self {
        self.traces = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_presets() {
        assert_eq!(ConsoleCapabilities::default(), ConsoleCapabilities::full());
        let flat = ConsoleCapabilities::flat();
        assert!(!flat.groups);
        assert!(!flat.traces);
    }

    #[test]
    fn test_capability_builder() {
        let caps = ConsoleCapabilities::flat().with_groups(true);
        assert!(caps.groups);
        assert!(!caps.traces);
    }
}
