//! The logging toggle.

use std::sync::Arc;

use parking_lot::Mutex;
use spyglass_console::{Console, ConsoleCapabilities, OutputSink, WriterConsole};
use spyglass_core::{ChangeHandler, ChangeSource, Disposer};

use crate::config::LoggerConfig;
use crate::render::ChangeRenderer;

/// Owns the subscription between a change source and a renderer.
///
/// At most one subscription is active at a time. Dropping the logger
/// removes it.
pub struct ChangeLogger {
    source: Arc<dyn ChangeSource>,
    renderer: Arc<ChangeRenderer>,
    disposer: Mutex<Option<Disposer>>,
}

impl ChangeLogger {
    /// Create a disabled logger.
    pub fn new(source: Arc<dyn ChangeSource>, renderer: ChangeRenderer) -> Self {
        Self {
            source,
            renderer: Arc::new(renderer),
            disposer: Mutex::new(None),
        }
    }

    /// Create a builder for a logger over `source`.
    pub fn builder(source: Arc<dyn ChangeSource>) -> LoggerBuilder {
        LoggerBuilder::new(source)
    }

    /// Turn logging on or off. Repeating the current state does nothing.
    pub fn set_log_level(&self, enabled: bool) {
        let mut disposer = self.disposer.lock();
        match (enabled, disposer.is_some()) {
            (true, false) => {
                let handler: Arc<dyn ChangeHandler> = Arc::clone(&self.renderer) as _;
                *disposer = Some(self.source.subscribe(handler));
                tracing::debug!(event = "logging_enabled", "Change logging enabled");
            }
            (false, true) => {
                if let Some(active) = disposer.take() {
                    active.dispose();
                }
                tracing::debug!(event = "logging_disabled", "Change logging disabled");
            }
            _ => {}
        }
    }

    /// Turn logging on.
    pub fn enable(&self) {
        self.set_log_level(true);
    }

    /// Turn logging off.
    pub fn disable(&self) {
        self.set_log_level(false);
    }

    /// Check if logging is on.
    pub fn is_enabled(&self) -> bool {
        self.disposer.lock().is_some()
    }

    /// Get the renderer.
    pub fn renderer(&self) -> &ChangeRenderer {
        &self.renderer
    }
}

impl std::fmt::Debug for ChangeLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeLogger")
            .field("enabled", &self.is_enabled())
            .field("renderer", &self.renderer)
            .finish()
    }
}

/// Builder for a [`ChangeLogger`].
pub struct LoggerBuilder {
    source: Arc<dyn ChangeSource>,
    console: Option<Arc<dyn Console>>,
    capabilities: Option<ConsoleCapabilities>,
    config: LoggerConfig,
    enabled: bool,
}

impl LoggerBuilder {
    /// Create a new builder. Output goes to stdout unless a console is set.
    pub fn new(source: Arc<dyn ChangeSource>) -> Self {
        Self {
            source,
            console: None,
            capabilities: None,
            config: LoggerConfig::default(),
            enabled: false,
        }
    }

    /// Set the host console.
    pub fn with_console(mut self, console: Arc<dyn Console>) -> Self {
        self.console = Some(console);
        self
    }

    /// Override the console's own capability report.
    pub fn with_capabilities(mut self, capabilities: ConsoleCapabilities) -> Self {
        self.capabilities = Some(capabilities);
        self
    }

    /// Set the logger configuration.
    pub fn with_config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    /// Start with logging already on.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Build the logger.
    pub fn build(self) -> ChangeLogger {
        let console = self
            .console
            .unwrap_or_else(|| Arc::new(WriterConsole::stdout()) as Arc<dyn Console>);
        let sink = match self.capabilities {
            Some(capabilities) => OutputSink::new(console, capabilities),
            None => OutputSink::detect(console),
        };

        let logger = ChangeLogger::new(self.source, ChangeRenderer::new(sink, self.config));
        logger.set_log_level(self.enabled);
        logger
    }
}
