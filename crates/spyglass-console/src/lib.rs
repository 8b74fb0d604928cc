//! Spyglass Console
//!
//! Host console adapters for Spyglass output:
//!
//! - [`Console`]: the host seam (plain log, optional groups and traces)
//! - [`OutputSink`]: writes through a console, falling back to flat logging
//! - [`WriterConsole`]: terminal output with indented groups and colors
//! - [`TracingConsole`]: forwards output into `tracing`
//! - [`RecordingConsole`]: keeps calls for assertions
//!
//! # Example
//!
//! ```ignore
//! use spyglass_console::{Line, OutputSink, WriterConsole};
//! use std::sync::Arc;
//!
//! let sink = OutputSink::detect(Arc::new(WriterConsole::stdout()));
//! sink.begin_group(&Line::plain("action 'save'"));
//! sink.line(&Line::plain("nested"));
//! sink.end_group();
//! ```

pub mod capabilities;
pub mod console;
pub mod line;
pub mod recording;
pub mod sink;
pub mod traced;
pub mod writer;

// Re-export main types
pub use capabilities::ConsoleCapabilities;
pub use console::Console;
pub use line::{Line, Style};
pub use recording::{ConsoleCall, RecordingConsole};
pub use sink::OutputSink;
pub use traced::TracingConsole;
pub use writer::WriterConsole;
