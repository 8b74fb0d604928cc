//! # Spyglass - Change Logger for Observable State
//!
//! Spyglass subscribes to the spy stream of an observable-state engine and
//! renders every state transition as readable, grouped console output:
//! actions, transactions, reactions, computed values, errors and container
//! mutations.
//!
//! ## Features
//!
//! - **Grouping**: actions and transactions open collapsible groups, so the
//!   changes they cause render nested underneath
//! - **Stable names**: observables are shown as `name@id`
//! - **Raw dumps and traces**: the salient payload of each change, plus the
//!   call stack that led to it
//! - **Any host**: writes to a terminal, to `tracing`, or to your own
//!   [`Console`], degrading gracefully when groups are unsupported
//!
//! ## Quick Start
//!
//! ```ignore
//! use spyglass::prelude::*;
//! use std::sync::Arc;
//!
//! let spy = Arc::new(Spy::new());
//! let logger = ChangeLogger::builder(spy.clone()).build();
//! logger.set_log_level(true);
//!
//! spy.report_change(Change::Update {
//!     object: ObservableHandle::array("list", 3),
//!     name: None,
//!     index: Some(2),
//!     new_value: Value::from(5),
//!     old_value: Value::from(2),
//! });
//! // updated 'list@3[2]': 5 (was: 2)
//! // {"newValue":5,"oldValue":2}
//! // Trace ...
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────┐
//! │            Observable-state engine (Spy)           │
//! ├────────────────────────────────────────────────────┤
//! │                 spyglass (facade)                  │
//! │   ChangeLogger ─▶ ChangeRenderer ─▶ names/format   │
//! ├──────────────────────────┬─────────────────────────┤
//! │      spyglass-core       │    spyglass-console     │
//! │  (events, handles, spy)  │  (sink, host consoles)  │
//! └──────────────────────────┴─────────────────────────┘
//! ```

pub mod config;
pub mod format;
pub mod logger;
pub mod names;
pub mod render;

// Re-export from sub-crates
pub use spyglass_console;
pub use spyglass_core;

pub use config::LoggerConfig;
pub use format::{Formatted, format_value};
pub use logger::{ChangeLogger, LoggerBuilder};
pub use names::{callee, describe, observable_name};
pub use render::{ChangeRenderer, RenderedChange, render_change};

pub use spyglass_console::{
    Console, ConsoleCapabilities, Line, OutputSink, RecordingConsole, Style, TracingConsole,
    WriterConsole,
};
pub use spyglass_core::{
    Change, ChangeEvent, ChangeHandler, ChangeSource, DecodeError, Disposer, ObservableHandle,
    Spy, Value,
};

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```ignore
/// use spyglass::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::LoggerConfig;
    pub use crate::logger::ChangeLogger;
    pub use crate::render::ChangeRenderer;
    pub use spyglass_console::{Console, ConsoleCapabilities, OutputSink, WriterConsole};
    pub use spyglass_core::prelude::*;
}
