//! Translation of change events into console output.

use serde_json::json;
use spyglass_console::{Line, OutputSink, Style};
use spyglass_core::{Change, ChangeEvent, ChangeHandler, ObservableHandle, format_number};

use crate::config::LoggerConfig;
use crate::format::format_value;
use crate::names::{callee, observable_name};

/// Output for a single change: primary message, raw dumps and whether a
/// trace follows.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedChange {
    /// The primary message.
    pub primary: Line,
    /// Raw payload dumps, in emission order.
    pub dumps: Vec<serde_json::Value>,
    /// Whether a call stack dump follows.
    pub trace: bool,
}

impl RenderedChange {
    fn new(primary: Line) -> Self {
        Self {
            primary,
            dumps: Vec::new(),
            trace: false,
        }
    }

    fn with_dump(mut self, dump: serde_json::Value) -> Self {
        self.dumps.push(dump);
        self
    }

    fn with_trace(mut self) -> Self {
        self.trace = true;
        self
    }
}

/// Joins a message and an optional callee without a dangling space.
fn with_callee(message: String, callee: String) -> String {
    if callee.is_empty() {
        message
    } else {
        format!("{} {}", message, callee)
    }
}

fn slot_or_undefined<T: ToString>(slot: Option<&T>) -> String {
    slot.map_or_else(|| "undefined".to_string(), ToString::to_string)
}

/// Build the output for a change. Unknown kinds produce nothing.
pub fn render_change(change: &Change) -> Option<RenderedChange> {
    let rendered = match change {
        Change::Action {
            name,
            target,
            arguments,
        } => RenderedChange::new(Line::styled(
            with_callee(format!("action '{}'", name), callee(target.as_ref())),
            Style::Blue,
        ))
        .with_dump(json!(arguments))
        .with_dump(json!({ "target": target }))
        .with_trace(),
        Change::Transaction { name, target } => RenderedChange::new(Line::styled(
            with_callee(format!("transaction '{}'", name), callee(target.as_ref())),
            Style::Gray,
        )),
        Change::Reaction { object } => RenderedChange::new(Line::styled(
            format!("reaction '{}'", observable_name(object)),
            Style::Green,
        ))
        .with_trace(),
        Change::Compute { object, target } => RenderedChange::new(Line::styled(
            with_callee(
                format!("computed '{}'", observable_name(object)),
                callee(target.as_ref()),
            ),
            Style::Gray,
        )),
        Change::Error { message } => {
            RenderedChange::new(Line::styled(format!("error: {}", message), Style::Red))
                .with_trace()
        }
        Change::Update {
            object,
            name,
            index,
            new_value,
            old_value,
        } => {
            let target = match object {
                ObservableHandle::Array(_) => format!(
                    "{}[{}]",
                    observable_name(object),
                    slot_or_undefined(index.as_ref())
                ),
                ObservableHandle::Keyed(_) => format!(
                    "{}.{}",
                    observable_name(object),
                    slot_or_undefined(name.as_ref())
                ),
                ObservableHandle::Value(_) => observable_name(object),
            };
            RenderedChange::new(Line::plain(format!(
                "updated '{}': {} (was: {})",
                target,
                format_value(new_value),
                format_value(old_value)
            )))
            .with_dump(json!({ "newValue": new_value, "oldValue": old_value }))
            .with_trace()
        }
        Change::Splice {
            object,
            index,
            added,
            removed,
            added_count,
            removed_count,
        } => RenderedChange::new(Line::plain(format!(
            "spliced '{}': index {}, added {}, removed {}",
            observable_name(object),
            index,
            added_count,
            removed_count
        )))
        .with_dump(json!({ "added": added, "removed": removed }))
        .with_trace(),
        Change::Add {
            object,
            name,
            new_value,
        } => RenderedChange::new(Line::plain(format!(
            "set '{}.{}': {}",
            observable_name(object),
            name,
            format_value(new_value)
        )))
        .with_dump(json!({ "newValue": new_value }))
        .with_trace(),
        Change::Delete {
            object,
            name,
            old_value,
        } => RenderedChange::new(Line::plain(format!(
            "removed '{}.{}' (was {})",
            observable_name(object),
            name,
            format_value(old_value)
        )))
        .with_dump(json!({ "oldValue": old_value }))
        .with_trace(),
        Change::Create { object, new_value } => RenderedChange::new(Line::plain(format!(
            "set '{}': {}",
            observable_name(object),
            format_value(new_value)
        )))
        .with_dump(json!({ "newValue": new_value }))
        .with_trace(),
        Change::Unknown => return None,
    };
    Some(rendered)
}

/// Renders change events through an [`OutputSink`].
///
/// The renderer keeps no state of its own. Span nesting lives in the host
/// console: a span start opens a group, the matching span end closes it.
#[derive(Debug, Clone)]
pub struct ChangeRenderer {
    sink: OutputSink,
    config: LoggerConfig,
}

impl ChangeRenderer {
    /// Create a renderer writing to `sink`.
    pub fn new(sink: OutputSink, config: LoggerConfig) -> Self {
        Self { sink, config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// Get the output sink.
    pub fn sink(&self) -> &OutputSink {
        &self.sink
    }

    /// Render one event.
    pub fn render(&self, event: &ChangeEvent) {
        match event {
            ChangeEvent::SpanEnd { time } => {
                if let Some(time) = time {
                    self.sink.line(&self.style(Line::styled(
                        format!("total time: {}ms", format_number(*time)),
                        Style::Gray,
                    )));
                }
                self.sink.end_group();
            }
            ChangeEvent::Change(change) => self.emit(change, false),
            ChangeEvent::SpanStart(change) => self.emit(change, true),
        }
    }

    /// Decode a loosely-typed JSON record and render it.
    ///
    /// Records that fail to decode are dropped after a debug log.
    pub fn render_json(&self, record: serde_json::Value) {
        match ChangeEvent::from_json(record) {
            Ok(event) => self.render(&event),
            Err(e) => {
                tracing::debug!(event = "record_ignored", error = %e, "Ignoring change record");
            }
        }
    }

    fn emit(&self, change: &Change, opens_span: bool) {
        let Some(rendered) = render_change(change) else {
            tracing::trace!(event = "change_skipped", kind = change.kind(), "Nothing to render");
            return;
        };

        let primary = self.style(rendered.primary);
        if opens_span {
            self.sink.begin_group(&primary);
        } else {
            self.sink.line(&primary);
        }

        // Dumps are plain lines, so a span's dumps nest inside its own group.
        if self.config.dumps {
            for dump in &rendered.dumps {
                self.sink.dump(dump);
            }
        }

        if rendered.trace && self.config.traces {
            self.sink.trace();
        }
    }

    fn style(&self, line: Line) -> Line {
        if self.config.styling {
            line
        } else {
            line.without_style()
        }
    }
}

impl ChangeHandler for ChangeRenderer {
    fn on_change(&self, event: &ChangeEvent) {
        self.render(event);
    }
}
