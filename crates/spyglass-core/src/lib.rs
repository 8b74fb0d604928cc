//! Spyglass Core
//!
//! This crate provides the engine-facing half of Spyglass:
//!
//! - [`ChangeEvent`] and [`Change`]: state transitions reported by an
//!   observable-state engine
//! - [`ObservableHandle`]: tracked containers and values, by shape
//! - [`Value`]: payload values carried by changes
//! - [`Spy`]: synchronous event hub with disposable subscriptions
//!
//! # Reporting Changes
//!
//! ```ignore
//! use spyglass_core::prelude::*;
//! use std::sync::Arc;
//!
//! let spy = Spy::new();
//! let _disposer = spy.subscribe(Arc::new(|event: &ChangeEvent| {
//!     println!("{:?}", event);
//! }));
//!
//! spy.report_change(Change::Create {
//!     object: ObservableHandle::value("count", 1),
//!     new_value: Value::from(0),
//! });
//! ```
//!
//! # Decoding Records
//!
//! Engines living outside the process can hand over JSON records:
//!
//! ```ignore
//! let event = ChangeEvent::from_json_str(
//!     r#"{"type":"error","message":"boom","spyReportStart":true}"#,
//! )?;
//! assert!(event.is_span_start());
//! ```

pub mod error;
pub mod event;
pub mod handle;
pub mod spy;
pub mod value;

// Re-export main types at crate root
pub use error::{DecodeError, DecodeResult};
pub use event::{Change, ChangeEvent};
pub use handle::{Atom, AtomId, ObservableHandle};
pub use spy::{ChangeHandler, ChangeSource, Disposer, Spy, SubscriptionId};
pub use value::{Value, format_number};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::event::{Change, ChangeEvent};
    pub use crate::handle::ObservableHandle;
    pub use crate::spy::{ChangeHandler, ChangeSource, Disposer, Spy};
    pub use crate::value::Value;
}
