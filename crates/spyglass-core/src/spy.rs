//! The spy event hub.
//!
//! The engine reports every state transition to a [`Spy`]. Listeners
//! register a [`ChangeHandler`] and get back a [`Disposer`] that removes the
//! registration again. Delivery is synchronous and in report order.

use std::sync::{Arc, Weak};
use std::time::Instant;

use parking_lot::RwLock;
use uuid::Uuid;

use crate::event::{Change, ChangeEvent};

/// Receives change events from a [`ChangeSource`].
pub trait ChangeHandler: Send + Sync {
    /// Called once per event, in causal order.
    fn on_change(&self, event: &ChangeEvent);
}

impl<F> ChangeHandler for F
where
    F: Fn(&ChangeEvent) + Send + Sync,
{
    fn on_change(&self, event: &ChangeEvent) {
        self(event)
    }
}

/// Anything that can deliver change events to a handler.
pub trait ChangeSource: Send + Sync {
    /// Register a handler. Dropping or calling the returned disposer removes it.
    fn subscribe(&self, handler: Arc<dyn ChangeHandler>) -> Disposer;
}

/// Unique identifier for a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    /// Create a new random subscription ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SubscriptionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Removes a subscription when disposed or dropped.
#[must_use = "dropping a disposer immediately removes the subscription"]
pub struct Disposer {
    dispose: Option<Box<dyn FnOnce() + Send>>,
}

impl Disposer {
    /// Create a disposer that runs `dispose` exactly once.
    pub fn new(dispose: impl FnOnce() + Send + 'static) -> Self {
        Self {
            dispose: Some(Box::new(dispose)),
        }
    }

    /// A disposer that does nothing.
    pub fn noop() -> Self {
        Self { dispose: None }
    }

    /// Remove the subscription now.
    pub fn dispose(mut self) {
        self.run();
    }

    fn run(&mut self) {
        if let Some(dispose) = self.dispose.take() {
            dispose();
        }
    }
}

impl Drop for Disposer {
    fn drop(&mut self) {
        self.run();
    }
}

impl std::fmt::Debug for Disposer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Disposer")
            .field("pending", &self.dispose.is_some())
            .finish()
    }
}

type HandlerList = RwLock<Vec<(SubscriptionId, Arc<dyn ChangeHandler>)>>;

/// In-process change source used by the engine to report transitions.
#[derive(Default)]
pub struct Spy {
    handlers: Arc<HandlerList>,
}

impl Spy {
    /// Create a new spy with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if anyone is listening. Engines skip building events otherwise.
    pub fn is_enabled(&self) -> bool {
        !self.handlers.read().is_empty()
    }

    /// Get the number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.read().len()
    }

    /// Deliver an event to every handler.
    pub fn report(&self, event: ChangeEvent) {
        // Snapshot so handlers may subscribe or dispose while being notified.
        let handlers: Vec<_> = self
            .handlers
            .read()
            .iter()
            .map(|(_, handler)| Arc::clone(handler))
            .collect();

        for handler in handlers {
            handler.on_change(&event);
        }
    }

    /// Report a change that does not open a span.
    pub fn report_change(&self, change: Change) {
        self.report(ChangeEvent::Change(change));
    }

    /// Report a change that opens a span.
    pub fn report_start(&self, change: Change) {
        self.report(ChangeEvent::SpanStart(change));
    }

    /// Close the innermost span.
    pub fn report_end(&self, time: Option<f64>) {
        self.report(ChangeEvent::SpanEnd { time });
    }

    /// Run `f` inside a span opened by `change`, reporting its elapsed
    /// milliseconds when it finishes.
    pub fn span<T>(&self, change: Change, f: impl FnOnce() -> T) -> T {
        if !self.is_enabled() {
            return f();
        }

        self.report_start(change);
        let _end = SpanGuard {
            spy: self,
            start: Instant::now(),
        };
        f()
    }
}

/// Reports the end of a span when dropped, including during unwinding.
struct SpanGuard<'a> {
    spy: &'a Spy,
    start: Instant,
}

impl Drop for SpanGuard<'_> {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed().as_secs_f64() * 1000.0;
        self.spy.report_end(Some(elapsed));
    }
}

impl ChangeSource for Spy {
    fn subscribe(&self, handler: Arc<dyn ChangeHandler>) -> Disposer {
        let id = SubscriptionId::new();
        self.handlers.write().push((id, handler));
        tracing::trace!(event = "subscribed", subscription = %id, "Spy handler added");

        let handlers: Weak<HandlerList> = Arc::downgrade(&self.handlers);
        Disposer::new(move || {
            if let Some(handlers) = handlers.upgrade() {
                handlers.write().retain(|(existing, _)| *existing != id);
                tracing::trace!(event = "unsubscribed", subscription = %id, "Spy handler removed");
            }
        })
    }
}

impl std::fmt::Debug for Spy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Spy")
            .field("handler_count", &self.handler_count())
            .finish()
    }
}
