//! EmitterObserver - fans notifications out to in-process listeners.

use event_emitter_rs::EventEmitter;
use tracing::warn;

use super::{CartObserver, Notification};

pub const SUCCESS_EVENT: &str = "cart.success";
pub const FAILURE_EVENT: &str = "cart.failure";

/// Emits each notification's message on [`SUCCESS_EVENT`] or
/// [`FAILURE_EVENT`].
///
/// `EventEmitter` runs every listener on its own thread. By default `notify`
/// joins them before returning, so listeners have finished when the cart
/// operation resolves. That join blocks the calling thread, which inside an
/// async runtime (and under [`SharedCartStore`](crate::SharedCartStore)'s
/// lock) is a runtime worker: use [`detached`](Self::detached) when
/// listeners may be slow.
pub struct EmitterObserver {
    emitter: EventEmitter,
    join_listeners: bool,
}

impl Default for EmitterObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl EmitterObserver {
    pub fn new() -> Self {
        Self::from_emitter(EventEmitter::new())
    }

    pub fn from_emitter(emitter: EventEmitter) -> Self {
        EmitterObserver {
            emitter,
            join_listeners: true,
        }
    }

    /// An observer whose `notify` returns as soon as listener threads are
    /// spawned, without waiting for them.
    pub fn detached() -> Self {
        EmitterObserver {
            emitter: EventEmitter::new(),
            join_listeners: false,
        }
    }

    /// Register a listener for successful outcomes. Returns the listener id.
    pub fn on_success<F>(&mut self, listener: F) -> String
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        self.emitter.on(SUCCESS_EVENT, listener)
    }

    /// Register a listener for failures. Returns the listener id.
    pub fn on_failure<F>(&mut self, listener: F) -> String
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        self.emitter.on(FAILURE_EVENT, listener)
    }
}

impl CartObserver for EmitterObserver {
    fn notify(&mut self, notification: &Notification) {
        let event = if notification.is_success() {
            SUCCESS_EVENT
        } else {
            FAILURE_EVENT
        };

        let handles = self.emitter.emit(event, notification.message.clone());
        if !self.join_listeners {
            return;
        }
        for handle in handles {
            if handle.join().is_err() {
                warn!(event = %event, "cart notification listener panicked");
            }
        }
    }
}
