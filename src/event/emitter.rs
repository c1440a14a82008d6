use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use super::types::{SpeechEvent, SpeechEventKind};

/// Handler registered against a provider's event stream.
pub type ListenerFn = dyn Fn(&SpeechEvent) + Send + Sync;

/// Identifier for one registered listener, used to remove it later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct ListenerEntry {
    id: ListenerId,
    kind: SpeechEventKind,
    handler: Arc<ListenerFn>,
}

/// Per-kind listener registry backing a provider's event stream.
///
/// Delivery is synchronous and preserves emission order. The listener list is
/// snapshotted before handlers run, so a handler may register or remove
/// listeners without re-entering the registry lock.
pub struct EventEmitter {
    next_id: AtomicU64,
    listeners: Mutex<Vec<ListenerEntry>>,
}

impl EventEmitter {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Register a handler for one event kind. Returns the id to remove it with.
    pub fn add_listener(
        &self,
        kind: SpeechEventKind,
        handler: impl Fn(&SpeechEvent) + Send + Sync + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.lock().push(ListenerEntry {
            id,
            kind,
            handler: Arc::new(handler),
        });
        debug!(event = %kind, "listener registered");
        id
    }

    /// Remove a previously registered handler. Returns `false` if the id is
    /// unknown (already removed).
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.lock();
        let before = listeners.len();
        listeners.retain(|entry| entry.id != id);
        listeners.len() < before
    }

    /// Number of currently registered listeners, across all kinds.
    pub fn listener_count(&self) -> usize {
        self.listeners.lock().len()
    }

    /// Deliver an event to every listener registered for its kind, in
    /// registration order.
    pub fn emit(&self, event: &SpeechEvent) {
        let handlers: Vec<Arc<ListenerFn>> = {
            let listeners = self.listeners.lock();
            listeners
                .iter()
                .filter(|entry| entry.kind == event.kind())
                .map(|entry| Arc::clone(&entry.handler))
                .collect()
        };

        debug!(event = %event.kind(), listeners = handlers.len(), "emitting speech event");

        for handler in handlers {
            handler(event);
        }
    }
}

impl Default for EventEmitter {
    fn default() -> Self {
        Self::new()
    }
}
