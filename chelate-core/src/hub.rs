use std::sync::{Arc, RwLock, Weak};

use crate::store::StoreId;

/// A raw change notification from the external store.
///
/// One event per key mutation. `old_text` is absent when the entry was
/// created; `new_text` is absent when it was deleted.
#[derive(Debug, Clone)]
pub struct ChangeEvent {
    pub store: StoreId,
    pub key: String,
    pub old_text: Option<String>,
    pub new_text: Option<String>,
}

type Listener = Arc<dyn Fn(&ChangeEvent) + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

/// The coarse-grained change-event source.
///
/// External mutators (other execution contexts, or tests standing in for
/// them) publish one event per key mutation. Every registered listener sees
/// every event, for every key on every store, in publish order; listeners
/// filter for themselves. Local writes through a [`ValueController`] are not
/// self-published — the writer re-reads synchronously by convention.
///
/// [`ValueController`]: crate::ValueController
pub struct ChangeHub {
    registry: Arc<RwLock<Registry>>,
}

impl ChangeHub {
    pub fn new() -> Self {
        ChangeHub {
            registry: Arc::new(RwLock::new(Registry::default())),
        }
    }

    /// Registers a listener; the returned guard unregisters on drop.
    pub fn subscribe(&self, f: impl Fn(&ChangeEvent) + Send + Sync + 'static) -> Subscription {
        let mut registry = self.registry.write().unwrap();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push((id, Arc::new(f)));
        Subscription {
            registry: Arc::downgrade(&self.registry),
            id,
        }
    }

    /// Dispatches an event to all current listeners, synchronously and in
    /// registration order.
    ///
    /// The listener list is snapshotted before dispatch, so a listener may
    /// subscribe or unsubscribe mid-delivery without deadlocking. An
    /// unsubscribe during dispatch lets the in-flight delivery complete;
    /// all later events are withheld.
    pub fn publish(&self, event: &ChangeEvent) {
        let snapshot: Vec<Listener> = self
            .registry
            .read()
            .unwrap()
            .listeners
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in snapshot {
            listener(event);
        }
    }

    #[cfg(test)]
    fn listener_count(&self) -> usize {
        self.registry.read().unwrap().listeners.len()
    }
}

impl Default for ChangeHub {
    fn default() -> Self {
        Self::new()
    }
}

/// Guard for a hub registration.
///
/// Dropping it stops all future deliveries. The drop never panics, even
/// during teardown with a poisoned registry lock or an already-dropped hub.
pub struct Subscription {
    registry: Weak<RwLock<Registry>>,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            if let Ok(mut registry) = registry.write() {
                registry.listeners.retain(|(id, _)| *id != self.id);
            }
        }
    }
}
