use std::sync::Arc;

use serde_json::Value;

use crate::codec;
use crate::error::{ErrorSink, SyncError};
use crate::filter::ChangeFilter;
use crate::hub::{ChangeHub, Subscription};
use crate::store::TextStore;

/// Bridges one watched key to the reactive layer.
///
/// The reactive layer consumes two primitives: `subscribe` (invoke `notify`
/// when the watched value may have changed) and `read` (current committed
/// value). The watched key and store are fixed at construction — watching a
/// different key or store means constructing a new binding, which keeps the
/// subscription's identity in lockstep with both.
pub struct StoreBinding<S: TextStore> {
    store: Arc<S>,
    hub: Arc<ChangeHub>,
    key: String,
    errors: ErrorSink,
}

impl<S: TextStore> StoreBinding<S> {
    pub fn new(
        store: Arc<S>,
        hub: Arc<ChangeHub>,
        key: impl Into<String>,
        errors: ErrorSink,
    ) -> Self {
        StoreBinding {
            store,
            hub,
            key: key.into(),
            errors,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Registers `notify` to fire on every real external change to the
    /// watched key. Filter decode errors go to the error sink and suppress
    /// the notification.
    pub fn subscribe(&self, notify: impl Fn() + Send + Sync + 'static) -> Subscription {
        let filter = ChangeFilter::new(self.store.id(), self.key.clone());
        let errors = self.errors.clone();
        self.hub.subscribe(move |event| match filter.should_signal(event) {
            Ok(true) => notify(),
            Ok(false) => {}
            Err(error) => errors.report(&error),
        })
    }

    /// Reads the currently stored value for the watched key.
    ///
    /// A pure function of store state: no caching, no side effects beyond
    /// error reporting, safe to call arbitrarily often (the reactive layer
    /// may call it on every render). Malformed text reports a decode error
    /// and reads as absent.
    pub fn read(&self) -> Option<Value> {
        let text = self.store.get(&self.key)?;
        match codec::decode(&text) {
            Ok(value) => Some(value),
            Err(source) => {
                self.errors.report(&SyncError::Decode {
                    key: self.key.clone(),
                    source,
                });
                None
            }
        }
    }
}
