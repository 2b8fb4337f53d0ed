use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::ambient;
use crate::binding::StoreBinding;
use crate::codec;
use crate::error::{BoxError, ErrorSink, SyncError};
use crate::hub::{ChangeHub, Subscription};
use crate::store::{MemoryStore, TextStore};

/// Configuration for a [`ValueController`].
#[derive(Debug)]
pub struct ValueOptions {
    /// Value presented when the key is absent or its text is undecodable.
    pub fallback: Option<Value>,
    /// Remove the key instead of storing JSON `null` (default true).
    pub remove_null: bool,
    /// Write the encoded fallback once at construction if the key is absent
    /// (default false).
    pub seed_fallback: bool,
    /// Error callback; defaults to logging through `tracing`.
    pub errors: ErrorSink,
}

impl Default for ValueOptions {
    fn default() -> Self {
        ValueOptions {
            fallback: None,
            remove_null: true,
            seed_fallback: false,
            errors: ErrorSink::default(),
        }
    }
}

impl ValueOptions {
    /// Options with just a fallback value configured.
    pub fn with_fallback(value: Value) -> Self {
        ValueOptions {
            fallback: Some(value),
            ..Default::default()
        }
    }
}

/// Per-consumer façade over one watched key.
///
/// Presents the effective value (committed value, else fallback, else null)
/// and a setter with functional-update and null-removal semantics. Every
/// failure is routed to the configured error sink; no public operation
/// panics or returns an error to the caller.
///
/// Local writes do not travel through the event path — the writing side
/// re-reads synchronously by convention, so there is no self-notification
/// loop.
pub struct ValueController<S: TextStore> {
    binding: StoreBinding<S>,
    store: Arc<S>,
    fallback: Option<Value>,
    remove_null: bool,
    errors: ErrorSink,
}

impl ValueController<MemoryStore> {
    /// Constructs a controller over the process-wide ambient store and hub.
    pub fn with_ambient(key: impl Into<String>, options: ValueOptions) -> Self {
        Self::new(ambient::store(), ambient::hub(), key, options)
    }
}

impl<S: TextStore> ValueController<S> {
    /// Constructs a controller watching `key` on `store`.
    ///
    /// If `seed_fallback` is set, a fallback is configured, and the key is
    /// currently absent, the encoded fallback is written here — exactly once
    /// per controller lifetime, synchronously, before any subscriber can
    /// observe the controller. The seed never re-runs for later reads or
    /// reconfigured fallbacks.
    pub fn new(
        store: Arc<S>,
        hub: Arc<ChangeHub>,
        key: impl Into<String>,
        options: ValueOptions,
    ) -> Self {
        let ValueOptions {
            fallback,
            remove_null,
            seed_fallback,
            errors,
        } = options;
        let controller = ValueController {
            binding: StoreBinding::new(Arc::clone(&store), hub, key, errors.clone()),
            store,
            fallback,
            remove_null,
            errors,
        };
        if seed_fallback {
            if let Some(fallback) = &controller.fallback {
                if controller.store.get(controller.key()).is_none() {
                    controller.write(fallback.clone());
                }
            }
        }
        controller
    }

    pub fn key(&self) -> &str {
        self.binding.key()
    }

    /// The current effective value: committed value, else fallback, else null.
    ///
    /// Recomputed from the store on every call; never cached.
    pub fn value(&self) -> Value {
        match self.binding.read() {
            Some(value) => value,
            None => self.fallback.clone().unwrap_or(Value::Null),
        }
    }

    /// The current effective value deserialized as `T`.
    ///
    /// An absent key with no fallback reads as JSON null; use `Option<T>`
    /// for `T` when that state is expected. Conversion failures are reported
    /// to the sink and read as `None`.
    pub fn value_as<T: DeserializeOwned>(&self) -> Option<T> {
        match serde_json::from_value(self.value()) {
            Ok(value) => Some(value),
            Err(source) => {
                self.errors.report(&SyncError::Decode {
                    key: self.key().to_owned(),
                    source,
                });
                None
            }
        }
    }

    /// Stores a new value for the watched key.
    ///
    /// `Value::Null` removes the key when `remove_null` is configured, so a
    /// configured fallback re-applies. Encode and write failures go to the
    /// error sink; nothing is retried.
    pub fn set(&self, value: Value) {
        if value.is_null() && self.remove_null {
            if let Err(source) = self.store.remove(self.key()) {
                self.errors.report(&SyncError::StoreWrite {
                    key: self.key().to_owned(),
                    source: Box::new(source),
                });
            }
            return;
        }
        self.write(value);
    }

    /// Stores any serializable value through the codec.
    pub fn set_as<T: Serialize>(&self, value: &T) {
        match serde_json::to_value(value) {
            Ok(value) => self.set(value),
            Err(source) => self.errors.report(&SyncError::Encode {
                key: self.key().to_owned(),
                source,
            }),
        }
    }

    /// Applies a functional update to the current effective value.
    ///
    /// The closure receives the effective value, so a configured fallback is
    /// visible while the key is absent. An `Err` return is reported to the
    /// sink and the write is skipped entirely.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(Value) -> Result<Value, BoxError>,
    {
        match f(self.value()) {
            Ok(value) => self.set(value),
            Err(source) => self.errors.report(&SyncError::Update {
                key: self.key().to_owned(),
                source,
            }),
        }
    }

    /// Registers `notify` for real external changes to the watched key.
    pub fn subscribe(&self, notify: impl Fn() + Send + Sync + 'static) -> Subscription {
        self.binding.subscribe(notify)
    }

    fn write(&self, value: Value) {
        let text = match codec::encode(&value) {
            Ok(text) => text,
            Err(source) => {
                self.errors.report(&SyncError::Encode {
                    key: self.key().to_owned(),
                    source,
                });
                return;
            }
        };
        if let Err(source) = self.store.set(self.key(), &text) {
            self.errors.report(&SyncError::StoreWrite {
                key: self.key().to_owned(),
                source: Box::new(source),
            });
        }
    }
}
