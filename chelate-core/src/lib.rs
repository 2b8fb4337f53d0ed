//! Chelate keeps an in-process observable value synchronized with an
//! external, persistent, string-keyed text store that other execution
//! contexts may mutate.
//!
//! Core concepts:
//! - **TextStore**: the abstract store capability (get/set/remove JSON text
//!   by key), with [`MemoryStore`] as the reference implementation
//! - **ChangeHub**: the coarse change-event source — one event per key
//!   mutation, delivered to every listener for every key on every store
//! - **ChangeFilter**: decides whether a raw event is a real change, using
//!   structural JSON equality so byte-different re-encodings of an equal
//!   value never fan out as notifications
//! - **StoreBinding**: the subscribe/read pair the reactive layer consumes
//! - **ValueController**: the per-consumer façade with fallback resolution,
//!   functional updates, and null-removal semantics
//!
//! All failures (malformed stored text, unencodable values, rejected writes)
//! are routed to an [`ErrorSink`] rather than returned or panicked; the
//! effective value then reads as absent.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use chelate_core::{ChangeHub, MemoryStore, ValueController, ValueOptions};
//! use serde_json::json;
//!
//! let store = Arc::new(MemoryStore::new());
//! let hub = Arc::new(ChangeHub::new());
//!
//! let counter = ValueController::new(
//!     Arc::clone(&store),
//!     Arc::clone(&hub),
//!     "counter",
//!     ValueOptions::with_fallback(json!(0)),
//! );
//! assert_eq!(counter.value(), json!(0));
//!
//! counter.update(|current| Ok(json!(current.as_i64().unwrap_or(0) + 1)));
//! assert_eq!(counter.value(), json!(1));
//! ```

pub mod ambient;
mod binding;
pub mod codec;
mod controller;
mod equal;
mod error;
mod filter;
mod hub;
mod store;

pub use binding::StoreBinding;
pub use controller::{ValueController, ValueOptions};
pub use equal::equal;
pub use error::{BoxError, ErrorSink, SyncError};
pub use filter::ChangeFilter;
pub use hub::{ChangeEvent, ChangeHub, Subscription};
pub use store::{MemoryStore, StoreId, TextStore};

pub use serde_json::Value;
