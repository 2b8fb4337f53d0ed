//! Process-wide default store and hub.
//!
//! The analog of a host environment's ambient storage area: controllers
//! constructed with [`ValueController::with_ambient`] share this store and
//! hub without any explicit wiring.
//!
//! [`ValueController::with_ambient`]: crate::ValueController::with_ambient

use std::sync::{Arc, OnceLock};

use crate::hub::ChangeHub;
use crate::store::MemoryStore;

/// The shared ambient store, created on first use.
pub fn store() -> Arc<MemoryStore> {
    static STORE: OnceLock<Arc<MemoryStore>> = OnceLock::new();
    Arc::clone(STORE.get_or_init(|| Arc::new(MemoryStore::new())))
}

/// The shared ambient change hub, created on first use.
pub fn hub() -> Arc<ChangeHub> {
    static HUB: OnceLock<Arc<ChangeHub>> = OnceLock::new();
    Arc::clone(HUB.get_or_init(|| Arc::new(ChangeHub::new())))
}
