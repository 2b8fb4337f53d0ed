use std::fmt;
use std::sync::Arc;

/// Boxed error for store write failures and failed update closures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Error kinds surfaced through the [`ErrorSink`].
///
/// All of these are caught at the boundary where they occur and routed to the
/// sink; none propagate out of the controller's public operations. A store
/// read returning nothing is not an error — absent is a normal state.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// Stored text for the key is not valid JSON.
    #[error("malformed stored text for key {key:?}: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    /// The value is not JSON-representable.
    #[error("value for key {key:?} is not JSON-representable: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    /// The store rejected a write or removal (quota exceeded, unavailable).
    #[error("store write failed for key {key:?}: {source}")]
    StoreWrite {
        key: String,
        #[source]
        source: BoxError,
    },
    /// An update closure passed to `ValueController::update` failed.
    #[error("update for key {key:?} failed: {source}")]
    Update {
        key: String,
        #[source]
        source: BoxError,
    },
}

impl SyncError {
    /// The watched key the error occurred for.
    pub fn key(&self) -> &str {
        match self {
            SyncError::Decode { key, .. }
            | SyncError::Encode { key, .. }
            | SyncError::StoreWrite { key, .. }
            | SyncError::Update { key, .. } => key,
        }
    }
}

/// Cloneable error callback shared by the binding and controller.
///
/// The default sink surfaces errors on the diagnostic channel via
/// `tracing::error!`. Sinks must not panic; they are invoked from read paths
/// and from event dispatch.
#[derive(Clone)]
pub struct ErrorSink(Arc<dyn Fn(&SyncError) + Send + Sync>);

impl ErrorSink {
    pub fn new(f: impl Fn(&SyncError) + Send + Sync + 'static) -> Self {
        ErrorSink(Arc::new(f))
    }

    pub fn report(&self, error: &SyncError) {
        (self.0)(error)
    }
}

impl Default for ErrorSink {
    fn default() -> Self {
        ErrorSink::new(|error| tracing::error!(%error, "store sync error"))
    }
}

impl fmt::Debug for ErrorSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorSink").finish_non_exhaustive()
    }
}
