use serde_json::Value;

use crate::codec;
use crate::equal::equal;
use crate::error::SyncError;
use crate::hub::ChangeEvent;
use crate::store::StoreId;

/// Decides whether a raw change event is a real change to one watched key.
///
/// The event source is coarse: it fires for every key on every store. The
/// filter first discards cross-store and cross-key noise, then compares old
/// and new text structurally so that re-encodings of an equal value (object
/// key order, equivalent number formatting) do not fan out as signals.
#[derive(Debug, Clone)]
pub struct ChangeFilter {
    store: StoreId,
    key: String,
}

impl ChangeFilter {
    pub fn new(store: StoreId, key: impl Into<String>) -> Self {
        ChangeFilter {
            store,
            key: key.into(),
        }
    }

    /// Returns `Ok(true)` when the event represents a real change to the
    /// watched key.
    ///
    /// Creation and deletion (exactly one side absent) always signal. When
    /// both sides are present they are decoded and compared structurally.
    ///
    /// Decode failure policy: the error is returned for the caller to report
    /// and the signal is suppressed. Forwarding on transiently malformed text
    /// would storm the reactive layer, and the subsequent `read()` re-decodes
    /// and re-reports the same error anyway. Byte-equal sides short-circuit
    /// before decoding, so identical malformed text is not re-reported here
    /// either — only by the next `read()`.
    pub fn should_signal(&self, event: &ChangeEvent) -> Result<bool, SyncError> {
        if event.store != self.store || event.key != self.key {
            return Ok(false);
        }
        match (&event.old_text, &event.new_text) {
            (None, None) => Ok(false),
            (Some(_), None) | (None, Some(_)) => Ok(true),
            (Some(old), Some(new)) => {
                if old == new {
                    // Identical text decodes to an identical value.
                    return Ok(false);
                }
                let old = self.decode(old)?;
                let new = self.decode(new)?;
                Ok(!equal(&old, &new))
            }
        }
    }

    fn decode(&self, text: &str) -> Result<Value, SyncError> {
        codec::decode(text).map_err(|source| SyncError::Decode {
            key: self.key.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(
        store: StoreId,
        key: &str,
        old_text: Option<&str>,
        new_text: Option<&str>,
    ) -> ChangeEvent {
        ChangeEvent {
            store,
            key: key.to_owned(),
            old_text: old_text.map(str::to_owned),
            new_text: new_text.map(str::to_owned),
        }
    }

    #[test]
    fn ignores_other_keys() {
        let store = StoreId::next();
        let filter = ChangeFilter::new(store, "target");

        let verdict = filter.should_signal(&event(store, "other", None, Some("1")));
        assert!(!verdict.unwrap());
    }

    #[test]
    fn ignores_other_stores() {
        let filter = ChangeFilter::new(StoreId::next(), "target");

        let verdict = filter.should_signal(&event(StoreId::next(), "target", None, Some("1")));
        assert!(!verdict.unwrap());
    }

    #[test]
    fn creation_and_deletion_signal() {
        let store = StoreId::next();
        let filter = ChangeFilter::new(store, "target");

        assert!(
            filter
                .should_signal(&event(store, "target", None, Some("{\"a\":1}")))
                .unwrap()
        );
        assert!(
            filter
                .should_signal(&event(store, "target", Some("{\"a\":1}"), None))
                .unwrap()
        );
    }

    #[test]
    fn both_absent_is_noise() {
        let store = StoreId::next();
        let filter = ChangeFilter::new(store, "target");

        assert!(!filter.should_signal(&event(store, "target", None, None)).unwrap());
    }

    #[test]
    fn identical_text_is_suppressed() {
        let store = StoreId::next();
        let filter = ChangeFilter::new(store, "target");

        let verdict = filter.should_signal(&event(
            store,
            "target",
            Some("{\"a\":1}"),
            Some("{\"a\":1}"),
        ));
        assert!(!verdict.unwrap());
    }

    #[test]
    fn identical_malformed_text_is_suppressed_without_error() {
        let store = StoreId::next();
        let filter = ChangeFilter::new(store, "target");

        let verdict = filter.should_signal(&event(store, "target", Some("{bad"), Some("{bad")));
        assert!(!verdict.unwrap());
    }

    #[test]
    fn equal_reencoding_is_suppressed() {
        let store = StoreId::next();
        let filter = ChangeFilter::new(store, "target");

        let verdict = filter.should_signal(&event(
            store,
            "target",
            Some("{\"a\":1,\"b\":2}"),
            Some("{\"b\":2,\"a\":1}"),
        ));
        assert!(!verdict.unwrap());
    }

    #[test]
    fn value_change_signals() {
        let store = StoreId::next();
        let filter = ChangeFilter::new(store, "target");

        let verdict = filter.should_signal(&event(
            store,
            "target",
            Some("{\"a\":1}"),
            Some("{\"a\":2}"),
        ));
        assert!(verdict.unwrap());
    }

    #[test]
    fn malformed_side_is_an_error() {
        let store = StoreId::next();
        let filter = ChangeFilter::new(store, "target");

        let verdict = filter.should_signal(&event(store, "target", Some("{bad"), Some("{\"a\":1}")));
        assert!(matches!(verdict, Err(SyncError::Decode { .. })));

        let verdict = filter.should_signal(&event(store, "target", Some("{\"a\":1}"), Some("{bad")));
        assert!(matches!(verdict, Err(SyncError::Decode { .. })));
    }
}
