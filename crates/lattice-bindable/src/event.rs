//! Notification payloads emitted by bindable models.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_MODEL_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identifier of a bindable model.
///
/// Every event carries the id of the model that emitted it, so one slot can
/// serve several models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModelId(u64);

impl ModelId {
    pub(crate) fn next() -> Self {
        Self(NEXT_MODEL_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw numeric value.
    pub fn as_raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "model#{}", self.0)
    }
}

/// A property of a model changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyChanged {
    /// The model that changed.
    pub source: ModelId,
    /// The changed property, or `None` when many properties changed and
    /// every binding should re-read the model.
    pub property: Option<String>,
}

impl PropertyChanged {
    /// Returns `true` if this event concerns `name`, including refresh-all events.
    pub fn affects(&self, name: &str) -> bool {
        self.property.as_deref().is_none_or(|property| property == name)
    }

    /// Returns `true` if this is a refresh-all event.
    pub fn is_refresh(&self) -> bool {
        self.property.is_none()
    }
}

/// The error list of a property changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorsChanged {
    /// The model whose ledger changed.
    pub source: ModelId,
    /// The property whose errors changed.
    pub property: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_ids_are_unique() {
        let a = ModelId::next();
        let b = ModelId::next();
        assert_ne!(a, b);
        assert!(b.as_raw() > a.as_raw());
    }

    #[test]
    fn refresh_event_affects_every_property() {
        let event = PropertyChanged {
            source: ModelId::next(),
            property: None,
        };
        assert!(event.is_refresh());
        assert!(event.affects("Name"));

        let named = PropertyChanged {
            property: Some("Age".to_string()),
            ..event
        };
        assert!(named.affects("Age"));
        assert!(!named.affects("Name"));
    }
}
