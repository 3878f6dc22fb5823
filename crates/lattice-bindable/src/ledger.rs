//! Per-property error bookkeeping.
//!
//! [`ErrorLedger`] is the plain data structure behind a model's validation
//! state. It knows nothing about notifications; [`BindableModel`] wraps it
//! and announces every mutation.
//!
//! Two invariants are maintained by every operation:
//!
//! - a property has an entry only while its message list is non-empty;
//! - entries keep the order in which properties first received an error.
//!
//! [`BindableModel`]: crate::BindableModel

use std::collections::HashMap;
use std::fmt;

/// Which validation source produced an error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// Produced by the declarative rule engine.
    Declarative,
    /// Raised by the UI binding layer while converting or validating input.
    Binding,
    /// Added by application code, typically a business rule.
    Manual,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKind::Declarative => write!(f, "Declarative"),
            RuleKind::Binding => write!(f, "Binding"),
            RuleKind::Manual => write!(f, "Manual"),
        }
    }
}

/// The current error messages of one property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyErrors {
    /// The property name.
    pub property: String,
    /// Messages in insertion order. Never empty.
    pub messages: Vec<String>,
}

/// Ordered per-property error lists plus the rule kind of every message.
#[derive(Debug, Clone, Default)]
pub struct ErrorLedger {
    entries: Vec<PropertyErrors>,
    /// First-seen kind of every message ever recorded, per property.
    kinds: HashMap<String, HashMap<String, RuleKind>>,
}

impl ErrorLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, property: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.property == property)
    }

    fn remember_kind(&mut self, property: &str, message: &str, kind: RuleKind) {
        self.kinds
            .entry(property.to_string())
            .or_default()
            .entry(message.to_string())
            .or_insert(kind);
    }

    /// Record `message` for `property`.
    ///
    /// With `unique`, a message already in the list is not appended again.
    /// Returns `false` only when `message` is empty and nothing was recorded.
    pub fn add(&mut self, property: &str, message: &str, kind: RuleKind, unique: bool) -> bool {
        if message.is_empty() {
            return false;
        }
        self.remember_kind(property, message, kind);

        match self.position(property) {
            Some(index) => {
                let messages = &mut self.entries[index].messages;
                if !unique || !messages.iter().any(|m| m == message) {
                    messages.push(message.to_string());
                }
            }
            None => self.entries.push(PropertyErrors {
                property: property.to_string(),
                messages: vec![message.to_string()],
            }),
        }
        true
    }

    /// Remove the first occurrence of `message` from `property`.
    ///
    /// Returns `true` if the property had an entry, whether or not the
    /// message was found in it.
    pub fn remove(&mut self, property: &str, message: &str) -> bool {
        let Some(index) = self.position(property) else {
            return false;
        };
        let messages = &mut self.entries[index].messages;
        if let Some(found) = messages.iter().position(|m| m == message) {
            messages.remove(found);
        }
        if messages.is_empty() {
            self.entries.remove(index);
        }
        true
    }

    /// Drop every message of `property`. Returns `true` if there were any.
    pub fn clear(&mut self, property: &str) -> bool {
        match self.position(property) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Drop the messages of `property` recorded under `kind`.
    ///
    /// Returns the number of messages removed, or `None` if the property had
    /// no entry.
    pub fn clear_kind(&mut self, property: &str, kind: RuleKind) -> Option<usize> {
        let index = self.position(property)?;
        let kinds = self.kinds.get(property);
        let messages = &mut self.entries[index].messages;
        let before = messages.len();
        messages.retain(|message| kinds.and_then(|k| k.get(message)) != Some(&kind));
        let removed = before - messages.len();
        if messages.is_empty() {
            self.entries.remove(index);
        }
        Some(removed)
    }

    /// Replace the whole list of `property` with `messages`.
    ///
    /// Empty messages are skipped. An existing entry keeps its position.
    /// Returns `true` if the stored list differs from before.
    pub fn replace(&mut self, property: &str, messages: Vec<String>, kind: RuleKind) -> bool {
        let messages: Vec<String> = messages.into_iter().filter(|m| !m.is_empty()).collect();
        for message in &messages {
            self.remember_kind(property, message, kind);
        }

        match (self.position(property), messages.is_empty()) {
            (Some(index), true) => {
                self.entries.remove(index);
                true
            }
            (Some(index), false) => {
                let entry = &mut self.entries[index];
                let changed = entry.messages != messages;
                entry.messages = messages;
                changed
            }
            (None, true) => false,
            (None, false) => {
                self.entries.push(PropertyErrors {
                    property: property.to_string(),
                    messages,
                });
                true
            }
        }
    }

    /// Returns `true` if `property` currently holds a message recorded under `kind`.
    pub fn has_kind(&self, property: &str, kind: RuleKind) -> bool {
        let Some(kinds) = self.kinds.get(property) else {
            return false;
        };
        self.errors(property)
            .is_some_and(|messages| messages.iter().any(|m| kinds.get(m) == Some(&kind)))
    }

    /// The kind first recorded for `message` on `property`.
    ///
    /// Kinds are remembered even after the message is removed.
    pub fn kind_of(&self, property: &str, message: &str) -> Option<RuleKind> {
        self.kinds.get(property)?.get(message).copied()
    }

    /// The messages of `property`, if it has any.
    pub fn errors(&self, property: &str) -> Option<&[String]> {
        self.position(property)
            .map(|index| self.entries[index].messages.as_slice())
    }

    /// The messages of `property` joined with `separator`.
    pub fn joined(&self, property: &str, separator: &str) -> Option<String> {
        self.errors(property).map(|messages| messages.join(separator))
    }

    /// Iterate over properties with errors, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &PropertyErrors> {
        self.entries.iter()
    }

    /// First message of the first property with errors, or `""`.
    pub fn summary(&self) -> &str {
        self.entries
            .first()
            .and_then(|entry| entry.messages.first())
            .map_or("", String::as_str)
    }

    /// Returns `true` if no property has errors.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of properties with errors.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Total number of messages across all properties.
    pub fn message_count(&self) -> usize {
        self.entries.iter().map(|entry| entry.messages.len()).sum()
    }
}
