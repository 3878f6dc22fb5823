//! The bindable model base.
//!
//! [`BindableModel`] combines an [`Observable`] with an [`ErrorLedger`] and a
//! declarative validation bridge. A concrete model embeds one and calls it
//! from its setters:
//!
//! ```
//! use lattice_bindable::validation::{Required, ValidationRules};
//! use lattice_bindable::{BindableModel, Property};
//!
//! struct Person {
//!     base: BindableModel,
//!     name: Property<Option<String>>,
//! }
//!
//! impl Person {
//!     fn set_name(&self, name: Option<String>) {
//!         if self.base.validate_property("Name", name.clone()) {
//!             self.base.set_property(&self.name, name, "Name");
//!         }
//!     }
//! }
//!
//! # fn main() -> lattice_bindable::Result<()> {
//! let rules = ValidationRules::builder().rule("Name", Required::new()).build()?;
//! let person = Person {
//!     base: BindableModel::builder().rules(rules).build(),
//!     name: Property::new(None),
//! };
//!
//! person.set_name(None);
//! assert!(!person.base.is_valid());
//! assert_eq!(person.base.error_summary(), "The Name field is required.");
//!
//! person.set_name(Some("Ada".into()));
//! assert!(person.base.is_valid());
//! assert!(person.base.is_modified());
//! # Ok(())
//! # }
//! ```
//!
//! # Notifications
//!
//! Every ledger mutation emits [`ErrorsChanged`] for the property (when
//! enabled) and re-announces [`IS_VALID`] through the property-changed
//! channel. No lock is held while slots run, so a slot may query or mutate
//! the model it listens to.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use lattice_bindable_core::logging::targets;
use lattice_bindable_core::{ConnectionId, Property, Signal};
use parking_lot::Mutex;

use crate::config::{ModelBuilder, ModelConfig};
use crate::event::{ErrorsChanged, ModelId, PropertyChanged};
use crate::ledger::{ErrorLedger, PropertyErrors, RuleKind};
use crate::observable::{IS_VALID, Observable};
use crate::validation::{PropertySource, RuleEngine, Validation, Value};

/// Observable, self-validating model state.
pub struct BindableModel {
    observable: Observable,
    ledger: Mutex<ErrorLedger>,
    errors_changed: Signal<ErrorsChanged>,
    notify_errors_enabled: AtomicBool,
    error_separator: String,
    rules: Option<Arc<dyn RuleEngine>>,
}

static_assertions::assert_impl_all!(BindableModel: Send, Sync);

impl Default for BindableModel {
    fn default() -> Self {
        Self::new()
    }
}

impl BindableModel {
    /// Create a model with default configuration and no rules.
    pub fn new() -> Self {
        Self::with_config(ModelConfig::default())
    }

    /// Start building a model.
    pub fn builder() -> ModelBuilder {
        ModelBuilder::new()
    }

    /// Create a model from a configuration.
    pub fn with_config(config: ModelConfig) -> Self {
        let observable = Observable::new(ModelId::next());
        observable.set_notify_property_changed_enabled(config.notify_property_changed);
        for property in config.ignored_properties {
            observable.ignore_modified(property);
        }
        Self {
            observable,
            ledger: Mutex::new(ErrorLedger::new()),
            errors_changed: Signal::new(),
            notify_errors_enabled: AtomicBool::new(config.notify_errors_changed),
            error_separator: config.error_separator,
            rules: config.rules,
        }
    }

    /// The id carried by every event this model emits.
    pub fn id(&self) -> ModelId {
        self.observable.source()
    }

    /// The change-tracking half of the model.
    pub fn observable(&self) -> &Observable {
        &self.observable
    }

    // -------------------------------------------------------------------------
    // Change notification
    // -------------------------------------------------------------------------

    /// The property-changed channel.
    pub fn property_changed(&self) -> &Signal<PropertyChanged> {
        self.observable.property_changed()
    }

    /// Connect a slot that only runs for changes of `property`.
    pub fn connect_property<F>(&self, property: impl Into<String>, slot: F) -> ConnectionId
    where
        F: Fn(&PropertyChanged) + Send + Sync + 'static,
    {
        self.observable.connect_property(property, slot)
    }

    /// Announce that `property` changed. See [`Observable::notify_property_changed`].
    pub fn notify_property_changed(&self, property: &str) {
        self.observable.notify_property_changed(property);
    }

    /// Announce that many properties changed at once.
    pub fn notify_all_properties_changed(&self) {
        self.observable.notify_all_properties_changed();
    }

    /// Store `value` and announce `name` if it changed.
    pub fn set_property<T>(&self, property: &Property<T>, value: T, name: &str) -> bool
    where
        T: Clone + PartialEq,
    {
        self.observable.set_property(property, value, name)
    }

    /// Returns `true` once a tracked property has changed.
    pub fn is_modified(&self) -> bool {
        self.observable.is_modified()
    }

    /// Set the modified flag, e.g. to clear it after saving.
    pub fn set_modified(&self, modified: bool) {
        self.observable.set_modified(modified);
    }

    /// Returns `true` once any change notification has been emitted.
    pub fn has_notified_property_changed(&self) -> bool {
        self.observable.has_notified_property_changed()
    }

    /// Enable or disable property-changed notifications.
    pub fn set_notify_property_changed_enabled(&self, enabled: bool) {
        self.observable.set_notify_property_changed_enabled(enabled);
    }

    /// Returns `true` if property-changed notifications are emitted.
    pub fn notify_property_changed_enabled(&self) -> bool {
        self.observable.notify_property_changed_enabled()
    }

    /// Stop `property` from marking the model modified.
    pub fn ignore_modified(&self, property: impl Into<String>) {
        self.observable.ignore_modified(property);
    }

    /// Returns `true` if changes to `property` leave the modified flag alone.
    pub fn is_ignored(&self, property: &str) -> bool {
        self.observable.is_ignored(property)
    }

    // -------------------------------------------------------------------------
    // Error ledger
    // -------------------------------------------------------------------------

    /// The errors-changed channel.
    pub fn errors_changed(&self) -> &Signal<ErrorsChanged> {
        &self.errors_changed
    }

    /// Enable or disable errors-changed notifications.
    ///
    /// `is_valid` is still re-announced through the property-changed channel.
    pub fn set_notify_errors_changed_enabled(&self, enabled: bool) {
        self.notify_errors_enabled.store(enabled, Ordering::SeqCst);
    }

    /// Returns `true` if errors-changed notifications are emitted.
    pub fn notify_errors_changed_enabled(&self) -> bool {
        self.notify_errors_enabled.load(Ordering::SeqCst)
    }

    /// Add `message` to the errors of `property`.
    ///
    /// Empty messages are ignored.
    pub fn add_error(&self, property: &str, message: &str, kind: RuleKind) {
        self.record_error(property, message, kind, false);
    }

    /// Add `message` unless `property` already holds it.
    pub fn add_unique_error(&self, property: &str, message: &str, kind: RuleKind) {
        self.record_error(property, message, kind, true);
    }

    fn record_error(&self, property: &str, message: &str, kind: RuleKind, unique: bool) {
        let recorded = self.ledger.lock().add(property, message, kind, unique);
        if !recorded {
            return;
        }
        tracing::trace!(target: targets::LEDGER, source = %self.id(), property, message, %kind, "error added");
        self.emit_errors_changed(property);
        self.notify_valid_changed();
    }

    /// Remove the first occurrence of `message` from `property`.
    pub fn remove_error(&self, property: &str, message: &str) {
        let existed = self.ledger.lock().remove(property, message);
        if existed {
            tracing::trace!(target: targets::LEDGER, source = %self.id(), property, message, "error removed");
            self.emit_errors_changed(property);
        }
        self.notify_valid_changed();
    }

    /// Remove every error of `property`.
    pub fn clear_errors(&self, property: &str) {
        let existed = self.ledger.lock().clear(property);
        tracing::trace!(target: targets::LEDGER, source = %self.id(), property, existed, "errors cleared");
        self.emit_errors_changed(property);
        self.notify_valid_changed();
    }

    /// Remove the errors of `property` that were recorded under `kind`.
    ///
    /// Errors of other kinds survive. Emits at most one errors-changed event.
    pub fn clear_errors_of_kind(&self, property: &str, kind: RuleKind) {
        let removed = self.ledger.lock().clear_kind(property, kind);
        if let Some(removed) = removed {
            tracing::trace!(target: targets::LEDGER, source = %self.id(), property, %kind, removed, "errors of kind cleared");
            self.emit_errors_changed(property);
        }
        self.notify_valid_changed();
    }

    /// Remove the errors of `property` raised by the binding layer.
    pub fn clear_binding_errors(&self, property: &str) {
        self.clear_errors_of_kind(property, RuleKind::Binding);
    }

    /// Returns `true` if `property` holds an error recorded under `kind`.
    pub fn has_error_of_kind(&self, property: &str, kind: RuleKind) -> bool {
        self.ledger.lock().has_kind(property, kind)
    }

    /// Returns `true` if `property` holds an error raised by the binding layer.
    pub fn has_binding_error(&self, property: &str) -> bool {
        self.has_error_of_kind(property, RuleKind::Binding)
    }

    /// The kind first recorded for `message` on `property`.
    pub fn error_kind(&self, property: &str, message: &str) -> Option<RuleKind> {
        self.ledger.lock().kind_of(property, message)
    }

    /// The errors of `property`, or `None` if it has none.
    pub fn errors(&self, property: &str) -> Option<Vec<String>> {
        self.ledger.lock().errors(property).map(<[String]>::to_vec)
    }

    /// The errors of `property`, or of every property when `property` is
    /// `None` or empty, flattened in ledger order.
    pub fn get_errors(&self, property: Option<&str>) -> Vec<String> {
        let ledger = self.ledger.lock();
        match property.filter(|name| !name.is_empty()) {
            Some(name) => ledger.errors(name).map(<[String]>::to_vec).unwrap_or_default(),
            None => ledger
                .iter()
                .flat_map(|entry| entry.messages.iter().cloned())
                .collect(),
        }
    }

    /// Snapshot of every property's errors, in ledger order.
    pub fn all_errors(&self) -> Vec<PropertyErrors> {
        self.ledger.lock().iter().cloned().collect()
    }

    /// Snapshot of the ledger, including the kind of every message.
    ///
    /// The copy is detached: later mutations of the model do not show in it.
    pub fn ledger(&self) -> ErrorLedger {
        self.ledger.lock().clone()
    }

    /// The errors of `property` joined with the configured separator.
    pub fn error_text(&self, property: &str) -> Option<String> {
        self.ledger.lock().joined(property, &self.error_separator)
    }

    /// One representative error: the first message of the first property
    /// with errors, or an empty string.
    pub fn error_summary(&self) -> String {
        self.ledger.lock().summary().to_string()
    }

    /// Returns `true` if any property has errors.
    pub fn has_errors(&self) -> bool {
        !self.ledger.lock().is_empty()
    }

    /// Returns `true` if no property has errors.
    ///
    /// Always derived from the ledger; there is no setter.
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    /// Total number of error messages.
    pub fn error_count(&self) -> usize {
        self.ledger.lock().message_count()
    }

    fn emit_errors_changed(&self, property: &str) {
        if !self.notify_errors_changed_enabled() {
            return;
        }
        self.errors_changed.emit(ErrorsChanged {
            source: self.id(),
            property: property.to_string(),
        });
    }

    fn notify_valid_changed(&self) {
        self.observable.notify_property_changed(IS_VALID);
    }

    // -------------------------------------------------------------------------
    // Declarative validation
    // -------------------------------------------------------------------------

    /// The rule engine, if one was configured.
    pub fn rules(&self) -> Option<&Arc<dyn RuleEngine>> {
        self.rules.as_ref()
    }

    /// Validate `value` against the rules of `property`.
    ///
    /// Replaces every existing error of `property` with the messages
    /// produced by the rule engine and returns whether the value passed.
    /// Intended to be called from a setter before storing the value.
    pub fn validate_property(&self, property: &str, value: impl Into<Value>) -> bool {
        let value = value.into();
        let outcome = match &self.rules {
            Some(rules) => rules.validate(property, &value),
            None => Validation::Valid,
        };
        let passed = outcome.is_valid();
        tracing::debug!(
            target: targets::VALIDATION,
            source = %self.id(),
            property,
            passed,
            messages = outcome.messages().len(),
            "property validated"
        );

        let changed = self
            .ledger
            .lock()
            .replace(property, outcome.into_messages(), RuleKind::Declarative);
        if changed {
            self.emit_errors_changed(property);
        }
        self.notify_valid_changed();
        passed
    }

    /// Validate every property carrying rules, reading current values from
    /// `source`, then announce a refresh of the whole model.
    ///
    /// The refresh marks the model modified; call
    /// [`set_modified(false)`](Self::set_modified) afterwards when loading.
    ///
    /// Returns whether every property passed.
    pub fn validate_model<S>(&self, source: &S) -> bool
    where
        S: PropertySource + ?Sized,
    {
        let properties = self
            .rules
            .as_ref()
            .map(|rules| rules.validated_properties())
            .unwrap_or_default();

        let mut passed = true;
        for property in &properties {
            let value = source.property_value(property);
            passed &= self.validate_property(property, value);
        }
        tracing::debug!(
            target: targets::VALIDATION,
            source = %self.id(),
            properties = properties.len(),
            passed,
            "model validated"
        );

        self.notify_all_properties_changed();
        passed
    }
}

impl std::fmt::Debug for BindableModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BindableModel")
            .field("id", &self.id())
            .field("is_modified", &self.is_modified())
            .field("errors", &*self.ledger.lock())
            .finish_non_exhaustive()
    }
}
