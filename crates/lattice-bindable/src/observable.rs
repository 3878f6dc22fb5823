//! Change notification and modified-state tracking.
//!
//! [`Observable`] is the half of a bindable model that announces property
//! changes. Concrete models call [`Observable::notify_property_changed`] from
//! their setters; the observable keeps two derived flags up to date and
//! forwards the change to every connected slot.
//!
//! # Derived properties
//!
//! Three synthetic property names are announced by the model itself:
//!
//! - [`IS_MODIFIED`]: set when any tracked property changes. Announcing this
//!   name is a no-op, which is what breaks the `is_modified` update cycle.
//! - [`HAS_NOTIFIED_PROPERTY_CHANGED`]: latched after the first notification.
//! - [`IS_VALID`]: re-announced after every error ledger mutation.
//!
//! The last two are always in the ignore set, so announcing them never marks
//! the model modified.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};

use lattice_bindable_core::logging::targets;
use lattice_bindable_core::{ConnectionId, Property, Signal};
use parking_lot::RwLock;

use crate::event::{ModelId, PropertyChanged};

/// Name announced when the modified flag changes.
pub const IS_MODIFIED: &str = "is_modified";
/// Name announced when the first notification has been sent.
pub const HAS_NOTIFIED_PROPERTY_CHANGED: &str = "has_notified_property_changed";
/// Name announced after every error ledger mutation.
pub const IS_VALID: &str = "is_valid";

/// Property-changed channel plus modified-state bookkeeping.
pub struct Observable {
    source: ModelId,
    is_modified: AtomicBool,
    has_notified: AtomicBool,
    notify_enabled: AtomicBool,
    /// Names that never mark the model modified.
    ignored: RwLock<HashSet<String>>,
    property_changed: Signal<PropertyChanged>,
}

impl Observable {
    /// Create an observable for `source` with notifications enabled.
    pub fn new(source: ModelId) -> Self {
        let ignored = [HAS_NOTIFIED_PROPERTY_CHANGED, IS_VALID]
            .into_iter()
            .map(str::to_string)
            .collect();
        Self {
            source,
            is_modified: AtomicBool::new(false),
            has_notified: AtomicBool::new(false),
            notify_enabled: AtomicBool::new(true),
            ignored: RwLock::new(ignored),
            property_changed: Signal::new(),
        }
    }

    /// The id carried by every event this observable emits.
    pub fn source(&self) -> ModelId {
        self.source
    }

    /// The property-changed channel.
    pub fn property_changed(&self) -> &Signal<PropertyChanged> {
        &self.property_changed
    }

    /// Announce that `property` changed.
    ///
    /// Marks the model modified unless the name is ignored, then emits the
    /// change if notifications are enabled. Announcing [`IS_MODIFIED`] does
    /// nothing.
    pub fn notify_property_changed(&self, property: &str) {
        if property == IS_MODIFIED {
            return;
        }
        if !self.is_ignored(property) {
            self.update_modified(true);
        }
        self.dispatch(Some(property));
    }

    /// Announce that many properties changed at once.
    ///
    /// Marks the model modified like a named change, then emits a single
    /// event with no property name so bindings refresh everything.
    pub fn notify_all_properties_changed(&self) {
        self.update_modified(true);
        self.dispatch(None);
    }

    /// Store `value` in `property` and announce `name` if it changed.
    ///
    /// Returns whether the value changed.
    pub fn set_property<T>(&self, property: &Property<T>, value: T, name: &str) -> bool
    where
        T: Clone + PartialEq,
    {
        let changed = property.set(value);
        if changed {
            self.notify_property_changed(name);
        }
        changed
    }

    /// Returns `true` once a tracked property has changed.
    pub fn is_modified(&self) -> bool {
        self.is_modified.load(Ordering::SeqCst)
    }

    /// Set the modified flag, e.g. to clear it after the model was saved.
    pub fn set_modified(&self, modified: bool) {
        self.update_modified(modified);
        if self.notify_property_changed_enabled() {
            self.latch_notified();
        }
    }

    /// Returns `true` once any change notification has been emitted.
    pub fn has_notified_property_changed(&self) -> bool {
        self.has_notified.load(Ordering::SeqCst)
    }

    /// Enable or disable change notifications.
    ///
    /// Flags keep updating while disabled; only emission is suppressed.
    pub fn set_notify_property_changed_enabled(&self, enabled: bool) {
        self.notify_enabled.store(enabled, Ordering::SeqCst);
    }

    /// Returns `true` if change notifications are emitted.
    pub fn notify_property_changed_enabled(&self) -> bool {
        self.notify_enabled.load(Ordering::SeqCst)
    }

    /// Stop `property` from marking the model modified.
    pub fn ignore_modified(&self, property: impl Into<String>) {
        self.ignored.write().insert(property.into());
    }

    /// Returns `true` if changes to `property` leave the modified flag alone.
    pub fn is_ignored(&self, property: &str) -> bool {
        self.ignored.read().contains(property)
    }

    /// Connect a slot that only runs for changes of `property`.
    ///
    /// Refresh-all events (no property name) do not reach the slot.
    pub fn connect_property<F>(&self, property: impl Into<String>, slot: F) -> ConnectionId
    where
        F: Fn(&PropertyChanged) + Send + Sync + 'static,
    {
        let property = property.into();
        self.property_changed.connect(move |event| {
            if event.property.as_deref() == Some(property.as_str()) {
                slot(event);
            }
        })
    }

    /// Write the modified flag and emit its own event once.
    fn update_modified(&self, modified: bool) {
        self.is_modified.store(modified, Ordering::SeqCst);
        if self.notify_property_changed_enabled() {
            self.emit(Some(IS_MODIFIED));
        }
    }

    fn dispatch(&self, property: Option<&str>) {
        if !self.notify_property_changed_enabled() {
            tracing::trace!(
                target: targets::PROPERTY,
                source = %self.source,
                property,
                "notifications disabled, skipping"
            );
            return;
        }
        self.emit(property);
        self.latch_notified();
    }

    /// Latch `has_notified_property_changed` and announce it the first time.
    fn latch_notified(&self) {
        if !self.has_notified.swap(true, Ordering::SeqCst) {
            self.emit(Some(HAS_NOTIFIED_PROPERTY_CHANGED));
        }
    }

    fn emit(&self, property: Option<&str>) {
        tracing::trace!(target: targets::PROPERTY, source = %self.source, property, "property changed");
        self.property_changed.emit(PropertyChanged {
            source: self.source,
            property: property.map(str::to_string),
        });
    }
}

impl std::fmt::Debug for Observable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observable")
            .field("source", &self.source)
            .field("is_modified", &self.is_modified())
            .field("has_notified", &self.has_notified_property_changed())
            .field("notify_enabled", &self.notify_property_changed_enabled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn record(observable: &Observable) -> Arc<Mutex<Vec<Option<String>>>> {
        let events = Arc::new(Mutex::new(Vec::new()));
        let events_clone = events.clone();
        observable.property_changed().connect(move |event| {
            events_clone.lock().push(event.property.clone());
        });
        events
    }

    fn names(events: &[Option<String>]) -> Vec<&str> {
        events.iter().map(|e| e.as_deref().unwrap_or("*")).collect()
    }

    #[test]
    fn first_change_emits_modified_property_and_latch() {
        let observable = Observable::new(ModelId::next());
        let events = record(&observable);

        observable.notify_property_changed("Name");

        assert!(observable.is_modified());
        assert!(observable.has_notified_property_changed());
        assert_eq!(
            names(&events.lock()),
            vec![IS_MODIFIED, "Name", HAS_NOTIFIED_PROPERTY_CHANGED]
        );
    }

    #[test]
    fn later_changes_do_not_relatch() {
        let observable = Observable::new(ModelId::next());
        observable.notify_property_changed("Name");
        let events = record(&observable);

        observable.notify_property_changed("Age");
        assert_eq!(names(&events.lock()), vec![IS_MODIFIED, "Age"]);
    }

    #[test]
    fn announcing_is_modified_is_a_no_op() {
        let observable = Observable::new(ModelId::next());
        let events = record(&observable);

        observable.notify_property_changed(IS_MODIFIED);

        assert!(events.lock().is_empty());
        assert!(!observable.is_modified());
        assert!(!observable.has_notified_property_changed());
    }

    #[test]
    fn ignored_names_do_not_mark_modified() {
        let observable = Observable::new(ModelId::next());
        observable.ignore_modified("SelectedTab");
        let events = record(&observable);

        observable.notify_property_changed(IS_VALID);
        observable.notify_property_changed("SelectedTab");

        assert!(!observable.is_modified());
        assert_eq!(
            names(&events.lock()),
            vec![IS_VALID, HAS_NOTIFIED_PROPERTY_CHANGED, "SelectedTab"]
        );
    }

    #[test]
    fn disabled_notifications_still_track_state() {
        let observable = Observable::new(ModelId::next());
        observable.set_notify_property_changed_enabled(false);
        let events = record(&observable);

        observable.notify_property_changed("Name");
        assert!(observable.is_modified());
        assert!(!observable.has_notified_property_changed());
        assert!(events.lock().is_empty());

        observable.set_notify_property_changed_enabled(true);
        observable.notify_property_changed("Name");
        assert_eq!(
            names(&events.lock()),
            vec![IS_MODIFIED, "Name", HAS_NOTIFIED_PROPERTY_CHANGED]
        );
    }

    #[test]
    fn refresh_marks_modified() {
        let observable = Observable::new(ModelId::next());
        let events = record(&observable);

        observable.notify_all_properties_changed();

        assert!(observable.is_modified());
        assert_eq!(
            names(&events.lock()),
            vec![IS_MODIFIED, "*", HAS_NOTIFIED_PROPERTY_CHANGED]
        );
    }

    #[test]
    fn first_set_modified_latches_has_notified() {
        let observable = Observable::new(ModelId::next());
        let events = record(&observable);

        observable.set_modified(true);
        observable.set_modified(false);

        assert!(observable.has_notified_property_changed());
        assert_eq!(
            names(&events.lock()),
            vec![IS_MODIFIED, HAS_NOTIFIED_PROPERTY_CHANGED, IS_MODIFIED]
        );
    }

    #[test]
    fn set_modified_while_disabled_does_not_latch() {
        let observable = Observable::new(ModelId::next());
        observable.set_notify_property_changed_enabled(false);

        observable.set_modified(true);

        assert!(observable.is_modified());
        assert!(!observable.has_notified_property_changed());
    }

    #[test]
    fn set_modified_resets_and_announces() {
        let observable = Observable::new(ModelId::next());
        observable.notify_property_changed("Name");
        let events = record(&observable);

        observable.set_modified(false);
        assert!(!observable.is_modified());
        assert_eq!(names(&events.lock()), vec![IS_MODIFIED]);
    }

    #[test]
    fn set_property_announces_only_real_changes() {
        let observable = Observable::new(ModelId::next());
        let name = Property::new(String::from("Ada"));
        let events = record(&observable);

        assert!(!observable.set_property(&name, "Ada".to_string(), "Name"));
        assert!(events.lock().is_empty());

        assert!(observable.set_property(&name, "Grace".to_string(), "Name"));
        assert_eq!(name.get(), "Grace");
        assert!(names(&events.lock()).contains(&"Name"));
    }

    #[test]
    fn connect_property_filters_by_name() {
        let observable = Observable::new(ModelId::next());
        let hits = Arc::new(Mutex::new(0));

        let hits_clone = hits.clone();
        observable.connect_property("Age", move |event| {
            assert_eq!(event.property.as_deref(), Some("Age"));
            *hits_clone.lock() += 1;
        });

        observable.notify_property_changed("Name");
        observable.notify_property_changed("Age");
        observable.notify_all_properties_changed();

        assert_eq!(*hits.lock(), 1);
    }
}
