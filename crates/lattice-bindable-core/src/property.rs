//! Change-detecting property storage.
//!
//! [`Property<T>`] is the value slot a bindable model keeps for each bound
//! field. It does not notify anyone by itself: `set()` reports whether the
//! value actually changed, and the owning model decides what to announce.
//!
//! # Example
//!
//! ```
//! use lattice_bindable_core::{Property, Signal};
//!
//! struct Counter {
//!     value: Property<i32>,
//!     value_changed: Signal<i32>,
//! }
//!
//! impl Counter {
//!     fn set_value(&self, new_value: i32) {
//!         if self.value.set(new_value) {
//!             self.value_changed.emit(new_value);
//!         }
//!     }
//! }
//!
//! let counter = Counter { value: Property::new(0), value_changed: Signal::new() };
//! counter.set_value(3);
//! assert_eq!(counter.value.get(), 3);
//! ```

use std::fmt;

use parking_lot::RwLock;

/// A value cell for one bound model field.
///
/// Readers get a clone of the value. Writers go through [`set`](Self::set),
/// which only writes when the value differs, or through
/// [`set_silent`](Self::set_silent) while loading.
///
/// ```
/// use lattice_bindable_core::Property;
///
/// let age = Property::new(Some(36));
/// assert!(!age.set(Some(36)));
/// assert!(age.set(None));
/// assert_eq!(age.get(), None);
/// ```
pub struct Property<T> {
    value: RwLock<T>,
}

impl<T: Clone> Property<T> {
    /// Create a cell holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// A clone of the current value.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Overwrite the value without reporting a change.
    ///
    /// Used when loading a model, where the new state must not mark it dirty.
    pub fn set_silent(&self, value: T) {
        *self.value.write() = value;
    }
}

impl<T: Clone + PartialEq> Property<T> {
    /// Store `value` if it differs from the current one.
    ///
    /// Returns `true` if the cell was written.
    pub fn set(&self, value: T) -> bool {
        let mut current = self.value.write();
        if *current == value {
            return false;
        }
        *current = value;
        true
    }
}

impl<T: Clone + Default> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Property").field(&*self.value.read()).finish()
    }
}
