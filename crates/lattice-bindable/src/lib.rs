//! Observable, self-validating data models for UI binding.
//!
//! This crate provides the model side of a binding layer:
//!
//! - **Change Notification**: a property-changed channel plus derived
//!   `is_modified` / `has_notified_property_changed` flags
//! - **Error Ledger**: ordered per-property error lists with the rule kind of
//!   every message, a derived `is_valid` signal and an errors-changed channel
//! - **Declarative Validation**: an explicit rule registry that setters and
//!   whole-model checks run against
//!
//! # Example
//!
//! ```
//! use lattice_bindable::prelude::*;
//!
//! let model = BindableModel::new();
//!
//! model.errors_changed().connect(|event| {
//!     println!("errors of {} changed", event.property);
//! });
//!
//! model.add_error("Email", "Address already registered", RuleKind::Manual);
//! assert!(!model.is_valid());
//! assert_eq!(model.error_text("Email").as_deref(), Some("Address already registered"));
//!
//! model.clear_errors("Email");
//! assert!(model.is_valid());
//! ```

pub mod config;
mod error;
pub mod event;
pub mod ledger;
mod model;
pub mod observable;
pub mod validation;

pub use config::{ModelBuilder, ModelConfig};
pub use error::{Error, Result};
pub use event::{ErrorsChanged, ModelId, PropertyChanged};
pub use ledger::{ErrorLedger, PropertyErrors, RuleKind};
pub use model::BindableModel;
pub use observable::{HAS_NOTIFIED_PROPERTY_CHANGED, IS_MODIFIED, IS_VALID, Observable};

pub use lattice_bindable_core::{ConnectionGuard, ConnectionId, Property, Signal};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::event::{ErrorsChanged, ModelId, PropertyChanged};
    pub use crate::ledger::RuleKind;
    pub use crate::model::BindableModel;
    pub use crate::observable::{HAS_NOTIFIED_PROPERTY_CHANGED, IS_MODIFIED, IS_VALID};
    pub use crate::validation::{
        Custom, Length, Pattern, PropertySource, Range, Required, RuleEngine, Validation,
        ValidationRule, ValidationRules, Value,
    };
    pub use lattice_bindable_core::{Property, Signal};
}
