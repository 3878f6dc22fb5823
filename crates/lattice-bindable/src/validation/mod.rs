//! Declarative validation.
//!
//! A model does not inspect its own fields. Instead it is given a
//! [`RuleEngine`] at construction time, which answers two questions: which
//! properties carry rules, and whether a given value satisfies the rules of a
//! property. [`ValidationRules`] is the engine shipped with the crate: an
//! explicit registry of `(property, rule)` pairs built once per model type.
//!
//! # Example
//!
//! ```
//! use lattice_bindable::validation::{Length, Range, Required, ValidationRules, Value};
//! use lattice_bindable::validation::RuleEngine;
//!
//! # fn main() -> lattice_bindable::Result<()> {
//! let rules = ValidationRules::builder()
//!     .rule("Name", Required::new())
//!     .rule("Name", Length::max(40))
//!     .rule("Age", Range::new(0.0, 150.0)?)
//!     .build()?;
//!
//! assert!(rules.validate("Age", &Value::Int(42)).is_valid());
//! assert!(!rules.validate("Name", &Value::Null).is_valid());
//! # Ok(())
//! # }
//! ```

mod rules;
mod value;

use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};

pub use rules::{Custom, Length, Pattern, Range, Required, ValidationRule};
pub use value::Value;

/// The outcome of validating one value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Validation {
    /// The value satisfies every rule.
    #[default]
    Valid,
    /// The value was rejected; messages are in rule order.
    Invalid(Vec<String>),
}

impl Validation {
    /// Returns `true` if the value was accepted.
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid)
    }

    /// The rejection messages; empty when valid.
    pub fn messages(&self) -> &[String] {
        match self {
            Validation::Valid => &[],
            Validation::Invalid(messages) => messages,
        }
    }

    /// Consume the outcome, returning its messages.
    pub fn into_messages(self) -> Vec<String> {
        match self {
            Validation::Valid => Vec::new(),
            Validation::Invalid(messages) => messages,
        }
    }
}

/// Source of declarative validation for a model.
///
/// Implementations must be `Send + Sync` so a single engine can be shared by
/// every instance of a model type.
pub trait RuleEngine: Send + Sync {
    /// Returns `true` if `property` carries at least one rule.
    fn has_rules(&self, property: &str) -> bool;

    /// Every property carrying rules, in declaration order.
    fn validated_properties(&self) -> Vec<String>;

    /// Validate `value` against the rules of `property`.
    ///
    /// Properties without rules always validate.
    fn validate(&self, property: &str, value: &Value) -> Validation;
}

impl<E: RuleEngine + ?Sized> RuleEngine for Arc<E> {
    fn has_rules(&self, property: &str) -> bool {
        (**self).has_rules(property)
    }

    fn validated_properties(&self) -> Vec<String> {
        (**self).validated_properties()
    }

    fn validate(&self, property: &str, value: &Value) -> Validation {
        (**self).validate(property, value)
    }
}

impl<E: RuleEngine + ?Sized> RuleEngine for Box<E> {
    fn has_rules(&self, property: &str) -> bool {
        (**self).has_rules(property)
    }

    fn validated_properties(&self) -> Vec<String> {
        (**self).validated_properties()
    }

    fn validate(&self, property: &str, value: &Value) -> Validation {
        (**self).validate(property, value)
    }
}

/// Supplies the current value of a model property by name.
///
/// Used by [`BindableModel::validate_model`](crate::BindableModel::validate_model)
/// to read every validated property.
pub trait PropertySource {
    /// The current value of `property`, or [`Value::Null`] if unknown.
    fn property_value(&self, property: &str) -> Value;
}

impl<F> PropertySource for F
where
    F: Fn(&str) -> Value,
{
    fn property_value(&self, property: &str) -> Value {
        self(property)
    }
}

struct PropertyRules {
    property: String,
    rules: Vec<Arc<dyn ValidationRule>>,
}

/// Registry of validation rules keyed by property name.
///
/// Rules of a property run in the order they were registered, except that
/// required rules always run first: if one fails, its message is the only
/// one reported.
#[derive(Default)]
pub struct ValidationRules {
    properties: Vec<PropertyRules>,
}

impl ValidationRules {
    /// Start declaring rules.
    pub fn builder() -> ValidationRulesBuilder {
        ValidationRulesBuilder::default()
    }

    /// The rules registered for `property`.
    pub fn rules_for(&self, property: &str) -> &[Arc<dyn ValidationRule>] {
        self.properties
            .iter()
            .find(|entry| entry.property == property)
            .map(|entry| entry.rules.as_slice())
            .unwrap_or_default()
    }

    /// Number of properties carrying rules.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Returns `true` if no rules are registered.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl RuleEngine for ValidationRules {
    fn has_rules(&self, property: &str) -> bool {
        !self.rules_for(property).is_empty()
    }

    fn validated_properties(&self) -> Vec<String> {
        self.properties
            .iter()
            .map(|entry| entry.property.clone())
            .collect()
    }

    fn validate(&self, property: &str, value: &Value) -> Validation {
        let rules = self.rules_for(property);

        for rule in rules.iter().filter(|rule| rule.is_required()) {
            if let Err(message) = rule.check(property, value) {
                return Validation::Invalid(vec![message]);
            }
        }

        let messages: Vec<String> = rules
            .iter()
            .filter(|rule| !rule.is_required())
            .filter_map(|rule| rule.check(property, value).err())
            .collect();

        if messages.is_empty() {
            Validation::Valid
        } else {
            Validation::Invalid(messages)
        }
    }
}

impl fmt::Debug for ValidationRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.properties
                    .iter()
                    .map(|entry| (&entry.property, entry.rules.len())),
            )
            .finish()
    }
}

/// Builder for [`ValidationRules`].
#[derive(Default)]
pub struct ValidationRulesBuilder {
    rules: Vec<(String, Arc<dyn ValidationRule>)>,
}

impl ValidationRulesBuilder {
    /// Register `rule` for `property`.
    pub fn rule(self, property: impl Into<String>, rule: impl ValidationRule + 'static) -> Self {
        self.shared_rule(property, Arc::new(rule))
    }

    /// Register an already shared rule for `property`.
    pub fn shared_rule(mut self, property: impl Into<String>, rule: Arc<dyn ValidationRule>) -> Self {
        self.rules.push((property.into(), rule));
        self
    }

    /// Build the registry.
    ///
    /// Fails if a rule was registered with an empty property name.
    pub fn build(self) -> Result<ValidationRules> {
        let mut properties: Vec<PropertyRules> = Vec::new();
        for (property, rule) in self.rules {
            if property.is_empty() {
                return Err(Error::EmptyPropertyName);
            }
            match properties.iter_mut().find(|entry| entry.property == property) {
                Some(entry) => entry.rules.push(rule),
                None => properties.push(PropertyRules {
                    property,
                    rules: vec![rule],
                }),
            }
        }
        Ok(ValidationRules { properties })
    }
}
