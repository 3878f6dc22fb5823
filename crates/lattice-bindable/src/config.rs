//! Model configuration.

use std::fmt;
use std::sync::Arc;

use crate::model::BindableModel;
use crate::validation::RuleEngine;

/// Separator used by [`BindableModel::error_text`] unless configured.
pub const DEFAULT_ERROR_SEPARATOR: &str = ",";

/// Configuration for a [`BindableModel`].
#[derive(Clone)]
pub struct ModelConfig {
    /// Emit property-changed notifications.
    pub notify_property_changed: bool,
    /// Emit errors-changed notifications.
    pub notify_errors_changed: bool,
    /// Extra property names that never mark the model modified.
    pub ignored_properties: Vec<String>,
    /// Separator placed between messages in error text.
    pub error_separator: String,
    /// Declarative rule engine. `None` means no property carries rules.
    pub rules: Option<Arc<dyn RuleEngine>>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            notify_property_changed: true,
            notify_errors_changed: true,
            ignored_properties: Vec::new(),
            error_separator: DEFAULT_ERROR_SEPARATOR.to_string(),
            rules: None,
        }
    }
}

impl fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelConfig")
            .field("notify_property_changed", &self.notify_property_changed)
            .field("notify_errors_changed", &self.notify_errors_changed)
            .field("ignored_properties", &self.ignored_properties)
            .field("error_separator", &self.error_separator)
            .field("has_rules", &self.rules.is_some())
            .finish()
    }
}

impl ModelConfig {
    /// Create a configuration using the given rule engine.
    pub fn with_rules(rules: impl RuleEngine + 'static) -> Self {
        Self {
            rules: Some(Arc::new(rules)),
            ..Default::default()
        }
    }
}

/// Builder for creating models with custom configuration.
#[derive(Debug, Default)]
pub struct ModelBuilder {
    config: ModelConfig,
}

impl ModelBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the declarative rule engine.
    pub fn rules(mut self, rules: impl RuleEngine + 'static) -> Self {
        self.config.rules = Some(Arc::new(rules));
        self
    }

    /// Share an existing rule engine, e.g. one per model type.
    pub fn shared_rules(mut self, rules: Arc<dyn RuleEngine>) -> Self {
        self.config.rules = Some(rules);
        self
    }

    /// Enable or disable property-changed notifications.
    pub fn notify_property_changed(mut self, enabled: bool) -> Self {
        self.config.notify_property_changed = enabled;
        self
    }

    /// Enable or disable errors-changed notifications.
    pub fn notify_errors_changed(mut self, enabled: bool) -> Self {
        self.config.notify_errors_changed = enabled;
        self
    }

    /// Exclude a property from modified tracking.
    pub fn ignore_modified(mut self, property: impl Into<String>) -> Self {
        self.config.ignored_properties.push(property.into());
        self
    }

    /// Set the separator used when joining a property's messages.
    pub fn error_separator(mut self, separator: impl Into<String>) -> Self {
        self.config.error_separator = separator.into();
        self
    }

    /// Build the model.
    pub fn build(self) -> BindableModel {
        BindableModel::with_config(self.config)
    }
}
