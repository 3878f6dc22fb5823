//! Built-in validation rules.
//!
//! Default messages follow the wording of data-annotation validators, with
//! `{0}` standing for the property name. Every rule accepts a custom message
//! through `with_message`, which may use the same placeholder.

use std::fmt;

use regex::Regex;

use super::Value;
use crate::error::{Error, Result};

/// A single validation rule attached to a property.
pub trait ValidationRule: Send + Sync {
    /// Check `value`, returning the failure message on rejection.
    fn check(&self, property: &str, value: &Value) -> std::result::Result<(), String>;

    /// Required rules run before all others and stop validation on failure.
    fn is_required(&self) -> bool {
        false
    }
}

fn format_message(template: &str, property: &str) -> String {
    template.replace("{0}", property)
}

/// Rejects missing values and, by default, blank text.
#[derive(Debug, Clone, Default)]
pub struct Required {
    allow_empty_strings: bool,
    message: Option<String>,
}

impl Required {
    /// Create a required rule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept empty and whitespace-only text.
    pub fn allow_empty_strings(mut self) -> Self {
        self.allow_empty_strings = true;
        self
    }

    /// Replace the default message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl ValidationRule for Required {
    fn check(&self, property: &str, value: &Value) -> std::result::Result<(), String> {
        let missing = match value {
            Value::Null => true,
            Value::Text(text) => !self.allow_empty_strings && text.trim().is_empty(),
            _ => false,
        };
        if !missing {
            return Ok(());
        }
        Err(match &self.message {
            Some(message) => format_message(message, property),
            None => format!("The {property} field is required."),
        })
    }

    fn is_required(&self) -> bool {
        true
    }
}

/// Bounds the number of characters of a value's text.
///
/// Missing values pass; combine with [`Required`] to reject them.
#[derive(Debug, Clone)]
pub struct Length {
    minimum: usize,
    maximum: usize,
    message: Option<String>,
}

impl Length {
    /// Accept between `minimum` and `maximum` characters, inclusive.
    pub fn new(minimum: usize, maximum: usize) -> Result<Self> {
        if minimum > maximum {
            return Err(Error::InvalidLength { minimum, maximum });
        }
        Ok(Self {
            minimum,
            maximum,
            message: None,
        })
    }

    /// Accept at most `maximum` characters.
    pub fn max(maximum: usize) -> Self {
        Self {
            minimum: 0,
            maximum,
            message: None,
        }
    }

    /// Replace the default message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl ValidationRule for Length {
    fn check(&self, property: &str, value: &Value) -> std::result::Result<(), String> {
        if value.is_null() {
            return Ok(());
        }
        let length = value.to_string().chars().count();
        if (self.minimum..=self.maximum).contains(&length) {
            return Ok(());
        }
        Err(match &self.message {
            Some(message) => format_message(message, property),
            None if self.minimum == 0 => format!(
                "The field {property} must be a string with a maximum length of {}.",
                self.maximum
            ),
            None => format!(
                "The field {property} must be a string with a minimum length of {} and a maximum length of {}.",
                self.minimum, self.maximum
            ),
        })
    }
}

/// Bounds a numeric value, inclusive on both ends.
///
/// Missing values pass. Text is parsed as a number; text that does not parse
/// is rejected.
#[derive(Debug, Clone)]
pub struct Range {
    minimum: f64,
    maximum: f64,
    message: Option<String>,
}

impl Range {
    /// Accept numbers in `minimum..=maximum`.
    pub fn new(minimum: f64, maximum: f64) -> Result<Self> {
        if minimum.is_nan() || maximum.is_nan() || minimum > maximum {
            return Err(Error::InvalidRange { minimum, maximum });
        }
        Ok(Self {
            minimum,
            maximum,
            message: None,
        })
    }

    /// Replace the default message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl ValidationRule for Range {
    fn check(&self, property: &str, value: &Value) -> std::result::Result<(), String> {
        if value.is_null() {
            return Ok(());
        }
        if value
            .as_f64()
            .is_some_and(|n| n >= self.minimum && n <= self.maximum)
        {
            return Ok(());
        }
        Err(match &self.message {
            Some(message) => format_message(message, property),
            None => format!(
                "The field {property} must be between {} and {}.",
                self.minimum, self.maximum
            ),
        })
    }
}

/// Requires the whole text of a value to match a regular expression.
///
/// Missing values and empty text pass.
#[derive(Debug, Clone)]
pub struct Pattern {
    pattern: String,
    regex: Regex,
    message: Option<String>,
}

impl Pattern {
    /// Compile `pattern`. The match is anchored at both ends.
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        let regex = Regex::new(&format!("^(?:{pattern})$"))
            .map_err(|source| Error::invalid_pattern(pattern.clone(), source))?;
        Ok(Self {
            pattern,
            regex,
            message: None,
        })
    }

    /// The pattern as given, without anchors.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Replace the default message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl ValidationRule for Pattern {
    fn check(&self, property: &str, value: &Value) -> std::result::Result<(), String> {
        let text = value.to_string();
        if text.is_empty() || self.regex.is_match(&text) {
            return Ok(());
        }
        Err(match &self.message {
            Some(message) => format_message(message, property),
            None => format!(
                "The field {property} must match the regular expression '{}'.",
                self.pattern
            ),
        })
    }
}

/// A rule backed by a predicate.
///
/// The predicate sees every value, including [`Value::Null`].
pub struct Custom<F> {
    predicate: F,
    message: String,
}

impl<F> Custom<F>
where
    F: Fn(&Value) -> bool + Send + Sync,
{
    /// Reject values for which `predicate` returns `false` with `message`.
    pub fn new(message: impl Into<String>, predicate: F) -> Self {
        Self {
            predicate,
            message: message.into(),
        }
    }
}

impl<F> ValidationRule for Custom<F>
where
    F: Fn(&Value) -> bool + Send + Sync,
{
    fn check(&self, property: &str, value: &Value) -> std::result::Result<(), String> {
        if (self.predicate)(value) {
            Ok(())
        } else {
            Err(format_message(&self.message, property))
        }
    }
}

impl<F> fmt::Debug for Custom<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Custom")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_rejects_null_and_blank_text() {
        let rule = Required::new();
        assert_eq!(
            rule.check("Age", &Value::Null),
            Err("The Age field is required.".to_string())
        );
        assert!(rule.check("Name", &Value::from("  ")).is_err());
        assert!(rule.check("Name", &Value::from("Ada")).is_ok());
        assert!(rule.check("Count", &Value::Int(0)).is_ok());

        let lenient = Required::new().allow_empty_strings();
        assert!(lenient.check("Name", &Value::from("")).is_ok());
        assert!(lenient.check("Name", &Value::Null).is_err());
    }

    #[test]
    fn length_bounds_and_messages() {
        let rule = Length::max(3);
        assert!(rule.check("Code", &Value::from("abc")).is_ok());
        assert_eq!(
            rule.check("Code", &Value::from("abcd")),
            Err("The field Code must be a string with a maximum length of 3.".to_string())
        );
        assert!(rule.check("Code", &Value::Null).is_ok());

        let rule = Length::new(2, 4).unwrap();
        assert_eq!(
            rule.check("Name", &Value::from("a")),
            Err(
                "The field Name must be a string with a minimum length of 2 and a maximum length of 4."
                    .to_string()
            )
        );
        // Characters, not bytes.
        assert!(rule.check("Name", &Value::from("ééé")).is_ok());

        assert!(matches!(
            Length::new(5, 1),
            Err(Error::InvalidLength { minimum: 5, maximum: 1 })
        ));
    }

    #[test]
    fn range_accepts_numbers_and_numeric_text() {
        let rule = Range::new(0.0, 150.0).unwrap();
        assert!(rule.check("Age", &Value::Int(42)).is_ok());
        assert!(rule.check("Age", &Value::from("42")).is_ok());
        assert!(rule.check("Age", &Value::Null).is_ok());
        assert_eq!(
            rule.check("Age", &Value::Int(200)),
            Err("The field Age must be between 0 and 150.".to_string())
        );
        assert!(rule.check("Age", &Value::from("old")).is_err());
        assert!(Range::new(2.0, 1.0).is_err());
        assert!(Range::new(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn pattern_matches_whole_text() {
        let rule = Pattern::new("[0-9]{3}").unwrap();
        assert!(rule.check("Zip", &Value::from("123")).is_ok());
        assert!(rule.check("Zip", &Value::from("1234")).is_err());
        assert!(rule.check("Zip", &Value::from("")).is_ok());
        assert_eq!(
            rule.check("Zip", &Value::from("ab")),
            Err("The field Zip must match the regular expression '[0-9]{3}'.".to_string())
        );
        assert_eq!(rule.pattern(), "[0-9]{3}");
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        let err = Pattern::new("(").unwrap_err();
        assert!(err.to_string().starts_with("Invalid pattern '('"));
    }

    #[test]
    fn custom_messages_substitute_property_name() {
        let rule = Required::new().with_message("{0} cannot be empty");
        assert_eq!(
            rule.check("Email", &Value::Null),
            Err("Email cannot be empty".to_string())
        );

        let even = Custom::new("{0} must be even", |value: &Value| {
            value.as_f64().is_some_and(|n| n % 2.0 == 0.0)
        });
        assert!(even.check("Count", &Value::Int(4)).is_ok());
        assert_eq!(
            even.check("Count", &Value::Int(3)),
            Err("Count must be even".to_string())
        );
    }
}
