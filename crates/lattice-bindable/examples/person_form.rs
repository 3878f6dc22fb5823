//! Lattice Bindable person form example
//!
//! Simulates a form bound to a `Person` model: every keystroke goes through a
//! validating setter, the "UI" prints change and error notifications, and the
//! save button is only enabled while the model is valid and modified.
//!
//! Run with: RUST_LOG=lattice_bindable=trace cargo run -p lattice-bindable --example person_form

use std::sync::Arc;

use lattice_bindable::prelude::*;
use tracing_subscriber::EnvFilter;

struct Person {
    base: BindableModel,
    name: Property<String>,
    email: Property<String>,
    age: Property<Option<i32>>,
}

impl Person {
    fn new(rules: Arc<dyn RuleEngine>) -> Self {
        Self {
            base: BindableModel::builder().shared_rules(rules).build(),
            name: Property::default(),
            email: Property::default(),
            age: Property::new(None),
        }
    }

    fn set_name(&self, name: &str) {
        if self.base.validate_property("Name", name) {
            self.base.set_property(&self.name, name.to_string(), "Name");
        }
    }

    fn set_email(&self, email: &str) {
        if self.base.validate_property("Email", email) {
            self.base.set_property(&self.email, email.to_string(), "Email");
        }
    }

    /// Text typed into the age box; conversion failures are binding errors.
    fn set_age_text(&self, text: &str) {
        self.base.clear_binding_errors("Age");
        match text.trim().parse::<i32>() {
            Ok(age) => {
                if self.base.validate_property("Age", age) {
                    self.base.set_property(&self.age, Some(age), "Age");
                }
            }
            Err(_) => self.base.add_unique_error(
                "Age",
                &format!("Value '{text}' could not be converted."),
                RuleKind::Binding,
            ),
        }
    }

    fn can_save(&self) -> bool {
        self.base.is_valid() && self.base.is_modified()
    }
}

impl PropertySource for Person {
    fn property_value(&self, property: &str) -> Value {
        match property {
            "Name" => self.name.get().into(),
            "Email" => self.email.get().into(),
            "Age" => self.age.get().into(),
            _ => Value::Null,
        }
    }
}

fn person_rules() -> lattice_bindable::Result<ValidationRules> {
    ValidationRules::builder()
        .rule("Name", Required::new())
        .rule("Name", Length::new(2, 40)?)
        .rule("Email", Required::new())
        .rule(
            "Email",
            Pattern::new(r"[^@\s]+@[^@\s]+\.[a-z]{2,}")?
                .with_message("{0} is not a valid e-mail address."),
        )
        .rule("Age", Required::new())
        .rule("Age", Range::new(0.0, 150.0)?)
        .build()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let rules: Arc<dyn RuleEngine> = Arc::new(person_rules()?);
    let person = Person::new(rules);

    person.base.property_changed().connect(|event| match &event.property {
        Some(property) => println!("[ui] {} changed: {property}", event.source),
        None => println!("[ui] {} refresh all bindings", event.source),
    });
    person.base.errors_changed().connect(|event| {
        println!("[ui] {} errors of {} changed", event.source, event.property);
    });

    // Loading a form validates everything, then starts from a clean state.
    person.base.validate_model(&person);
    person.base.set_modified(false);
    println!("after load: valid={} summary={:?}", person.base.is_valid(), person.base.error_summary());

    person.set_name("A");
    println!("name error: {:?}", person.base.error_text("Name"));
    person.set_name("Ada Lovelace");

    person.set_email("ada@analytical");
    println!("email error: {:?}", person.base.error_text("Email"));
    person.set_email("ada@analytical.org");

    person.set_age_text("thirty-six");
    println!("age error: {:?}", person.base.error_text("Age"));
    person.set_age_text("36");

    println!("can save: {}", person.can_save());
    person.base.set_modified(false);
    println!("after save: can save = {}", person.can_save());

    Ok(())
}
