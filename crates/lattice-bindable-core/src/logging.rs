//! Logging facilities for Lattice Bindable.
//!
//! Lattice Bindable uses the `tracing` crate for instrumentation. Nothing is
//! printed unless the application installs a subscriber:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("lattice_bindable=trace")
//!     .init();
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "lattice_bindable_core::signal";
    /// Property change announcements.
    pub const PROPERTY: &str = "lattice_bindable::property";
    /// Error ledger mutations.
    pub const LEDGER: &str = "lattice_bindable::ledger";
    /// Declarative validation.
    pub const VALIDATION: &str = "lattice_bindable::validation";
}
