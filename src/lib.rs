//! Core library surface for the Roster Manager TUI application.
//!
//! The rosters (`roster`) are plain in-memory stores with report helpers and
//! know nothing about the terminal; the `ui` module is one caller of them.
pub mod config;
pub mod error;
pub mod models;
pub mod numeric;
pub mod roster;
pub mod telemetry;
pub mod ui;

// Tracing target constants
pub const TRACING_TARGET_STORE: &str = "roster_manager::store";
pub const TRACING_TARGET_UI: &str = "roster_manager::ui";
pub const TRACING_TARGET_STARTUP: &str = "roster_manager::startup";

/// Configuration and error types used by `main.rs`.
pub use config::{Cli, RosterKind, Settings};
pub use error::RosterError;

/// The two record types the rosters manage.
pub use models::{Employee, RecordId, Student};

/// Generic store and the view selection it exposes.
pub use roster::{Record, Selection, Store};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
