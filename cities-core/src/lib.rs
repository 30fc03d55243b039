//! Core library for the `cities` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The HTTP client for the login and city listing endpoints
//! - Row sink and notifier abstractions used for rendering
//! - The `CityListLoader` workflow tying them together
//!
//! It is used by `cities-cli`, but can also be reused by other binaries or services.

pub mod client;
pub mod config;
pub mod error;
pub mod loader;
pub mod model;
pub mod notify;
pub mod sink;

pub use client::{CityApi, HttpCityApi};
pub use config::{Config, RenderMode};
pub use error::LoadError;
pub use loader::{
    CityListLoader, EMPTY_PLACEHOLDER, LoadOutcome, LoaderOptions, UNAVAILABLE_MESSAGE,
};
pub use model::{City, Credentials, SessionToken};
pub use notify::{Notifier, StderrNotifier};
pub use sink::{HtmlTable, RowSink};
