//! Productdesk Core Library
//!
//! This crate provides the domain models, error types, configuration and
//! collaborator traits shared by the API client, the product form and the CLI.

pub mod config;
pub mod error;
pub mod hooks;
pub mod models;

// Re-export commonly used types
pub use config::ClientConfig;
pub use error::{LogLevel, SubmitError};
pub use hooks::{Navigator, Notifier, PortfolioApi, ProductApi, Severity};
