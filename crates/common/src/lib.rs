//! Shared utilities, configuration, and error handling for Ally
//!
//! This crate provides common functionality used across the Ally application:
//! - Configuration management following 12-factor principles
//! - Error types and handling
//! - Custom axum extractors
//! - The upstream response-shape normalizer

pub mod config;
pub mod error;
pub mod extractors;
pub mod shape;
pub mod state;

pub use config::Config;
pub use error::{Error, Result};
pub use extractors::{ListQuery, ValidatedJson};
pub use shape::{extract_field, extract_outputs};
pub use state::StateError;
