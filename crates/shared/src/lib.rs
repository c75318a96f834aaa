//! Shared types and configuration for Sitebook.
//!
//! This crate provides common types used across all other crates:
//! - Amount display helper (decimal, never float)
//! - Record identifiers and the acting identity
//! - Pagination types for list endpoints
//! - Configuration management

pub mod config;
pub mod types;

pub use config::AppConfig;
pub use types::{Actor, new_record_id};
