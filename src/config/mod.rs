//! Configuration module for the search presenter
//!
//! This module provides the `PresenterConfig` struct and its builder
//! with validation and sensible defaults.

// Sub-modules
pub mod builder;
pub mod getters;
pub mod types;

// Re-exports for public API
pub use builder::PresenterConfigBuilder;
pub use types::PresenterConfig;
