//! # Dataset Loading
//!
//! The data-loading collaborator of the dashboard: reads the salary CSV into
//! a well-typed `Vec<SalaryRecord>` and resolves where that file lives on
//! disk.
//!
//! A malformed file fails fast here, at load time, so the analytics layer
//! can assume a well-formed table and never propagates partial results.

// Declare the modules that constitute this crate.
pub mod error;
pub mod loader;
pub mod paths;

// Re-export the key components to create a clean, public-facing API.
pub use error::DatasetError;
pub use loader::load_records;
pub use paths::{resolve_app_dir, resolve_data_path};
