//! # Paylens Analytics Engine
//!
//! This crate turns a raw table of salary records into the metrics and
//! chart-ready tables the dashboard shell renders. It acts as the single
//! source of truth for every number shown to the user.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of
//!   external systems. It depends only on `core-types` (Layer 0) and the
//!   `countries` reference table.
//! - **Stateless Calculation:** The `DashboardEngine` is a stateless
//!   calculator. It takes the raw dataset and a filter selection as input and
//!   produces a `DashboardReport` as output, never mutating the raw data.
//!   This makes it highly reliable and easy to test.
//!
//! ## Public API
//!
//! - `DashboardEngine`: The main struct that contains the calculation logic.
//! - `DashboardReport`: The standardized struct that bundles the KPI scalars
//!   with the five chart tables.
//! - `AnalyticsError`: The specific error types that can be returned from
//!   this crate.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::{DashboardEngine, ReportParams};
pub use error::AnalyticsError;
pub use report::{
    CountrySalary, DashboardReport, HistogramBin, KpiBundle, RemoteModeCount, RoleSalary,
    YearSalary,
};
