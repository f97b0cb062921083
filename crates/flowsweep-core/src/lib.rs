//! # Flowsweep Core Library
//!
//! Orchestration of an external process-simulation engine across parameter
//! grids: flowsheet construction, per-case parameter injection, isolated
//! case execution, and aggregation of results into a tabular report.
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict three-layer architecture to ensure a clear
//! separation of concerns, making it modular, testable, and extensible.
//!
//! - **[`core`]: The Foundation.** Contains the stateless data model (`CaseSpec`,
//!   `CaseResult`, `ResultSet`) and the CSV report exporter.
//!
//! - **[`engine`]: The Logic Core.** This stateful layer talks to the external
//!   simulation engine through a narrow adapter interface. It includes the sweep
//!   configuration, grid enumeration, flowsheet builder, case runner, progress
//!   reporting, and a deterministic stub engine for testing and dry runs.
//!
//! - **[`workflows`]: The Public API.** This is the highest-level, user-facing layer.
//!   It ties the `engine` and `core` together to execute a complete parametric sweep,
//!   providing a simple and powerful entry point for end-users of the library.

pub mod core;
pub mod engine;
pub mod workflows;
