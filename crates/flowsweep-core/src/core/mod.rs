//! # Core Module
//!
//! This module provides the fundamental building blocks for parametric process
//! screening: the case and result data model, and the report exporter.
//!
//! ## Architecture
//!
//! - **Case and Result Model** ([`models`]) - Case specifications, per-case result
//!   records, and the ordered result collection of one sweep run.
//! - **Report Export** ([`report`]) - Serialization of heterogeneous case results
//!   into a single delimited table with a union-of-columns schema.
//!
//! Everything here is plain data with no dependency on any particular simulation
//! engine; the engine boundary lives in [`crate::engine`].

pub mod models;
pub mod report;
