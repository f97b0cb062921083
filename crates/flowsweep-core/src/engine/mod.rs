//! # Engine Module
//!
//! This module implements the orchestration layer between the sweep workflow and
//! the external process-simulation engine.
//!
//! ## Overview
//!
//! The engine module owns everything stateful about a sweep: it enumerates the
//! case grid, constructs one fresh flowsheet per case through the adapter
//! boundary, applies case parameters, triggers the engine's solve step, and
//! extracts the fixed metric set — converting every engine-side failure into a
//! recorded per-case outcome instead of a process abort.
//!
//! ## Architecture
//!
//! - **Adapter Boundary** ([`adapter`]) - The narrow capability interface every
//!   simulation engine implementation must provide.
//! - **Configuration** ([`config`]) - The explicit sweep configuration passed in
//!   by the caller; no process-wide mutable state.
//! - **Progress Monitoring** ([`progress`]) - Progress events and the callback
//!   reporter consumed by front-ends.
//! - **Error Handling** ([`error`]) - The engine error taxonomy (build,
//!   convergence, extraction, session).
//! - **Stub Engine** ([`stub`]) - A deterministic in-memory adapter
//!   implementation for tests and dry runs.
//!
//! Grid enumeration, flowsheet construction, and case execution are internal;
//! they are driven through [`crate::workflows::sweep`].

pub mod adapter;
pub(crate) mod builder;
pub mod config;
pub mod error;
pub(crate) mod grid;
pub mod progress;
pub(crate) mod runner;
pub mod stub;
