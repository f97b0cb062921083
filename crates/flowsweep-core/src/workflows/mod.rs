//! High-level orchestration entry points.
//!
//! A workflow drives a complete user-facing operation from one call: it
//! enumerates work, executes it against an engine session, reports progress,
//! and returns collected results. Front-ends (the CLI, library consumers)
//! call these instead of assembling engine primitives themselves.

pub mod sweep;
