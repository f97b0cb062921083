//! Data model for one sweep run.
//!
//! - [`case`] - The independent variables of a single simulation case.
//! - [`result`] - The outcome record produced for every case, and the ordered
//!   collection of records accumulated over a run.

pub mod case;
pub mod result;
