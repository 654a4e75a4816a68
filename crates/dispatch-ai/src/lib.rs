//! Core library for the facilities dispatch recommendation service.
//!
//! The `workflows::dispatch` module holds the scoring engine and the
//! assignment decision policy; everything else here is the surrounding
//! service plumbing (configuration, telemetry, boundary errors).

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
