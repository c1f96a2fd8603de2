//! Visa document checklist engine: eligibility resolution, risk disclosure, and
//! checklist compilation, plus the HTTP surface the API service mounts.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
