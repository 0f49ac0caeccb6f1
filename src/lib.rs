//! SCI archive registration identity service.
//!
//! Parses student registration numbers, derives year of study and submission
//! eligibility, validates staff identifiers, and audits roster CSV exports.
//! The domain logic lives in [`registration`] and is pure; [`http`] and the
//! binary expose it over a small axum API and a CLI.

pub mod config;
pub mod error;
pub mod http;
pub mod registration;
pub mod telemetry;
