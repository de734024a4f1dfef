//! Utility modules.

/// Wall-clock helpers.
pub mod datetime;

/// Host, domain and port validation.
pub mod validation;
