//! Platform capability checks run once before anything else.

/// Capability report.
pub mod capability;
