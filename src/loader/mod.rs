//! One-shot loading of the external encoder.

/// Tri-state loader with per-waiter result channels.
pub mod library;
