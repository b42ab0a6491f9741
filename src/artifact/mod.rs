//! Finished conversion outputs and the links that expose them.

/// Revocable in-memory object URLs.
pub mod object_url;
