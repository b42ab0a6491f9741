//! What the user sees: the interactive view contract and its two renderings.

/// View contract and the in-memory view model.
pub mod model;
/// Static pages for the fatal startup paths.
pub mod pages;
/// Terminal rendering with a progress bar.
pub mod terminal;
