//! File intake: where selected images come from and in which order they become frames.

/// Selected files, natural ordering, extension rules, input collection.
pub mod files;
/// Drag-and-drop affordance.
pub mod drop_zone;
/// The ordered selection and its visible listing.
pub mod selection;
