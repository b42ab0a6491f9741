//! The conversion session: one owner for the selection, the encoder, the view and the output.

/// Session object and the convert pipeline.
pub mod convert;
/// User-facing status lines.
pub mod messages;
/// Progress percentages for the two pipeline phases.
pub mod progress;
