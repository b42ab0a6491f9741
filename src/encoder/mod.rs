//! Encoder backends.
//!
//! The converter never encodes anything itself. It stages numbered frames into a backend's
//! scratch filesystem, runs one encode command, and reads the result back.

/// Backend contract, frame naming and the encode command line.
pub mod backend;
/// Backend that drives the system `ffmpeg` executable.
#[cfg(feature = "ffmpeg-cli")]
pub mod ffmpeg;
/// In-memory backend with a scripted encoder.
pub mod memory;
/// Parser for `ffmpeg -progress` key/value output.
pub mod progress;
