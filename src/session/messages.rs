//! Status lines shown to the user. Details of failures go to the log, not here.

pub const STARTING: &str = "Starting conversion...";
pub const LOADING_ENCODER: &str = "Loading the encoder...";
pub const WRITING_FRAMES: &str = "Writing frames...";
pub const GENERATING_VIDEO: &str = "Generating video...";
pub const COMPLETE: &str = "Conversion complete. Save the video from the download link.";
pub const MIXED_EXTENSIONS: &str = "All files must have the same extension.";
pub const MISSING_EXTENSION: &str = "Could not determine the file extension.";
pub const CONVERSION_FAILED: &str = "An error occurred during conversion. Check the log for details.";
