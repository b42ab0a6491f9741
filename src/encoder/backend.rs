use crate::foundation::core::Fps;
use crate::foundation::error::{StillreelResult, VfsError};

/// Name of the encoded artifact inside the scratch filesystem.
pub const OUTPUT_NAME: &str = "output.mp4";

/// How staged frames are named.
///
/// Frames are `<prefix><index>.<ext>` with a 1-based, zero-padded index, matching the
/// printf-style input pattern handed to the encoder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameLayout {
    pub prefix: &'static str,
    pub digits: usize,
}

impl Default for FrameLayout {
    fn default() -> Self {
        Self {
            prefix: "frame_",
            digits: 6,
        }
    }
}

impl FrameLayout {
    /// Scratch name of the frame at 1-based `index`.
    pub fn frame_name(&self, index: usize, ext: &str) -> String {
        format!(
            "{}{:0width$}.{}",
            self.prefix,
            index,
            ext,
            width = self.digits
        )
    }

    /// Encoder input pattern covering every frame name.
    pub fn input_pattern(&self, ext: &str) -> String {
        format!("{}%0{}d.{}", self.prefix, self.digits, ext)
    }

    /// Names of frames `1..=count`, in order.
    pub fn frame_names(&self, count: usize, ext: &str) -> Vec<String> {
        (1..=count).map(|i| self.frame_name(i, ext)).collect()
    }
}

/// One encoder invocation, equivalent to an `ffmpeg` argument list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodeCommand {
    pub frame_rate: Fps,
    pub input_pattern: String,
    pub video_codec: &'static str,
    pub pixel_format: &'static str,
    pub output: String,
    /// Number of staged frames; backends use it to turn frame counters into ratios.
    pub frame_count: u64,
}

impl EncodeCommand {
    /// H.264 / yuv420p at 29.97 fps over frames staged with `layout`.
    pub fn h264_sequence(layout: &FrameLayout, ext: &str, frame_count: u64) -> Self {
        Self {
            frame_rate: Fps::NTSC_2997,
            input_pattern: layout.input_pattern(ext),
            video_codec: "libx264",
            pixel_format: "yuv420p",
            output: OUTPUT_NAME.to_owned(),
            frame_count,
        }
    }

    /// Flag/value list as it would appear on an `ffmpeg` command line.
    pub fn args(&self) -> Vec<String> {
        vec![
            "-framerate".to_owned(),
            self.frame_rate.to_string(),
            "-i".to_owned(),
            self.input_pattern.clone(),
            "-c:v".to_owned(),
            self.video_codec.to_owned(),
            "-pix_fmt".to_owned(),
            self.pixel_format.to_owned(),
            self.output.clone(),
        ]
    }
}

/// Contract of an external encoder: a load step, a flat scratch filesystem keyed by bare file
/// names, and a command runner that reports progress ratios.
pub trait EncoderBackend {
    /// Make the encoder usable. Called at most once per session, through the loader.
    fn load(&mut self) -> StillreelResult<()>;

    /// Create or replace `path` with `data`.
    fn write_file(&mut self, path: &str, data: &[u8]) -> Result<(), VfsError>;

    /// Read all bytes of `path`.
    fn read_file(&self, path: &str) -> Result<Vec<u8>, VfsError>;

    /// Remove `path`. Fails with [`VfsError::NotFound`] when it does not exist.
    fn unlink(&mut self, path: &str) -> Result<(), VfsError>;

    /// Whether `path` currently exists.
    fn exists(&self, path: &str) -> bool;

    /// Run one encode. `on_progress` receives ratios in `[0, 1]` while it runs.
    fn run(
        &mut self,
        cmd: &EncodeCommand,
        on_progress: &mut dyn FnMut(f64),
    ) -> StillreelResult<()>;

    /// Remove `path` if present. Returns whether something was removed.
    fn remove_if_exists(&mut self, path: &str) -> Result<bool, VfsError> {
        match self.unlink(path) {
            Ok(()) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }
}

/// Reject anything that is not a bare file name.
pub(crate) fn check_scratch_name(path: &str) -> Result<(), VfsError> {
    let bad = path.is_empty()
        || path == "."
        || path == ".."
        || path.contains(['/', '\\'])
        || path.contains('\0');
    if bad {
        return Err(VfsError::InvalidPath {
            path: path.to_owned(),
        });
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encoder/backend.rs"]
mod tests;
