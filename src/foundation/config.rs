use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::foundation::error::{StillreelError, StillreelResult};

/// File name the download link suggests for a finished conversion.
pub const DEFAULT_DOWNLOAD_NAME: &str = "sequence.mp4";

/// Runtime configuration, loaded from an optional JSON file and overridden by CLI flags.
///
/// Encoding parameters are fixed; this only covers where things live on the host.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StillreelConfig {
    /// `ffmpeg` executable, either a bare name resolved through `PATH` or a path.
    pub ffmpeg_path: PathBuf,
    /// Directory under which the encoder's scratch directory is created.
    /// `None` uses the system temp dir.
    pub scratch_root: Option<PathBuf>,
    /// Suggested file name for the produced video.
    pub download_name: String,
}

impl Default for StillreelConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: PathBuf::from("ffmpeg"),
            scratch_root: None,
            download_name: DEFAULT_DOWNLOAD_NAME.to_owned(),
        }
    }
}

impl StillreelConfig {
    /// Read a JSON config file.
    pub fn from_path(path: &Path) -> StillreelResult<Self> {
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| StillreelError::config(format!("parse '{}': {e}", path.display())))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> StillreelResult<()> {
        if self.ffmpeg_path.as_os_str().is_empty() {
            return Err(StillreelError::config("ffmpeg_path must not be empty"));
        }
        if self.download_name.trim().is_empty() {
            return Err(StillreelError::config("download_name must not be empty"));
        }
        if self.download_name.contains(['/', '\\']) {
            return Err(StillreelError::config(
                "download_name must be a file name, not a path",
            ));
        }
        Ok(())
    }

    pub fn with_ffmpeg_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.ffmpeg_path = path.into();
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
