use std::io::{BufRead as _, BufReader, Read as _};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::Context as _;
use tempfile::TempDir;

use crate::encoder::backend::{EncodeCommand, EncoderBackend, check_scratch_name};
use crate::encoder::progress::ProgressParser;
use crate::foundation::config::StillreelConfig;
use crate::foundation::error::{StillreelError, StillreelResult, VfsError};

/// Options for [`FfmpegCliBackend`].
#[derive(Clone, Debug)]
pub struct FfmpegCliOpts {
    /// `ffmpeg` executable (bare name resolved through `PATH`, or a path).
    pub ffmpeg_path: PathBuf,
    /// Parent of the scratch directory. `None` uses the system temp dir.
    pub scratch_root: Option<PathBuf>,
}

impl Default for FfmpegCliOpts {
    fn default() -> Self {
        Self {
            ffmpeg_path: PathBuf::from("ffmpeg"),
            scratch_root: None,
        }
    }
}

impl From<&StillreelConfig> for FfmpegCliOpts {
    fn from(cfg: &StillreelConfig) -> Self {
        Self {
            ffmpeg_path: cfg.ffmpeg_path.clone(),
            scratch_root: cfg.scratch_root.clone(),
        }
    }
}

/// Backend that spawns the system `ffmpeg`.
///
/// Its filesystem is a private scratch directory created by [`load`](EncoderBackend::load) and
/// removed when the backend is dropped. Commands run with that directory as working directory,
/// so the bare names in an [`EncodeCommand`] resolve inside it.
pub struct FfmpegCliBackend {
    opts: FfmpegCliOpts,
    scratch: Option<TempDir>,
    version: Option<String>,
}

impl FfmpegCliBackend {
    pub fn new(opts: FfmpegCliOpts) -> Self {
        Self {
            opts,
            scratch: None,
            version: None,
        }
    }

    /// First line of `ffmpeg -version`, once loaded.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Scratch directory, once loaded.
    pub fn scratch_dir(&self) -> Option<&Path> {
        self.scratch.as_ref().map(TempDir::path)
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, VfsError> {
        check_scratch_name(path)?;
        let dir = self.scratch.as_ref().ok_or(VfsError::NotLoaded)?;
        Ok(dir.path().join(path))
    }
}

impl EncoderBackend for FfmpegCliBackend {
    #[tracing::instrument(skip(self), fields(ffmpeg = %self.opts.ffmpeg_path.display()))]
    fn load(&mut self) -> StillreelResult<()> {
        if self.scratch.is_some() {
            return Ok(());
        }

        let version = probe_ffmpeg_version(&self.opts.ffmpeg_path)?;
        tracing::info!(%version, "ffmpeg located");

        let mut builder = tempfile::Builder::new();
        builder.prefix("stillreel-");
        let scratch = match self.opts.scratch_root.as_deref() {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        }
        .context("create encoder scratch directory")?;
        tracing::debug!(dir = %scratch.path().display(), "scratch directory ready");

        self.version = Some(version);
        self.scratch = Some(scratch);
        Ok(())
    }

    fn write_file(&mut self, path: &str, data: &[u8]) -> Result<(), VfsError> {
        let full = self.resolve(path)?;
        std::fs::write(&full, data).map_err(|e| VfsError::from_io(path, e))
    }

    fn read_file(&self, path: &str) -> Result<Vec<u8>, VfsError> {
        let full = self.resolve(path)?;
        std::fs::read(&full).map_err(|e| VfsError::from_io(path, e))
    }

    fn unlink(&mut self, path: &str) -> Result<(), VfsError> {
        let full = self.resolve(path)?;
        std::fs::remove_file(&full).map_err(|e| VfsError::from_io(path, e))
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path).map(|p| p.is_file()).unwrap_or(false)
    }

    fn run(
        &mut self,
        cmd: &EncodeCommand,
        on_progress: &mut dyn FnMut(f64),
    ) -> StillreelResult<()> {
        let dir = self
            .scratch
            .as_ref()
            .ok_or(VfsError::NotLoaded)?
            .path()
            .to_path_buf();

        let args = cmd.args();
        tracing::debug!(args = %args.join(" "), "running ffmpeg");

        let mut child = Command::new(&self.opts.ffmpeg_path)
            .current_dir(&dir)
            .args([
                "-hide_banner",
                "-loglevel",
                "error",
                "-nostats",
                "-progress",
                "pipe:1",
                "-y",
            ])
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                StillreelError::encode(format!(
                    "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
                ))
            })?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| StillreelError::encode("failed to open ffmpeg stdout (unexpected)"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| StillreelError::encode("failed to open ffmpeg stderr (unexpected)"))?;
        let stderr_drain = std::thread::spawn(move || {
            let mut stderr_bytes = Vec::new();
            stderr.read_to_end(&mut stderr_bytes)?;
            Ok::<_, std::io::Error>(stderr_bytes)
        });

        let mut parser = ProgressParser::new(cmd.frame_count);
        let read = BufReader::new(stdout).lines().try_for_each(|line| {
            if let Some(ratio) = parser.feed_line(&line?) {
                on_progress(ratio);
            }
            Ok::<_, std::io::Error>(())
        });
        if let Err(e) = read {
            // The child must not outlive the run or keep writing into the scratch dir.
            if let Err(kill_err) = child.kill() {
                tracing::warn!(%kill_err, "failed to kill ffmpeg");
            }
            let _ = child.wait();
            let _ = stderr_drain.join();
            return Err(StillreelError::encode(format!(
                "failed to read ffmpeg progress: {e}"
            )));
        }

        let status = child.wait().map_err(|e| {
            StillreelError::encode(format!("failed to wait for ffmpeg to finish: {e}"))
        })?;
        let stderr_bytes = stderr_drain
            .join()
            .map_err(|_| StillreelError::encode("ffmpeg stderr drain thread panicked"))?
            .map_err(|e| StillreelError::encode(format!("ffmpeg stderr read failed: {e}")))?;

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr_bytes);
            return Err(StillreelError::encode(format!(
                "ffmpeg exited with status {}: {}",
                status,
                stderr.trim()
            )));
        }
        Ok(())
    }
}

/// Run `<ffmpeg> -version` and return its first line.
pub fn probe_ffmpeg_version(ffmpeg: &Path) -> StillreelResult<String> {
    let output = Command::new(ffmpeg)
        .arg("-version")
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .map_err(|e| {
            StillreelError::encode(format!(
                "ffmpeg is required for MP4 encoding, but '{}' could not be run: {e}",
                ffmpeg.display()
            ))
        })?;
    if !output.status.success() {
        return Err(StillreelError::encode(format!(
            "'{} -version' exited with status {}",
            ffmpeg.display(),
            output.status
        )));
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(stdout.lines().next().unwrap_or("ffmpeg").trim().to_owned())
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    probe_ffmpeg_version(Path::new("ffmpeg")).is_ok()
}

#[cfg(test)]
#[path = "../../tests/unit/encoder/ffmpeg.rs"]
mod tests;
