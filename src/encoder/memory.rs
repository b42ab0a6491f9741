use std::collections::BTreeMap;

use crate::encoder::backend::{EncodeCommand, EncoderBackend, check_scratch_name};
use crate::foundation::error::{StillreelError, StillreelResult, VfsError};

/// One call observed by a [`MemoryBackend`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VfsOp {
    Load,
    Write(String),
    Read(String),
    Unlink(String),
    Run(Vec<String>),
}

/// Scripted behavior of a [`MemoryBackend`].
#[derive(Clone, Debug, Default)]
pub struct EncodeScript {
    /// Ratios reported during `run`, in order.
    pub progress: Vec<f64>,
    /// Bytes written to the command's output on success.
    pub output: Vec<u8>,
    /// Make `load` fail with this reason.
    pub fail_load: Option<String>,
    /// Make `run` fail with this reason after reporting `progress`.
    pub fail_run: Option<String>,
    /// Make `write_file` fail for this name.
    pub fail_write: Option<String>,
}

/// In-memory encoder for tests, dry runs and embedding.
///
/// Files live in a map; `run` checks that every input frame of the command is present, reports
/// the scripted ratios and writes the scripted output. Every call is appended to a journal.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    files: BTreeMap<String, Vec<u8>>,
    loaded: bool,
    script: EncodeScript,
    journal: Vec<VfsOp>,
}

impl MemoryBackend {
    pub fn new(script: EncodeScript) -> Self {
        Self {
            script,
            ..Self::default()
        }
    }

    /// Calls observed so far, in order.
    pub fn journal(&self) -> &[VfsOp] {
        &self.journal
    }

    /// Names currently present, sorted.
    pub fn file_names(&self) -> Vec<String> {
        self.files.keys().cloned().collect()
    }

    /// Number of `load` calls observed.
    pub fn load_count(&self) -> usize {
        self.journal.iter().filter(|op| **op == VfsOp::Load).count()
    }

    /// Names passed to `write_file`, in call order.
    pub fn written(&self) -> Vec<String> {
        self.journal
            .iter()
            .filter_map(|op| match op {
                VfsOp::Write(name) => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    fn ensure_loaded(&self) -> Result<(), VfsError> {
        if self.loaded {
            Ok(())
        } else {
            Err(VfsError::NotLoaded)
        }
    }
}

impl EncoderBackend for MemoryBackend {
    fn load(&mut self) -> StillreelResult<()> {
        self.journal.push(VfsOp::Load);
        if let Some(reason) = &self.script.fail_load {
            return Err(StillreelError::encode(reason.clone()));
        }
        self.loaded = true;
        Ok(())
    }

    fn write_file(&mut self, path: &str, data: &[u8]) -> Result<(), VfsError> {
        check_scratch_name(path)?;
        self.ensure_loaded()?;
        self.journal.push(VfsOp::Write(path.to_owned()));
        if self.script.fail_write.as_deref() == Some(path) {
            return Err(VfsError::Io {
                path: path.to_owned(),
                source: std::io::Error::other("scripted write failure"),
            });
        }
        self.files.insert(path.to_owned(), data.to_vec());
        Ok(())
    }

    fn read_file(&self, path: &str) -> Result<Vec<u8>, VfsError> {
        check_scratch_name(path)?;
        self.ensure_loaded()?;
        self.files.get(path).cloned().ok_or_else(|| VfsError::NotFound {
            path: path.to_owned(),
        })
    }

    fn unlink(&mut self, path: &str) -> Result<(), VfsError> {
        check_scratch_name(path)?;
        self.ensure_loaded()?;
        self.journal.push(VfsOp::Unlink(path.to_owned()));
        match self.files.remove(path) {
            Some(_) => Ok(()),
            None => Err(VfsError::NotFound {
                path: path.to_owned(),
            }),
        }
    }

    fn exists(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    fn run(
        &mut self,
        cmd: &EncodeCommand,
        on_progress: &mut dyn FnMut(f64),
    ) -> StillreelResult<()> {
        self.ensure_loaded()?;
        self.journal.push(VfsOp::Run(cmd.args()));

        for index in 1..=cmd.frame_count {
            let name = expand_pattern(&cmd.input_pattern, index).ok_or_else(|| {
                StillreelError::encode(format!("unsupported input pattern '{}'", cmd.input_pattern))
            })?;
            if !self.files.contains_key(&name) {
                return Err(StillreelError::encode(format!("missing input frame '{name}'")));
            }
        }

        for &ratio in &self.script.progress {
            on_progress(ratio);
        }
        if let Some(reason) = &self.script.fail_run {
            return Err(StillreelError::encode(reason.clone()));
        }
        self.files
            .insert(cmd.output.clone(), self.script.output.clone());
        Ok(())
    }
}

/// Substitute `index` into a printf-style `%0Nd` (or `%d`) pattern.
fn expand_pattern(pattern: &str, index: u64) -> Option<String> {
    let start = pattern.find('%')?;
    let rest = &pattern[start + 1..];
    let end = rest.find('d')?;
    let width_spec = &rest[..end];
    let width = if width_spec.is_empty() {
        0
    } else {
        width_spec.strip_prefix('0')?.parse::<usize>().ok()?
    };
    Some(format!(
        "{}{:0width$}{}",
        &pattern[..start],
        index,
        &rest[end + 1..],
        width = width
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/encoder/memory.rs"]
mod tests;
