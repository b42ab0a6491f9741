use std::cmp::Ordering;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use unicode_normalization::UnicodeNormalization as _;
use unicode_normalization::char::is_combining_mark;

use crate::foundation::error::{InputError, StillreelResult};

/// Where a selected file's bytes come from.
#[derive(Clone, Debug)]
pub enum FileSource {
    Path(PathBuf),
    Memory(Arc<[u8]>),
}

/// One user-selected image: display name, byte length and its bytes.
#[derive(Clone, Debug)]
pub struct SelectedFile {
    pub name: String,
    pub len: u64,
    pub source: FileSource,
}

impl SelectedFile {
    /// Describe a file on disk. The display name is the final path component.
    pub fn from_path(path: impl Into<PathBuf>) -> StillreelResult<Self> {
        let path = path.into();
        let meta = std::fs::metadata(&path)
            .with_context(|| format!("stat input file '{}'", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self {
            name,
            len: meta.len(),
            source: FileSource::Path(path),
        })
    }

    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        let bytes = bytes.into();
        Self {
            name: name.into(),
            len: bytes.len() as u64,
            source: FileSource::Memory(bytes),
        }
    }

    pub fn read_bytes(&self) -> StillreelResult<Vec<u8>> {
        match &self.source {
            FileSource::Path(path) => Ok(std::fs::read(path)
                .with_context(|| format!("read input file '{}'", path.display()))?),
            FileSource::Memory(bytes) => Ok(bytes.to_vec()),
        }
    }

    /// Lower-cased extension of the name; see [`extension_of`].
    pub fn extension(&self) -> String {
        extension_of(&self.name)
    }

    /// Pixel dimensions read from the image header, if the format is recognised.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        match &self.source {
            FileSource::Path(path) => image::image_dimensions(path).ok(),
            FileSource::Memory(bytes) => image::ImageReader::new(Cursor::new(&bytes[..]))
                .with_guessed_format()
                .ok()?
                .into_dimensions()
                .ok(),
        }
    }
}

/// Text after the last `.`, lower-cased. Empty when the name has no `.`.
pub fn extension_of(name: &str) -> String {
    match name.rfind('.') {
        Some(i) => name[i + 1..].to_lowercase(),
        None => String::new(),
    }
}

/// The single extension shared by every file.
///
/// Callers handle the empty-selection case before asking.
pub fn common_extension(files: &[SelectedFile]) -> Result<String, InputError> {
    let mut found: Vec<String> = Vec::new();
    for f in files {
        let ext = f.extension();
        if !found.contains(&ext) {
            found.push(ext);
        }
    }
    if found.len() > 1 {
        return Err(InputError::MixedExtensions { found });
    }
    match found.pop() {
        Some(ext) if !ext.is_empty() => Ok(ext),
        _ => Err(InputError::MissingExtension),
    }
}

/// Whether `name` carries an extension the `image` crate knows.
pub fn is_image_name(name: &str) -> bool {
    let ext = extension_of(name);
    !ext.is_empty() && image::ImageFormat::from_extension(&ext).is_some()
}

/// Numeric-aware name ordering that ignores case and accents.
///
/// Runs of ASCII digits compare by value (`img2` < `img10`). Everything else is compared on its
/// base letter: names are decomposed (NFD), combining marks dropped and the rest lower-cased, so
/// `étape1` sorts with `etape1`. Punctuation sorts before digits, digits before letters, and
/// ASCII punctuation follows the Unicode root collation order (`_` before `-` before `.`).
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let a = fold(a);
    let b = fold(b);
    let (mut i, mut j) = (0, 0);
    loop {
        match (a.get(i).copied(), b.get(j).copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(ca), Some(cb)) if ca.is_ascii_digit() && cb.is_ascii_digit() => {
                let ra = digit_run(&a, i);
                let rb = digit_run(&b, j);
                let ord = cmp_digit_runs(&a[i..ra], &b[j..rb]);
                if ord != Ordering::Equal {
                    return ord;
                }
                i = ra;
                j = rb;
            }
            (Some(ca), Some(cb)) => {
                let ord = char_key(ca).cmp(&char_key(cb));
                if ord != Ordering::Equal {
                    return ord;
                }
                i += 1;
                j += 1;
            }
        }
    }
}

/// Base letters only: canonical decomposition without combining marks, lower-cased.
fn fold(name: &str) -> Vec<char> {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn digit_run(chars: &[char], start: usize) -> usize {
    chars[start..]
        .iter()
        .position(|c| !c.is_ascii_digit())
        .map_or(chars.len(), |n| start + n)
}

fn cmp_digit_runs(a: &[char], b: &[char]) -> Ordering {
    let a = strip_zeros(a);
    let b = strip_zeros(b);
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn strip_zeros(run: &[char]) -> &[char] {
    let zeros = run.iter().take_while(|c| **c == '0').count();
    &run[zeros..]
}

// Root collation order of ASCII whitespace, punctuation and symbols.
const PUNCT_ORDER: &str = " _-,;:!?.'\"()[]{}@*/\\&#%`^+<=>|~$";

fn char_key(c: char) -> (u8, u32) {
    if c.is_ascii_digit() {
        (1, c as u32)
    } else if c.is_alphabetic() {
        (2, c as u32)
    } else {
        let rank = PUNCT_ORDER
            .chars()
            .position(|p| p == c)
            .map_or(PUNCT_ORDER.len() as u32 + c as u32, |n| n as u32);
        (0, rank)
    }
}

/// Sort `files` by [`natural_cmp`] on their names. Equal keys keep their input order.
pub fn sort_files(mut files: Vec<SelectedFile>) -> Vec<SelectedFile> {
    files.sort_by(|a, b| natural_cmp(&a.name, &b.name));
    files
}

/// Gather picker-style inputs: files are taken as given, directories contribute their
/// image files (non-recursive).
pub fn collect_inputs(paths: &[PathBuf]) -> StillreelResult<Vec<SelectedFile>> {
    let mut out = Vec::new();
    for path in paths {
        if path.is_dir() {
            collect_dir(path, &mut out)?;
        } else {
            out.push(SelectedFile::from_path(path.clone())?);
        }
    }
    Ok(out)
}

fn collect_dir(dir: &Path, out: &mut Vec<SelectedFile>) -> StillreelResult<()> {
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("read directory '{}'", dir.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("read directory '{}'", dir.display()))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if is_image_name(&name) {
            out.push(SelectedFile::from_path(path)?);
        } else {
            tracing::debug!(file = %name, "skipping non-image file");
        }
    }
    Ok(())
}

/// Warnings about frame sizes the encoder is likely to reject or rescale badly.
///
/// Reads headers only. Files whose format cannot be identified are skipped.
pub fn inspect_dimensions(files: &[SelectedFile]) -> Vec<String> {
    let mut warnings = Vec::new();
    let mut first: Option<(String, (u32, u32))> = None;
    for f in files {
        let Some((w, h)) = f.dimensions() else {
            tracing::trace!(file = %f.name, "dimensions unavailable");
            continue;
        };
        if w % 2 != 0 || h % 2 != 0 {
            warnings.push(format!(
                "{} is {w}x{h}; yuv420p output needs even width and height",
                f.name
            ));
        }
        match &first {
            None => first = Some((f.name.clone(), (w, h))),
            Some((first_name, dims)) if *dims != (w, h) => warnings.push(format!(
                "{} is {w}x{h} but {first_name} is {}x{}",
                f.name, dims.0, dims.1
            )),
            Some(_) => {}
        }
    }
    warnings
}

#[cfg(test)]
#[path = "../../tests/unit/intake/files.rs"]
mod tests;
