use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;

use crate::foundation::error::StillreelResult;

/// MIME type of every conversion output.
pub const MP4_MIME: &str = "video/mp4";

/// Immutable binary payload with a content type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Blob {
    bytes: Arc<[u8]>,
    mime: &'static str,
}

impl Blob {
    pub fn new(bytes: impl Into<Arc<[u8]>>, mime: &'static str) -> Self {
        Self {
            bytes: bytes.into(),
            mime,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime(&self) -> &'static str {
        self.mime
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Opaque handle to a blob held by an [`ObjectUrlRegistry`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ObjectUrl(String);

impl ObjectUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Owns blobs for as long as their URL is live.
#[derive(Debug, Default)]
pub struct ObjectUrlRegistry {
    next_id: u64,
    live: HashMap<ObjectUrl, Blob>,
}

impl ObjectUrlRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, blob: Blob) -> ObjectUrl {
        self.next_id += 1;
        let url = ObjectUrl(format!("blob:stillreel/{}", self.next_id));
        self.live.insert(url.clone(), blob);
        url
    }

    /// Release the blob behind `url`. Revoking an unknown or already revoked URL is a no-op.
    pub fn revoke(&mut self, url: &ObjectUrl) -> bool {
        self.live.remove(url).is_some()
    }

    pub fn resolve(&self, url: &ObjectUrl) -> Option<&Blob> {
        self.live.get(url)
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}

/// What the download control points at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadLink {
    pub href: ObjectUrl,
    /// Suggested file name for saving.
    pub file_name: String,
}

impl DownloadLink {
    /// Write the linked blob to `path`, replacing any existing file.
    pub fn save_to(&self, registry: &ObjectUrlRegistry, path: &Path) -> StillreelResult<u64> {
        let blob = registry
            .resolve(&self.href)
            .with_context(|| format!("download link {} was revoked", self.href))?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create output directory '{}'", parent.display())
            })?;
        }
        std::fs::write(path, blob.bytes())
            .with_context(|| format!("write '{}'", path.display()))?;
        Ok(blob.len() as u64)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/artifact/object_url.rs"]
mod tests;
