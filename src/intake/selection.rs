use crate::intake::files::{SelectedFile, sort_files};

/// One visible line of the file list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileListEntry {
    /// 1-based frame position.
    pub position: usize,
    pub name: String,
}

impl FileListEntry {
    /// `NNN. name`, 3-digit zero padded.
    pub fn label(&self) -> String {
        format!("{:03}. {}", self.position, self.name)
    }
}

/// Ordered frame sequence. Replaced wholesale on every new selection, never merged.
#[derive(Clone, Debug, Default)]
pub struct Selection {
    files: Vec<SelectedFile>,
}

impl Selection {
    /// Build a selection from raw input order.
    pub fn from_unsorted(files: Vec<SelectedFile>) -> Self {
        Self {
            files: sort_files(files),
        }
    }

    pub fn files(&self) -> &[SelectedFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.len).sum()
    }

    pub fn entries(&self) -> Vec<FileListEntry> {
        self.files
            .iter()
            .enumerate()
            .map(|(i, f)| FileListEntry {
                position: i + 1,
                name: f.name.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/intake/selection.rs"]
mod tests;
