use crate::artifact::object_url::DownloadLink;
use crate::intake::selection::FileListEntry;

/// How a status line is styled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusTone {
    #[default]
    Plain,
    Error,
}

/// Handles the intake and the orchestrator drive.
pub trait ConversionView {
    /// Replace the visible file list.
    fn render_file_list(&mut self, entries: &[FileListEntry]);
    fn set_convert_enabled(&mut self, enabled: bool);
    fn set_status(&mut self, text: &str, tone: StatusTone);
    fn show_progress(&mut self);
    /// Set the bar to `value` (0..=100) and its textual label.
    fn set_progress(&mut self, value: u8, label: &str);
    fn set_progress_label(&mut self, label: &str);
    /// Zero the bar, label it `0%` and hide it.
    fn reset_progress(&mut self);
    fn show_download(&mut self, link: &DownloadLink);
    fn hide_download(&mut self);
    fn set_drop_highlight(&mut self, on: bool);
}

/// Progress display state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressState {
    pub visible: bool,
    pub value: u8,
    pub label: String,
}

impl Default for ProgressState {
    fn default() -> Self {
        Self {
            visible: false,
            value: 0,
            label: "0%".to_owned(),
        }
    }
}

/// In-memory view: records what a rendering would show.
///
/// Also keeps every progress value it was given, in order.
#[derive(Clone, Debug, Default)]
pub struct ViewModel {
    pub file_list: Vec<String>,
    pub convert_enabled: bool,
    pub status: String,
    pub status_tone: StatusTone,
    pub progress: ProgressState,
    pub download: Option<DownloadLink>,
    pub drop_highlight: bool,
    pub progress_trace: Vec<u8>,
    pub status_trace: Vec<String>,
}

impl ViewModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn download_visible(&self) -> bool {
        self.download.is_some()
    }
}

impl ConversionView for ViewModel {
    fn render_file_list(&mut self, entries: &[FileListEntry]) {
        self.file_list = entries.iter().map(FileListEntry::label).collect();
    }

    fn set_convert_enabled(&mut self, enabled: bool) {
        self.convert_enabled = enabled;
    }

    fn set_status(&mut self, text: &str, tone: StatusTone) {
        self.status = text.to_owned();
        self.status_tone = tone;
        self.status_trace.push(text.to_owned());
    }

    fn show_progress(&mut self) {
        self.progress.visible = true;
    }

    fn set_progress(&mut self, value: u8, label: &str) {
        self.progress.value = value;
        self.progress.label = label.to_owned();
        self.progress_trace.push(value);
    }

    fn set_progress_label(&mut self, label: &str) {
        self.progress.label = label.to_owned();
    }

    fn reset_progress(&mut self) {
        self.progress = ProgressState::default();
    }

    fn show_download(&mut self, link: &DownloadLink) {
        self.download = Some(link.clone());
    }

    fn hide_download(&mut self) {
        self.download = None;
    }

    fn set_drop_highlight(&mut self, on: bool) {
        self.drop_highlight = on;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/view/model.rs"]
mod tests;
