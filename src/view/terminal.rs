use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::artifact::object_url::DownloadLink;
use crate::intake::selection::FileListEntry;
use crate::view::model::{ConversionView, StatusTone};

const BAR_TEMPLATE: &str = "{bar:40.cyan/blue} {msg}";

/// Terminal rendering of the conversion view, written to stderr.
#[derive(Default)]
pub struct TerminalView {
    rendered: bool,
    bar: Option<ProgressBar>,
}

impl TerminalView {
    /// A view that has not drawn anything yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Print the title and description. Only the first call draws.
    pub fn render(&mut self) {
        if self.rendered {
            return;
        }
        self.rendered = true;
        eprintln!("{}", "stillreel: numbered stills to MP4".bold());
        eprintln!(
            "Frames are joined at 29.97 fps (30000/1001) into an H.264 MP4. \
             Name files so they sort in frame order and share one image format."
        );
    }

    fn line(&self, text: String) {
        match &self.bar {
            Some(bar) => bar.println(text),
            None => eprintln!("{text}"),
        }
    }

    fn new_bar() -> ProgressBar {
        let bar = ProgressBar::with_draw_target(Some(100), ProgressDrawTarget::stderr());
        let style = ProgressStyle::with_template(BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        bar.set_style(style);
        bar.set_message("0%");
        bar
    }
}

impl ConversionView for TerminalView {
    fn render_file_list(&mut self, entries: &[FileListEntry]) {
        for entry in entries {
            self.line(format!("  {}", entry.label()));
        }
    }

    fn set_convert_enabled(&mut self, enabled: bool) {
        tracing::trace!(enabled, "convert control");
    }

    fn set_status(&mut self, text: &str, tone: StatusTone) {
        if text.is_empty() {
            return;
        }
        let text = match tone {
            StatusTone::Plain => text.normal().to_string(),
            StatusTone::Error => format!("{} {}", "error:".red().bold(), text.red()),
        };
        self.line(text);
    }

    fn show_progress(&mut self) {
        if self.bar.is_none() {
            self.bar = Some(Self::new_bar());
        }
    }

    fn set_progress(&mut self, value: u8, label: &str) {
        if let Some(bar) = &self.bar {
            bar.set_position(u64::from(value.min(100)));
            bar.set_message(label.to_owned());
        }
    }

    fn set_progress_label(&mut self, label: &str) {
        if let Some(bar) = &self.bar {
            bar.set_message(label.to_owned());
        }
    }

    fn reset_progress(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }

    fn show_download(&mut self, link: &DownloadLink) {
        if let Some(bar) = self.bar.take() {
            bar.finish();
        }
        eprintln!(
            "{} {} ({})",
            "ready:".green().bold(),
            link.file_name,
            link.href
        );
    }

    // A printed link cannot be taken back.
    fn hide_download(&mut self) {}

    fn set_drop_highlight(&mut self, on: bool) {
        tracing::trace!(on, "drop highlight");
    }
}
