use crate::artifact::object_url::{Blob, DownloadLink, MP4_MIME, ObjectUrlRegistry};
use crate::encoder::backend::{EncodeCommand, EncoderBackend, FrameLayout, OUTPUT_NAME};
use crate::foundation::config::DEFAULT_DOWNLOAD_NAME;
use crate::foundation::error::{InputError, LoadError, StillreelError, StillreelResult};
use crate::intake::drop_zone::{DragEvent, DropZone};
use crate::intake::files::{SelectedFile, common_extension, inspect_dimensions};
use crate::intake::selection::Selection;
use crate::loader::library::LibraryLoader;
use crate::session::messages;
use crate::session::progress::{
    DONE_LABEL, ERROR_LABEL, encode_label, encode_percent, staging_label, staging_percent,
};
use crate::view::model::{ConversionView, StatusTone};

/// Options for a [`ConversionSession`].
#[derive(Clone, Debug)]
pub struct SessionOpts {
    /// Suggested file name on the download link.
    pub download_name: String,
    /// Naming of staged frames.
    pub layout: FrameLayout,
}

impl Default for SessionOpts {
    fn default() -> Self {
        Self {
            download_name: DEFAULT_DOWNLOAD_NAME.to_owned(),
            layout: FrameLayout::default(),
        }
    }
}

/// Result of one [`ConversionSession::convert`] call.
#[derive(Debug)]
pub enum ConvertOutcome {
    /// Nothing selected, or a conversion is already running.
    Skipped,
    /// The selection was refused before any work started.
    Rejected(InputError),
    /// The video is ready behind this link.
    Completed(DownloadLink),
    /// The pipeline failed; scratch files were still cleaned up.
    Failed(StillreelError),
}

impl ConvertOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}

/// Owns everything one converter instance needs: the encoder and its loader, the ordered
/// selection, the view, and the single live download link.
///
/// `convert` borrows the session mutably, so at most one conversion runs at a time; the view's
/// convert control is disabled for its duration as well.
pub struct ConversionSession<B, V> {
    backend: B,
    view: V,
    loader: LibraryLoader,
    selection: Selection,
    drop_zone: DropZone,
    urls: ObjectUrlRegistry,
    live_link: Option<DownloadLink>,
    busy: bool,
    opts: SessionOpts,
}

impl<B: EncoderBackend, V: ConversionView> ConversionSession<B, V> {
    pub fn new(backend: B, mut view: V, opts: SessionOpts) -> Self {
        view.render_file_list(&[]);
        view.set_convert_enabled(false);
        view.reset_progress();
        Self {
            backend,
            view,
            loader: LibraryLoader::new(),
            selection: Selection::default(),
            drop_zone: DropZone::default(),
            urls: ObjectUrlRegistry::new(),
            live_link: None,
            busy: false,
            opts,
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn loader(&self) -> &LibraryLoader {
        &self.loader
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn urls(&self) -> &ObjectUrlRegistry {
        &self.urls
    }

    /// The download link currently offered, if any.
    pub fn live_link(&self) -> Option<&DownloadLink> {
        self.live_link.as_ref()
    }

    /// Bytes behind the live download link.
    pub fn artifact(&self) -> Option<&Blob> {
        self.live_link
            .as_ref()
            .and_then(|link| self.urls.resolve(&link.href))
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Load the encoder now. Later calls reuse the first outcome.
    pub fn load_encoder(&mut self) -> Result<(), LoadError> {
        let backend = &mut self.backend;
        self.loader.ensure_loaded(|| backend.load())
    }

    /// Replace the selection with `files` in natural name order and reset everything derived
    /// from the previous one.
    pub fn prepare_files(&mut self, files: Vec<SelectedFile>) {
        self.selection = Selection::from_unsorted(files);
        tracing::debug!(
            files = self.selection.len(),
            bytes = self.selection.total_bytes(),
            "selection replaced"
        );
        self.revoke_download();
        self.view.reset_progress();
        self.view.set_status("", StatusTone::Plain);
        self.view.render_file_list(&self.selection.entries());
        self.view
            .set_convert_enabled(!self.selection.is_empty() && !self.busy);
    }

    pub fn drag_over(&mut self, event: &mut DragEvent) {
        self.drop_zone.drag_over(event);
        self.view.set_drop_highlight(true);
    }

    pub fn drag_leave(&mut self) {
        self.drop_zone.drag_leave();
        self.view.set_drop_highlight(false);
    }

    /// Files dropped on the zone. An empty drop leaves the selection alone.
    pub fn drop_files(&mut self, event: &mut DragEvent, files: Vec<SelectedFile>) {
        let take = self.drop_zone.drop(event, files.len());
        self.view.set_drop_highlight(false);
        if take {
            self.prepare_files(files);
        }
    }

    /// Convert the current selection into an MP4.
    #[tracing::instrument(skip(self), fields(frames = self.selection.len()))]
    pub fn convert(&mut self) -> ConvertOutcome {
        if self.busy || self.selection.is_empty() {
            return ConvertOutcome::Skipped;
        }

        let ext = match common_extension(self.selection.files()) {
            Ok(ext) => ext,
            Err(err) => {
                let msg = match err {
                    InputError::MixedExtensions { .. } => messages::MIXED_EXTENSIONS,
                    InputError::MissingExtension => messages::MISSING_EXTENSION,
                };
                tracing::info!(%err, "selection rejected");
                self.view.set_status(msg, StatusTone::Error);
                return ConvertOutcome::Rejected(err);
            }
        };

        self.busy = true;
        self.view.set_convert_enabled(false);
        self.view.show_progress();
        self.view.set_status(messages::STARTING, StatusTone::Plain);
        self.revoke_download();

        let result = self.run_pipeline(&ext);
        self.purge_scratch(&ext);

        self.busy = false;
        self.view.set_convert_enabled(true);
        match result {
            Ok(link) => {
                self.view.set_progress(100, DONE_LABEL);
                tracing::info!(href = %link.href, "conversion complete");
                ConvertOutcome::Completed(link)
            }
            Err(err) => {
                tracing::error!(error = %err, "conversion failed");
                self.view
                    .set_status(messages::CONVERSION_FAILED, StatusTone::Error);
                self.view.set_progress_label(ERROR_LABEL);
                ConvertOutcome::Failed(err)
            }
        }
    }

    fn run_pipeline(&mut self, ext: &str) -> StillreelResult<DownloadLink> {
        if !self.loader.is_loaded() {
            self.view
                .set_status(messages::LOADING_ENCODER, StatusTone::Plain);
        }
        self.load_encoder()?;

        for warning in inspect_dimensions(self.selection.files()) {
            tracing::warn!("{warning}");
        }

        self.view
            .set_status(messages::WRITING_FRAMES, StatusTone::Plain);
        let total = self.selection.len();
        for (i, file) in self.selection.files().iter().enumerate() {
            let name = self.opts.layout.frame_name(i + 1, ext);
            self.backend.remove_if_exists(&name)?;
            let data = file.read_bytes()?;
            self.backend.write_file(&name, &data)?;
            tracing::trace!(frame = %name, source = %file.name, bytes = data.len(), "staged");

            let percent = staging_percent(i + 1, total);
            self.view.set_progress(percent, &staging_label(percent));
        }

        self.view
            .set_status(messages::GENERATING_VIDEO, StatusTone::Plain);
        self.backend.remove_if_exists(OUTPUT_NAME)?;

        let cmd = EncodeCommand::h264_sequence(&self.opts.layout, ext, total as u64);
        let view = &mut self.view;
        self.backend.run(&cmd, &mut |ratio| {
            view.show_progress();
            let percent = encode_percent(ratio);
            view.set_progress(percent, &encode_label(percent));
        })?;

        let data = self.backend.read_file(&cmd.output)?;
        let href = self.urls.create(Blob::new(data, MP4_MIME));
        let link = DownloadLink {
            href,
            file_name: self.opts.download_name.clone(),
        };
        self.view.show_download(&link);
        self.live_link = Some(link.clone());
        self.view.set_status(messages::COMPLETE, StatusTone::Plain);
        Ok(link)
    }

    /// Delete every staged frame and the output. Missing entries are expected; anything else
    /// is logged and skipped.
    fn purge_scratch(&mut self, ext: &str) {
        if !self.loader.is_loaded() {
            return;
        }
        let mut names = self.opts.layout.frame_names(self.selection.len(), ext);
        names.push(OUTPUT_NAME.to_owned());
        for name in names {
            if let Err(err) = self.backend.remove_if_exists(&name) {
                tracing::warn!(file = %name, %err, "failed to remove scratch file");
            }
        }
    }

    fn revoke_download(&mut self) {
        if let Some(link) = self.live_link.take() {
            self.urls.revoke(&link.href);
        }
        self.view.hide_download();
    }
}
