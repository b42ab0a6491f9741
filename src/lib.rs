//! stillreel turns a numbered sequence of still images into an H.264 MP4.
//!
//! The crate does no video work of its own. It orders the selected images, stages them as
//! `frame_000001.<ext>`, `frame_000002.<ext>`, ... in an encoder's scratch filesystem, runs one
//! encode at 29.97 fps (30000/1001), reads the MP4 back and offers it behind a revocable object
//! URL.
//! Staged files are removed afterwards whether or not the encode succeeded.
//!
//! # Pieces
//!
//! 1. [`CapabilityReport`] checks the platform once, before anything else.
//! 2. [`LibraryLoader`] loads the encoder at most once and serves every waiter.
//! 3. [`ConversionView`] is what the user sees; [`ViewModel`] and [`TerminalView`] render it.
//! 4. [`ConversionSession::prepare_files`] owns intake and natural ordering.
//! 5. [`ConversionSession::convert`] runs the pipeline.
//!
//! Encoders implement [`EncoderBackend`]. [`FfmpegCliBackend`] drives the system `ffmpeg`;
//! [`MemoryBackend`] is a scripted stand-in.
#![forbid(unsafe_code)]

mod foundation;

/// Finished outputs and download links.
pub mod artifact;
/// Encoder contract and backends.
pub mod encoder;
/// Selected files and their ordering.
pub mod intake;
/// One-shot encoder loading.
pub mod loader;
/// Platform capability probe.
pub mod probe;
/// Conversion session.
pub mod session;
/// View contract and renderings.
pub mod view;

pub use crate::foundation::config::{DEFAULT_DOWNLOAD_NAME, StillreelConfig};
pub use crate::foundation::core::Fps;
pub use crate::foundation::error::{
    InputError, LoadError, StillreelError, StillreelResult, VfsError,
};

pub use crate::artifact::object_url::{Blob, DownloadLink, MP4_MIME, ObjectUrl, ObjectUrlRegistry};
pub use crate::encoder::backend::{EncodeCommand, EncoderBackend, FrameLayout, OUTPUT_NAME};
#[cfg(feature = "ffmpeg-cli")]
pub use crate::encoder::ffmpeg::{
    FfmpegCliBackend, FfmpegCliOpts, is_ffmpeg_on_path, probe_ffmpeg_version,
};
pub use crate::encoder::memory::{EncodeScript, MemoryBackend, VfsOp};
pub use crate::intake::drop_zone::{DragEvent, DropZone};
pub use crate::intake::files::{
    FileSource, SelectedFile, collect_inputs, common_extension, extension_of, natural_cmp,
};
pub use crate::intake::selection::{FileListEntry, Selection};
pub use crate::loader::library::{LibraryLoader, LoadState};
pub use crate::probe::capability::{CapabilityCheck, CapabilityReport, ProbeOptions};
pub use crate::session::convert::{ConversionSession, ConvertOutcome, SessionOpts};
pub use crate::view::model::{ConversionView, ProgressState, StatusTone, ViewModel};
pub use crate::view::pages::{render_load_failure, render_unsupported};
pub use crate::view::terminal::TerminalView;
