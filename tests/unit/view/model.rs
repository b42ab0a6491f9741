use super::*;
use crate::artifact::object_url::{Blob, MP4_MIME, ObjectUrlRegistry};

#[test]
fn reset_progress_hides_and_zeroes() {
    let mut view = ViewModel::new();
    view.show_progress();
    view.set_progress(42, "converting 42%");
    assert!(view.progress.visible);

    view.reset_progress();
    assert_eq!(view.progress, ProgressState::default());
    assert_eq!(view.progress.label, "0%");
    assert_eq!(view.progress_trace, vec![42]);
}

#[test]
fn status_keeps_tone_and_history() {
    let mut view = ViewModel::new();
    view.set_status("working", StatusTone::Plain);
    view.set_status("broken", StatusTone::Error);
    assert_eq!(view.status, "broken");
    assert_eq!(view.status_tone, StatusTone::Error);
    assert_eq!(view.status_trace, vec!["working", "broken"]);
}

#[test]
fn download_visibility_follows_the_link() {
    let mut reg = ObjectUrlRegistry::new();
    let link = DownloadLink {
        href: reg.create(Blob::new(Vec::new(), MP4_MIME)),
        file_name: "sequence.mp4".into(),
    };
    let mut view = ViewModel::new();
    view.show_download(&link);
    assert!(view.download_visible());
    view.hide_download();
    assert!(!view.download_visible());
}
