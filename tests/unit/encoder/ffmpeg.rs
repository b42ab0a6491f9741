use super::*;

fn missing_binary_opts() -> FfmpegCliOpts {
    FfmpegCliOpts {
        ffmpeg_path: PathBuf::from("stillreel-no-such-ffmpeg-binary"),
        scratch_root: None,
    }
}

#[test]
fn filesystem_calls_before_load_report_not_loaded() {
    let mut backend = FfmpegCliBackend::new(FfmpegCliOpts::default());
    assert!(matches!(
        backend.write_file("frame_000001.png", b"x"),
        Err(VfsError::NotLoaded)
    ));
    assert!(matches!(
        backend.read_file("output.mp4"),
        Err(VfsError::NotLoaded)
    ));
    assert!(!backend.exists("output.mp4"));
    assert!(backend.scratch_dir().is_none());
}

#[test]
fn load_fails_cleanly_without_ffmpeg() {
    let mut backend = FfmpegCliBackend::new(missing_binary_opts());
    let err = backend.load().unwrap_err();
    assert!(err.to_string().contains("stillreel-no-such-ffmpeg-binary"));
    assert!(backend.version().is_none());
    assert!(backend.scratch_dir().is_none());
}

#[test]
fn scratch_filesystem_round_trip_when_ffmpeg_is_available() {
    if !is_ffmpeg_on_path() {
        return;
    }
    let root = tempfile::tempdir().unwrap();
    let mut backend = FfmpegCliBackend::new(FfmpegCliOpts {
        ffmpeg_path: PathBuf::from("ffmpeg"),
        scratch_root: Some(root.path().to_path_buf()),
    });
    backend.load().unwrap();
    assert!(backend.version().unwrap().starts_with("ffmpeg"));
    assert!(backend.scratch_dir().unwrap().starts_with(root.path()));

    backend.write_file("frame_000001.png", b"abc").unwrap();
    assert!(backend.exists("frame_000001.png"));
    assert_eq!(backend.read_file("frame_000001.png").unwrap(), b"abc");
    assert!(backend.remove_if_exists("frame_000001.png").unwrap());
    assert!(!backend.remove_if_exists("frame_000001.png").unwrap());
    assert!(backend.unlink("frame_000001.png").unwrap_err().is_not_found());
    assert!(matches!(
        backend.write_file("../escape.png", b"x"),
        Err(VfsError::InvalidPath { .. })
    ));
}

#[cfg(unix)]
#[test]
fn unreadable_progress_stops_the_child() {
    use std::os::unix::fs::PermissionsExt as _;

    use crate::encoder::backend::FrameLayout;

    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("fake-ffmpeg");
    std::fs::write(
        &script,
        "#!/bin/sh\n\
         if [ \"$1\" = \"-version\" ]; then echo 'ffmpeg version fake'; exit 0; fi\n\
         printf 'frame=1\\n\\377\\376\\n'\n\
         sleep 2 </dev/null >/dev/null 2>&1\n\
         echo late > output.mp4\n",
    )
    .unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

    let scratch_root = dir.path().join("scratch");
    std::fs::create_dir(&scratch_root).unwrap();
    let mut backend = FfmpegCliBackend::new(FfmpegCliOpts {
        ffmpeg_path: script,
        scratch_root: Some(scratch_root),
    });
    backend.load().unwrap();
    assert_eq!(backend.version(), Some("ffmpeg version fake"));

    let cmd = EncodeCommand::h264_sequence(&FrameLayout::default(), "png", 1);
    let err = backend.run(&cmd, &mut |_| {}).unwrap_err();
    assert!(err.to_string().contains("progress"), "{err}");

    std::thread::sleep(std::time::Duration::from_secs(3));
    assert!(!backend.exists("output.mp4"));
}
