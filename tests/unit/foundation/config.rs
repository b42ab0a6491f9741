use super::*;

#[test]
fn defaults_match_the_download_contract() {
    let cfg = StillreelConfig::default();
    assert_eq!(cfg.ffmpeg_path, PathBuf::from("ffmpeg"));
    assert_eq!(cfg.download_name, "sequence.mp4");
    assert!(cfg.scratch_root.is_none());
    cfg.validate().unwrap();
}

#[test]
fn partial_json_keeps_defaults() {
    let cfg: StillreelConfig =
        serde_json::from_str(r#"{ "ffmpeg_path": "/opt/ffmpeg/bin/ffmpeg" }"#).unwrap();
    assert_eq!(cfg.ffmpeg_path, PathBuf::from("/opt/ffmpeg/bin/ffmpeg"));
    assert_eq!(cfg.download_name, "sequence.mp4");
}

#[test]
fn unknown_fields_are_rejected() {
    let res: Result<StillreelConfig, _> = serde_json::from_str(r#"{ "framerate": 25 }"#);
    assert!(res.is_err());
}

#[test]
fn download_name_must_be_a_file_name() {
    let cfg = StillreelConfig {
        download_name: "out/video.mp4".to_owned(),
        ..StillreelConfig::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn from_path_reads_and_validates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stillreel.json");
    std::fs::write(&path, r#"{ "download_name": "clip.mp4" }"#).unwrap();
    let cfg = StillreelConfig::from_path(&path).unwrap();
    assert_eq!(cfg.download_name, "clip.mp4");

    std::fs::write(&path, r#"{ "download_name": "" }"#).unwrap();
    assert!(StillreelConfig::from_path(&path).is_err());

    assert!(StillreelConfig::from_path(&dir.path().join("missing.json")).is_err());
}
