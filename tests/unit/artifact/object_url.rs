use super::*;

#[test]
fn urls_are_unique_and_revocable() {
    let mut reg = ObjectUrlRegistry::new();
    let a = reg.create(Blob::new(b"a".to_vec(), MP4_MIME));
    let b = reg.create(Blob::new(b"b".to_vec(), MP4_MIME));
    assert_ne!(a, b);
    assert!(a.as_str().starts_with("blob:"));
    assert_eq!(reg.live_count(), 2);

    assert!(reg.revoke(&a));
    assert!(!reg.revoke(&a));
    assert!(reg.resolve(&a).is_none());
    assert_eq!(reg.resolve(&b).unwrap().bytes(), b"b");
    assert_eq!(reg.live_count(), 1);
}

#[test]
fn blob_keeps_its_mime() {
    let blob = Blob::new(vec![1u8, 2, 3], MP4_MIME);
    assert_eq!(blob.mime(), "video/mp4");
    assert_eq!(blob.len(), 3);
    assert!(!blob.is_empty());
}

#[test]
fn save_to_writes_live_blobs_only() {
    let dir = tempfile::tempdir().unwrap();
    let mut reg = ObjectUrlRegistry::new();
    let link = DownloadLink {
        href: reg.create(Blob::new(b"mp4 bytes".to_vec(), MP4_MIME)),
        file_name: "sequence.mp4".into(),
    };

    let out = dir.path().join("nested").join("sequence.mp4");
    assert_eq!(link.save_to(&reg, &out).unwrap(), 9);
    assert_eq!(std::fs::read(&out).unwrap(), b"mp4 bytes");

    reg.revoke(&link.href);
    assert!(link.save_to(&reg, &out).is_err());
}
