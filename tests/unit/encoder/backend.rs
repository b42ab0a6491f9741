use super::*;

#[test]
fn frame_names_are_one_based_and_six_digit_padded() {
    let layout = FrameLayout::default();
    assert_eq!(layout.frame_name(1, "png"), "frame_000001.png");
    assert_eq!(layout.frame_name(123_456, "jpg"), "frame_123456.jpg");
    assert_eq!(
        layout.frame_names(3, "png"),
        vec!["frame_000001.png", "frame_000002.png", "frame_000003.png"]
    );
    assert!(layout.frame_names(0, "png").is_empty());
}

#[test]
fn input_pattern_matches_frame_names() {
    assert_eq!(
        FrameLayout::default().input_pattern("webp"),
        "frame_%06d.webp"
    );
}

#[test]
fn h264_sequence_args_are_exact() {
    let cmd = EncodeCommand::h264_sequence(&FrameLayout::default(), "png", 3);
    assert_eq!(
        cmd.args().join(" "),
        "-framerate 30000/1001 -i frame_%06d.png -c:v libx264 -pix_fmt yuv420p output.mp4"
    );
    assert_eq!(cmd.frame_count, 3);
    assert_eq!(cmd.output, OUTPUT_NAME);
}

#[test]
fn scratch_names_must_be_bare() {
    check_scratch_name("frame_000001.png").unwrap();
    check_scratch_name("output.mp4").unwrap();
    for bad in ["", ".", "..", "../x.png", "a/b.png", "a\\b.png"] {
        assert!(matches!(
            check_scratch_name(bad),
            Err(VfsError::InvalidPath { .. })
        ));
    }
}
