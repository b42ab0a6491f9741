use super::*;

const BLOCK: &str = "frame=5\nfps=0.00\nstream_0_0_q=28.0\nout_time_us=166833\nspeed=N/A\n";

#[test]
fn ratio_is_emitted_once_per_block() {
    let mut p = ProgressParser::new(10);
    let emitted: Vec<f64> = BLOCK
        .lines()
        .chain(std::iter::once("progress=continue"))
        .filter_map(|l| p.feed_line(l))
        .collect();
    assert_eq!(emitted, vec![0.5]);
}

#[test]
fn end_block_reports_completion() {
    let mut p = ProgressParser::new(10);
    p.feed_line("frame=7");
    assert_eq!(p.feed_line("progress=end"), Some(1.0));
    assert_eq!(p.ratio(), 1.0);
}

#[test]
fn frame_counts_past_the_expected_total_are_clamped() {
    let mut p = ProgressParser::new(3);
    p.feed_line("frame=4");
    assert_eq!(p.feed_line("progress=continue"), Some(1.0));
}

#[test]
fn garbage_and_unknown_keys_are_ignored() {
    let mut p = ProgressParser::new(4);
    assert_eq!(p.feed_line(""), None);
    assert_eq!(p.feed_line("no separator"), None);
    assert_eq!(p.feed_line("frame=abc"), None);
    assert_eq!(p.feed_line("bitrate=N/A"), None);
    assert_eq!(p.feed_line("progress=continue"), Some(0.0));
}

#[test]
fn zero_expected_frames_stays_at_zero_until_end() {
    let mut p = ProgressParser::new(0);
    p.feed_line("frame=10");
    assert_eq!(p.feed_line("progress=continue"), Some(0.0));
    assert_eq!(p.feed_line("progress=end"), Some(1.0));
}
