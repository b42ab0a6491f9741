use super::*;

#[test]
fn staging_spans_zero_to_thirty() {
    assert_eq!(staging_percent(0, 3), 0);
    assert_eq!(staging_percent(1, 3), 10);
    assert_eq!(staging_percent(2, 3), 20);
    assert_eq!(staging_percent(3, 3), 30);
    assert_eq!(staging_percent(1, 7), 4);
    assert_eq!(staging_percent(5, 0), 0);
}

#[test]
fn encoding_spans_thirty_to_hundred_and_clamps() {
    assert_eq!(encode_percent(0.0), 30);
    assert_eq!(encode_percent(0.5), 65);
    assert_eq!(encode_percent(1.0), 100);
    assert_eq!(encode_percent(2.0), 100);
    assert_eq!(encode_percent(-1.0), 0);
    assert_eq!(encode_percent(f64::NAN), 30);
}

#[test]
fn both_phases_are_monotonic() {
    let total = 17;
    let staging: Vec<u8> = (1..=total).map(|i| staging_percent(i, total)).collect();
    let encoding: Vec<u8> = (0..=100).map(|i| encode_percent(f64::from(i) / 100.0)).collect();
    let all: Vec<u8> = staging.into_iter().chain(encoding).collect();
    assert!(all.windows(2).all(|w| w[0] <= w[1]), "{all:?}");
}

#[test]
fn labels_carry_the_percent() {
    assert_eq!(staging_label(20), "preparing frames 20%");
    assert_eq!(encode_label(65), "converting 65%");
}
