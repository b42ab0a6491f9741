use super::*;

#[test]
fn ntsc_rate_formats_as_rational() {
    assert_eq!(Fps::NTSC_2997.to_string(), "30000/1001");
}

#[test]
fn display_keeps_the_ratio_unreduced() {
    let fps = Fps { num: 60, den: 2 };
    assert_eq!(fps.to_string(), "60/2");
}
