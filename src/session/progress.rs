/// Share of the bar used by frame staging; encoding fills the rest.
pub const STAGING_SPAN: f64 = 30.0;

/// Percent after staging `staged` of `total` frames: `round(staged / total * 30)`.
pub fn staging_percent(staged: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let ratio = staged.min(total) as f64 / total as f64;
    (ratio * STAGING_SPAN).round() as u8
}

/// Percent for an encoder ratio: `clamp(round(30 + r * 70), 0, 100)`.
pub fn encode_percent(ratio: f64) -> u8 {
    if ratio.is_nan() {
        return STAGING_SPAN as u8;
    }
    (STAGING_SPAN + ratio * (100.0 - STAGING_SPAN))
        .round()
        .clamp(0.0, 100.0) as u8
}

pub fn staging_label(percent: u8) -> String {
    format!("preparing frames {percent}%")
}

pub fn encode_label(percent: u8) -> String {
    format!("converting {percent}%")
}

pub const DONE_LABEL: &str = "100%";
pub const ERROR_LABEL: &str = "error";

#[cfg(test)]
#[path = "../../tests/unit/session/progress.rs"]
mod tests;
