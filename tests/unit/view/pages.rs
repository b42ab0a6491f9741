use super::*;
use crate::probe::capability::CapabilityCheck;

#[test]
fn unsupported_page_lists_only_missing_checks() {
    let report = CapabilityReport {
        checks: vec![
            CapabilityCheck {
                name: "threads",
                supported: true,
                detail: "ok".into(),
            },
            CapabilityCheck {
                name: "scratch-dir",
                supported: false,
                detail: "read-only filesystem".into(),
            },
        ],
    };
    let page = render_unsupported(&report);
    assert!(page.contains("scratch-dir: read-only filesystem"));
    assert!(!page.contains("threads"));
}

#[test]
fn load_failure_page_names_reason_and_binary() {
    let page = render_load_failure(
        &LoadError::failed("not found"),
        Path::new("/usr/local/bin/ffmpeg"),
    );
    assert!(page.contains("not found"));
    assert!(page.contains("/usr/local/bin/ffmpeg -version"));
}
