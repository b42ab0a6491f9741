use std::path::Path;

use crate::foundation::error::LoadError;
use crate::probe::capability::CapabilityReport;

/// Page shown instead of the converter when the platform lacks something it needs.
pub fn render_unsupported(report: &CapabilityReport) -> String {
    let mut page = String::from(
        "This system cannot run the converter.\n\
         The following capabilities are missing:\n",
    );
    for check in report.missing() {
        page.push_str(&format!("  - {}: {}\n", check.name, check.detail));
    }
    page.push_str("Use a build and platform that provide them and try again.\n");
    page
}

/// Troubleshooting page shown when the encoder could not be loaded.
pub fn render_load_failure(err: &LoadError, ffmpeg: &Path) -> String {
    format!(
        "The video encoder could not be loaded.\n\
         \n\
         Reason: {err}\n\
         \n\
         Check that:\n\
         \x20 - ffmpeg is installed ('{}' was used),\n\
         \x20 - it runs from this shell ('{} -version'),\n\
         \x20 - the temporary directory is writable.\n\
         \n\
         Pass --ffmpeg <PATH> or set \"ffmpeg_path\" in the config file to use another binary.\n",
        ffmpeg.display(),
        ffmpeg.display(),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/view/pages.rs"]
mod tests;
