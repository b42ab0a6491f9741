use std::path::PathBuf;

/// Inputs to [`CapabilityReport::detect`].
#[derive(Clone, Debug, Default)]
pub struct ProbeOptions {
    /// Where the scratch check creates its directory. `None` uses the system temp dir.
    pub scratch_root: Option<PathBuf>,
}

/// Outcome of one check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapabilityCheck {
    pub name: &'static str,
    pub supported: bool,
    pub detail: String,
}

/// Every capability the converter relies on, checked up front.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapabilityReport {
    pub checks: Vec<CapabilityCheck>,
}

impl CapabilityReport {
    /// Run all checks. Build-time facts are resolved by `cfg!`; only the scratch directory check
    /// touches the system, and it removes what it creates.
    pub fn detect(opts: &ProbeOptions) -> Self {
        let checks = vec![
            build_check(
                "process-spawn",
                cfg!(not(target_family = "wasm")),
                "the build target can start child processes",
            ),
            build_check(
                "encoder-backend",
                cfg!(feature = "ffmpeg-cli"),
                "built with the `ffmpeg-cli` feature",
            ),
            build_check(
                "threads",
                cfg!(all(target_has_atomic = "ptr", not(target_family = "wasm"))),
                "the build target supports threads",
            ),
            scratch_check(opts),
        ];
        let report = Self { checks };
        tracing::debug!(supported = report.is_supported(), "capability probe finished");
        report
    }

    pub fn is_supported(&self) -> bool {
        self.checks.iter().all(|c| c.supported)
    }

    pub fn missing(&self) -> impl Iterator<Item = &CapabilityCheck> {
        self.checks.iter().filter(|c| !c.supported)
    }
}

fn build_check(name: &'static str, supported: bool, detail: &str) -> CapabilityCheck {
    CapabilityCheck {
        name,
        supported,
        detail: if supported {
            detail.to_owned()
        } else {
            format!("not available: {detail}")
        },
    }
}

fn scratch_check(opts: &ProbeOptions) -> CapabilityCheck {
    let mut builder = tempfile::Builder::new();
    builder.prefix("stillreel-probe-");
    let created = match opts.scratch_root.as_deref() {
        Some(root) => builder.tempdir_in(root),
        None => builder.tempdir(),
    };
    let (supported, detail) = match created.and_then(|dir| dir.close()) {
        Ok(()) => (true, "a scratch directory can be created".to_owned()),
        Err(e) => (false, format!("cannot create a scratch directory: {e}")),
    };
    CapabilityCheck {
        name: "scratch-dir",
        supported,
        detail,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/probe/capability.rs"]
mod tests;
