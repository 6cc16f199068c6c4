//! Package version extraction.
//!
//! The shell's qmake project file carries a `VERSION=` assignment; that
//! version keys the URL of the server companion artifact.

use std::sync::OnceLock;

use regex::Regex;

use super::{SERVER_ARTIFACT, SERVER_ARTIFACT_BASE};

fn version_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)^\s*VERSION\s*=\s*(\S+)").expect("version regex is valid")
    })
}

/// Extract the package version from the qmake project file contents.
pub fn extract_package_version(project_file: &str) -> Option<String> {
    version_re()
        .captures(project_file)
        .map(|caps| caps[1].to_string())
}

/// URL of the server companion artifact for a package version.
pub fn server_artifact_url(version: &str) -> String {
    format!("{SERVER_ARTIFACT_BASE}/v{version}/{SERVER_ARTIFACT}")
}
