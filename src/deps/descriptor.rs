//! Dependency descriptor types.

use std::path::{Path, PathBuf};

use crate::error::{Result, RiggerError};

/// Which flag a tool answers its version to.
///
/// Most tools take `--version`; OpenSSL takes a bare `version`. This varies
/// per tool and is looked up from the descriptor, never assumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionFlag {
    /// `--version`
    Long,
    /// `version`
    Bare,
}

impl VersionFlag {
    /// The argument to pass to the tool.
    pub fn as_arg(&self) -> &'static str {
        match self {
            Self::Long => "--version",
            Self::Bare => "version",
        }
    }
}

/// Where a dependency's binary lives inside its extracted archive.
///
/// Conventions are per-dependency data, not code: an archive dependency
/// without a layout is a registry gap and fails loudly at install time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveLayout {
    /// The archive extracts to a single versioned subdirectory which holds
    /// `bin/<exe>` (the ffmpeg shared builds).
    NestedBin {
        /// Executable name under `bin/`.
        exe: &'static str,
    },
    /// The wanted file sits directly in the extraction root (libmpv).
    RootFile {
        /// File name at the root.
        file: &'static str,
    },
}

impl ArchiveLayout {
    /// Derive the binary path from an extracted tree.
    ///
    /// The extracted tree not matching the convention is an extraction
    /// fault; returning a guessed path would poison the resolution state.
    pub fn derive(&self, extract_dir: &Path) -> Result<PathBuf> {
        match self {
            Self::NestedBin { exe } => {
                let mut subdirs: Vec<PathBuf> = std::fs::read_dir(extract_dir)?
                    .filter_map(|e| e.ok())
                    .map(|e| e.path())
                    .filter(|p| p.is_dir())
                    .collect();
                subdirs.sort();
                let first = subdirs.first().ok_or_else(|| RiggerError::Extract {
                    path: extract_dir.to_path_buf(),
                    message: "expected a subdirectory inside the extracted archive".into(),
                })?;
                let bin = first.join("bin").join(exe);
                if !bin.exists() {
                    return Err(RiggerError::Extract {
                        path: extract_dir.to_path_buf(),
                        message: format!("expected {} under the extracted tree", bin.display()),
                    });
                }
                Ok(bin)
            }
            Self::RootFile { file } => {
                let path = extract_dir.join(file);
                if !path.exists() {
                    return Err(RiggerError::Extract {
                        path: extract_dir.to_path_buf(),
                        message: format!("expected {file} at the extraction root"),
                    });
                }
                Ok(path)
            }
        }
    }
}

/// Everything the resolver knows about one external build dependency.
///
/// Patterns use `*` wildcards per path segment. A leading `:` marks a
/// drive-relative pattern (the drive root is substituted during the scan);
/// anything else is resolved relative to the working directory.
#[derive(Debug, Clone)]
pub struct DependencyDescriptor {
    /// Canonical lowercased key, used in the resolution state.
    pub name: &'static str,
    /// Human-facing name for prompts and messages.
    pub display_name: &'static str,
    /// Command line testing presence on PATH. Empty means the dependency
    /// has no meaningful PATH probe (a library or a batch file) and
    /// resolution goes straight to the install-path scan.
    pub probe: &'static [&'static str],
    /// Flag used to re-verify a scanned path, None to accept it as-is.
    pub version_probe: Option<VersionFlag>,
    /// Install-path patterns, tried per drive in order.
    pub install_patterns: &'static [&'static str],
    /// Companion subcomponents verified alongside the main match.
    /// Absence is reported as a warning and does not block resolution.
    pub companions: &'static [&'static str],
    /// Where to fetch an installer or archive when resolution fails.
    pub download_url: &'static str,
    /// Binary location convention inside a downloaded archive.
    pub archive_layout: Option<ArchiveLayout>,
    /// Reminder printed before launching an interactive installer.
    pub install_note: Option<&'static str>,
}

impl DependencyDescriptor {
    /// True when the descriptor has a PATH probe.
    pub fn has_probe(&self) -> bool {
        !self.probe.is_empty()
    }
}
