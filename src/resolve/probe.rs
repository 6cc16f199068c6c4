//! The probe strategy.
//!
//! `resolve(descriptor)` tries, in order:
//!
//! 1. The PATH probe: invoke the descriptor's probe command. Exit 0 means
//!    found; the command's first argument is recorded as the resolved path
//!    and the first stdout line as the displayed version.
//! 2. The install-path scan: expand each pattern against each drive in
//!    enumeration order. The first match wins and no further drives are
//!    consulted. A scanned match is re-verified with the descriptor's
//!    version flag so a version line is still captured.
//!
//! Spawn errors other than not-found (permission denied, broken binaries)
//! are classified and surfaced as probe faults instead of crashing the run.
//! Companion subcomponents missing next to a match produce warnings, or an
//! error in strict mode.

use std::time::Duration;

use crate::deps::DependencyDescriptor;
use crate::drives::DriveSet;
use crate::error::{Result, RiggerError};
use crate::resolve::patterns;
use crate::shell::{ProcessRunner, SpawnFailure};

/// Pacing before each probe invocation. Console readability only.
const PROBE_PACING: Duration = Duration::from_millis(150);

/// Pacing between drives during the scan.
const SCAN_PACING: Duration = Duration::from_millis(50);

/// How a dependency was located.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// The probe command succeeded on PATH.
    Path,
    /// An install-path pattern matched during the drive scan.
    DriveScan,
}

/// Outcome of resolving one dependency.
#[derive(Debug, Clone)]
pub enum Resolution {
    /// The dependency was located.
    Found {
        /// Resolved path (the probe command's first argument for PATH
        /// finds; the matched filesystem path for scan finds).
        path: String,
        /// First stdout line of the version probe, when one ran and passed.
        version: Option<String>,
        /// Which strategy located it.
        origin: Origin,
        /// Companion subcomponents that were missing next to the match.
        warnings: Vec<String>,
    },
    /// All strategies exhausted without a match.
    Unresolved,
}

impl Resolution {
    /// The resolved path, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Found { path, .. } => Some(path),
            Self::Unresolved => None,
        }
    }
}

/// Resolves dependencies against a process runner and a drive set.
pub struct Resolver<'a> {
    runner: &'a dyn ProcessRunner,
    drives: &'a DriveSet,
    probe_pacing: Duration,
    scan_pacing: Duration,
    strict_companions: bool,
}

impl<'a> Resolver<'a> {
    /// Create a resolver with default pacing and lenient companion checks.
    pub fn new(runner: &'a dyn ProcessRunner, drives: &'a DriveSet) -> Self {
        Self {
            runner,
            drives,
            probe_pacing: PROBE_PACING,
            scan_pacing: SCAN_PACING,
            strict_companions: false,
        }
    }

    /// Disable pacing delays (tests).
    pub fn without_pacing(mut self) -> Self {
        self.probe_pacing = Duration::ZERO;
        self.scan_pacing = Duration::ZERO;
        self
    }

    /// Treat missing companion subcomponents as a probe fault instead of a
    /// warning.
    pub fn with_strict_companions(mut self, strict: bool) -> Self {
        self.strict_companions = strict;
        self
    }

    /// Resolve one dependency.
    pub fn resolve(&self, desc: &DependencyDescriptor) -> Result<Resolution> {
        if desc.has_probe() {
            match self.path_probe(desc)? {
                Some(resolution) => return Ok(resolution),
                None => {
                    tracing::debug!(dependency = desc.name, "not on PATH, scanning drives");
                }
            }
        }

        self.scan_drives(desc)
    }

    /// Step 1: invoke the probe command. `Ok(Some)` means found on PATH,
    /// `Ok(None)` means fall through to the scan.
    fn path_probe(&self, desc: &DependencyDescriptor) -> Result<Option<Resolution>> {
        std::thread::sleep(self.probe_pacing);

        let program = desc.probe[0];
        let args = &desc.probe[1..];

        match self.runner.run(program, args) {
            Ok(output) if output.success() => Ok(Some(Resolution::Found {
                path: program.to_string(),
                version: Some(output.first_line().to_string()),
                origin: Origin::Path,
                warnings: Vec::new(),
            })),
            // Started but exited non-zero: treat like absent and scan.
            Ok(_) => Ok(None),
            Err(SpawnFailure::NotFound) => Ok(None),
            Err(failure) => Err(RiggerError::Probe {
                dependency: desc.name.to_string(),
                message: failure.to_string(),
            }),
        }
    }

    /// Step 2: expand install-path patterns drive by drive, first match wins.
    fn scan_drives(&self, desc: &DependencyDescriptor) -> Result<Resolution> {
        for drive in self.drives.iter() {
            std::thread::sleep(self.scan_pacing);

            for pattern in desc.install_patterns {
                let Some(found) = patterns::expand(pattern, &drive.root) else {
                    continue;
                };

                let warnings = self.check_companions(desc, &drive.root);
                if self.strict_companions && !warnings.is_empty() {
                    return Err(RiggerError::Probe {
                        dependency: desc.name.to_string(),
                        message: format!(
                            "companion components missing: {}",
                            warnings.join(", ")
                        ),
                    });
                }

                let path = found.to_string_lossy().into_owned();
                let version = self.verify_scanned(desc, &path);

                return Ok(Resolution::Found {
                    path,
                    version,
                    origin: Origin::DriveScan,
                    warnings,
                });
            }
        }

        Ok(Resolution::Unresolved)
    }

    /// Expand companion patterns on the drive that produced the match.
    /// Missing companions are reported by pattern.
    fn check_companions(
        &self,
        desc: &DependencyDescriptor,
        drive_root: &std::path::Path,
    ) -> Vec<String> {
        desc.companions
            .iter()
            .filter(|pattern| patterns::expand(pattern, drive_root).is_none())
            .map(|pattern| pattern.to_string())
            .collect()
    }

    /// Re-run the probe against a scanned path to capture a version line.
    /// The path stays resolved even when verification fails; the operator
    /// sees the version gap in the output.
    fn verify_scanned(&self, desc: &DependencyDescriptor, path: &str) -> Option<String> {
        let flag = desc.version_probe?;

        std::thread::sleep(self.probe_pacing);
        match self.runner.run(path, &[flag.as_arg()]) {
            Ok(output) if output.success() => Some(output.first_line().to_string()),
            Ok(output) => {
                tracing::warn!(
                    dependency = desc.name,
                    exit_code = ?output.exit_code,
                    "version probe on scanned path did not succeed"
                );
                None
            }
            Err(failure) => {
                tracing::warn!(
                    dependency = desc.name,
                    error = %failure,
                    "version probe on scanned path failed to start"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deps::{DependencyDescriptor, VersionFlag};
    use crate::drives::DriveRoot;
    use crate::shell::MockRunner;
    use std::fs;
    use tempfile::TempDir;

    fn descriptor(
        probe: &'static [&'static str],
        patterns: &'static [&'static str],
    ) -> DependencyDescriptor {
        DependencyDescriptor {
            name: "tool",
            display_name: "Tool",
            probe,
            version_probe: Some(VersionFlag::Long),
            install_patterns: patterns,
            companions: &[],
            download_url: "https://example.com/tool.exe",
            archive_layout: None,
            install_note: None,
        }
    }

    #[test]
    fn found_on_path_returns_probe_program_and_skips_scan() {
        let runner = MockRunner::new();
        runner.succeed("tool", "tool version 1.2.3\n");
        let drives = DriveSet::from_roots(vec![DriveRoot::new('C', "/nonexistent")]);

        let resolver = Resolver::new(&runner, &drives).without_pacing();
        let desc = descriptor(&["tool", "--version"], &[":\\Program Files\\Tool"]);
        let resolution = resolver.resolve(&desc).unwrap();

        match resolution {
            Resolution::Found {
                path,
                version,
                origin,
                ..
            } => {
                assert_eq!(path, "tool");
                assert_eq!(version.as_deref(), Some("tool version 1.2.3"));
                assert_eq!(origin, Origin::Path);
            }
            Resolution::Unresolved => panic!("expected resolution"),
        }
        // Exactly the PATH probe ran; nothing else was invoked.
        assert_eq!(runner.invocation_count(), 1);
    }

    #[test]
    fn not_found_falls_back_to_drive_scan() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("Program Files").join("Tool");
        fs::create_dir_all(&target).unwrap();

        let runner = MockRunner::new(); // every spawn is NotFound
        let drives = DriveSet::from_roots(vec![DriveRoot::new('C', temp.path())]);

        let resolver = Resolver::new(&runner, &drives).without_pacing();
        let desc = descriptor(&["tool", "--version"], &[":\\Program Files\\Tool"]);
        let resolution = resolver.resolve(&desc).unwrap();

        match resolution {
            Resolution::Found { path, origin, .. } => {
                assert_eq!(path, target.to_string_lossy());
                assert_eq!(origin, Origin::DriveScan);
            }
            Resolution::Unresolved => panic!("expected scan match"),
        }
    }

    #[test]
    fn scan_stops_at_first_matching_drive() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        for dir in [&first, &second] {
            fs::create_dir_all(dir.path().join("Tool")).unwrap();
        }

        let runner = MockRunner::new();
        let drives = DriveSet::from_roots(vec![
            DriveRoot::new('C', first.path()),
            DriveRoot::new('D', second.path()),
        ]);

        let resolver = Resolver::new(&runner, &drives).without_pacing();
        let desc = descriptor(&[], &[":\\Tool"]);
        let resolution = resolver.resolve(&desc).unwrap();

        let path = resolution.path().unwrap().to_string();
        assert!(path.starts_with(&*first.path().to_string_lossy()));
    }

    #[test]
    fn scanned_path_is_reverified_with_version_flag() {
        let temp = TempDir::new().unwrap();
        let exe = temp.path().join("Tool").join("tool.exe");
        fs::create_dir_all(exe.parent().unwrap()).unwrap();
        fs::write(&exe, "").unwrap();
        let exe_str = exe.to_string_lossy().into_owned();

        let runner = MockRunner::new();
        // PATH probe name "tool" stays NotFound; the discovered absolute
        // path answers the version probe.
        runner.succeed(&exe_str, "tool 9.0\n");

        let drives = DriveSet::from_roots(vec![DriveRoot::new('C', temp.path())]);
        let resolver = Resolver::new(&runner, &drives).without_pacing();
        let desc = descriptor(&["tool", "--version"], &[":\\Tool\\tool.exe"]);

        match resolver.resolve(&desc).unwrap() {
            Resolution::Found { version, .. } => {
                assert_eq!(version.as_deref(), Some("tool 9.0"));
            }
            Resolution::Unresolved => panic!("expected resolution"),
        }

        let calls = runner.invocations();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].1, vec!["--version".to_string()]);
    }

    #[test]
    fn exhausted_drives_yield_unresolved() {
        let temp = TempDir::new().unwrap();
        let runner = MockRunner::new();
        let drives = DriveSet::from_roots(vec![DriveRoot::new('C', temp.path())]);

        let resolver = Resolver::new(&runner, &drives).without_pacing();
        let desc = descriptor(&["tool", "--version"], &[":\\Program Files\\Tool"]);
        assert!(matches!(
            resolver.resolve(&desc).unwrap(),
            Resolution::Unresolved
        ));
    }

    #[test]
    fn empty_drive_set_yields_unresolved() {
        let runner = MockRunner::new();
        let drives = DriveSet::from_roots(vec![]);

        let resolver = Resolver::new(&runner, &drives).without_pacing();
        let desc = descriptor(&[], &[":\\Program Files\\Tool"]);
        assert!(matches!(
            resolver.resolve(&desc).unwrap(),
            Resolution::Unresolved
        ));
    }

    #[test]
    fn permission_denied_is_a_classified_fault() {
        let runner = MockRunner::new();
        runner.fail_to_spawn("tool", SpawnFailure::PermissionDenied);
        let drives = DriveSet::from_roots(vec![]);

        let resolver = Resolver::new(&runner, &drives).without_pacing();
        let desc = descriptor(&["tool", "--version"], &[]);
        assert!(matches!(
            resolver.resolve(&desc),
            Err(RiggerError::Probe { .. })
        ));
    }

    #[test]
    fn non_zero_probe_exit_falls_back_to_scan() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("Tool")).unwrap();

        let runner = MockRunner::new();
        runner.fail_with_code("tool", 1);
        let drives = DriveSet::from_roots(vec![DriveRoot::new('C', temp.path())]);

        let resolver = Resolver::new(&runner, &drives).without_pacing();
        let desc = descriptor(&["tool", "--version"], &[":\\Tool"]);
        assert!(resolver.resolve(&desc).unwrap().path().is_some());
    }

    #[test]
    fn missing_companions_warn_but_resolve() {
        let temp = TempDir::new().unwrap();
        let bin = temp.path().join("Qt").join("msvc2017").join("bin");
        fs::create_dir_all(&bin).unwrap();
        fs::write(bin.join("windeployqt.exe"), "").unwrap();

        let runner = MockRunner::new();
        let drives = DriveSet::from_roots(vec![DriveRoot::new('C', temp.path())]);
        let resolver = Resolver::new(&runner, &drives).without_pacing();

        let desc = DependencyDescriptor {
            name: "qt",
            display_name: "Qt",
            probe: &[],
            version_probe: None,
            install_patterns: &[":\\Qt\\msvc*\\bin\\windeployqt.exe"],
            companions: &[":\\Qt\\installerResources\\qt.qt5.*.qtwebengine*"],
            download_url: "https://example.com/qt.exe",
            archive_layout: None,
            install_note: None,
        };

        match resolver.resolve(&desc).unwrap() {
            Resolution::Found { warnings, .. } => {
                assert_eq!(warnings.len(), 1);
                assert!(warnings[0].contains("qtwebengine"));
            }
            Resolution::Unresolved => panic!("expected resolution"),
        }
    }

    #[test]
    fn strict_companions_turn_warning_into_fault() {
        let temp = TempDir::new().unwrap();
        let bin = temp.path().join("Qt").join("msvc2017").join("bin");
        fs::create_dir_all(&bin).unwrap();
        fs::write(bin.join("windeployqt.exe"), "").unwrap();

        let runner = MockRunner::new();
        let drives = DriveSet::from_roots(vec![DriveRoot::new('C', temp.path())]);
        let resolver = Resolver::new(&runner, &drives)
            .without_pacing()
            .with_strict_companions(true);

        let desc = DependencyDescriptor {
            name: "qt",
            display_name: "Qt",
            probe: &[],
            version_probe: None,
            install_patterns: &[":\\Qt\\msvc*\\bin\\windeployqt.exe"],
            companions: &[":\\Qt\\installerResources\\qt.qt5.*.qtwebengine*"],
            download_url: "https://example.com/qt.exe",
            archive_layout: None,
            install_note: None,
        };

        assert!(matches!(
            resolver.resolve(&desc),
            Err(RiggerError::Probe { .. })
        ));
    }
}
