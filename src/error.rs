//! Error types for rigger operations.
//!
//! This module defines [`RiggerError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `RiggerError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `RiggerError::Other`) for unexpected errors
//! - Every error kind maps to a distinct process exit status via
//!   [`RiggerError::exit_code`], so scripts wrapping rigger can tell an
//!   unresolved dependency from a failed download from a broken build step

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for rigger operations.
#[derive(Debug, Error)]
pub enum RiggerError {
    /// Failed to parse the resolution-state configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// A dependency probe failed for a reason other than "not found on PATH"
    /// (permission denied, broken executable, ...). Not-found is recovered
    /// internally by the install-path scan and never surfaces here.
    #[error("Probe for '{dependency}' failed: {message}")]
    Probe { dependency: String, message: String },

    /// A build step needs a dependency that was never resolved.
    #[error("Dependency '{dependency}' is not resolved; run `rigger resolve` first")]
    Unresolved { dependency: String },

    /// HTTP download failed (non-2xx status, connection error, ...).
    #[error("Download from {url} failed: {message}")]
    Network { url: String, message: String },

    /// A downloaded archive has no configured layout convention, so the
    /// installed binary's location cannot be derived. This is a registry
    /// gap, not a runtime condition.
    #[error("No archive layout is configured for '{dependency}'")]
    ArchiveLayout { dependency: String },

    /// Archive extraction failed or the extracted tree did not match the
    /// configured layout.
    #[error("Failed to extract {path}: {message}")]
    Extract { path: PathBuf, message: String },

    /// An external build or staging step failed.
    #[error("Build step '{step}' failed: {message}")]
    BuildStep { step: String, message: String },

    /// The operator interrupted a prompt (Ctrl-C / Esc).
    #[error("Interrupted by operator")]
    Interrupted,

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RiggerError {
    /// Map this error to a process exit status.
    ///
    /// 2 = unresolved dependency, 3 = network/install fault,
    /// 4 = build-step fault, 130 = operator interrupt, 1 = anything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Unresolved { .. } => 2,
            Self::Network { .. } | Self::ArchiveLayout { .. } | Self::Extract { .. } => 3,
            Self::BuildStep { .. } => 4,
            Self::Interrupted => 130,
            _ => 1,
        }
    }

    /// True when this error came from an operator interrupt.
    pub fn is_interrupt(&self) -> bool {
        match self {
            Self::Interrupted => true,
            Self::Io(e) => e.kind() == std::io::ErrorKind::Interrupted,
            _ => false,
        }
    }
}

/// Result type alias for rigger operations.
pub type Result<T> = std::result::Result<T, RiggerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_parse_displays_path_and_message() {
        let err = RiggerError::ConfigParse {
            path: PathBuf::from("/proj/.rigger/config.json"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("config.json"));
        assert!(msg.contains("invalid syntax"));
    }

    #[test]
    fn probe_displays_dependency_and_message() {
        let err = RiggerError::Probe {
            dependency: "git".into(),
            message: "permission denied".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("git"));
        assert!(msg.contains("permission denied"));
    }

    #[test]
    fn unresolved_displays_dependency() {
        let err = RiggerError::Unresolved {
            dependency: "qt".into(),
        };
        assert!(err.to_string().contains("qt"));
    }

    #[test]
    fn network_displays_url() {
        let err = RiggerError::Network {
            url: "https://example.com/tool.zip".into(),
            message: "HTTP 404".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("https://example.com/tool.zip"));
        assert!(msg.contains("404"));
    }

    #[test]
    fn build_step_displays_step_and_message() {
        let err = RiggerError::BuildStep {
            step: "configure".into(),
            message: "cmake exited with code 1".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("configure"));
        assert!(msg.contains("cmake"));
    }

    #[test]
    fn exit_codes_are_distinct_per_taxonomy() {
        assert_eq!(
            RiggerError::Unresolved {
                dependency: "qt".into()
            }
            .exit_code(),
            2
        );
        assert_eq!(
            RiggerError::Network {
                url: "u".into(),
                message: "m".into()
            }
            .exit_code(),
            3
        );
        assert_eq!(
            RiggerError::ArchiveLayout {
                dependency: "mpv".into()
            }
            .exit_code(),
            3
        );
        assert_eq!(
            RiggerError::BuildStep {
                step: "s".into(),
                message: "m".into()
            }
            .exit_code(),
            4
        );
        assert_eq!(RiggerError::Interrupted.exit_code(), 130);
        assert_eq!(RiggerError::Io(std::io::Error::other("x")).exit_code(), 1);
    }

    #[test]
    fn is_interrupt_matches_interrupted_io() {
        let io = RiggerError::Io(std::io::Error::new(
            std::io::ErrorKind::Interrupted,
            "ctrl-c",
        ));
        assert!(io.is_interrupt());
        assert!(RiggerError::Interrupted.is_interrupt());
        assert!(!RiggerError::Io(std::io::Error::other("x")).is_interrupt());
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(RiggerError::Unresolved {
                dependency: "test".into(),
            })
        }
        assert!(returns_error().is_err());
    }
}
