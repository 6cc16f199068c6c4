//! rigger - build-dependency resolution and build orchestration.
//!
//! rigger bootstraps the Windows build of the Stremio desktop shell: it
//! locates the external tools and libraries the build needs (PATH probes,
//! install-path scans across all logical drives, interactive fallbacks with
//! download-and-install), persists what it found to a small configuration
//! file, and then drives the native build and artifact staging.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`deps`] - Dependency descriptors and the built-in registry
//! - [`drives`] - Logical drive enumeration
//! - [`error`] - Error types and result aliases
//! - [`resolve`] - Probe strategy, resolution state, interactive fallback
//! - [`fetch`] - Download and install of missing dependencies
//! - [`build`] - Native build orchestration and artifact staging
//! - [`shell`] - External process execution
//! - [`ui`] - Interactive prompts, spinners, and terminal output
//!
//! # Example
//!
//! ```
//! use rigger::resolve::ResolutionState;
//!
//! let mut state = ResolutionState::seeded(["git", "cmake"]);
//! state.set("git", "C:\\Program Files\\Git\\cmd\\git.exe");
//! assert!(state.is_resolved("git"));
//! assert_eq!(state.unresolved_names(), vec!["cmake"]);
//! ```

pub mod build;
pub mod cli;
pub mod deps;
pub mod drives;
pub mod error;
pub mod fetch;
pub mod resolve;
pub mod shell;
pub mod ui;

pub use error::{Result, RiggerError};
