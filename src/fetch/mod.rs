//! Download and install of missing dependencies.
//!
//! [`download`] streams installers and archives into the staging directory
//! with byte-level progress; [`install`] extracts archives (deriving the
//! binary path from the dependency's layout convention) or hands installer
//! executables to the operator.

pub mod download;
pub mod install;

pub use download::{ArtifactKind, DownloadedFile, Downloader};
pub use install::Installer;
