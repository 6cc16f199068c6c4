//! Native build orchestration.
//!
//! The build driver sequences the external steps that turn a resolved
//! dependency set into a distributable folder: prepare the shell source
//! tree, extract the package version, fetch the server companion artifact,
//! configure and compile, then stage artifacts and run the Qt deployment
//! tool. Steps run in order and the first failure aborts the run, naming
//! the step; there is no rollback, so a partial distribution directory is
//! left in place and reported.

pub mod artifacts;
pub mod driver;
pub mod version;

pub use driver::BuildDriver;

/// Git repository of the shell application.
pub const SHELL_REPO_URL: &str = "https://github.com/Stremio/stremio-shell.git";

/// Directory the clone produces under the project root.
pub const SHELL_DIR: &str = "stremio-shell";

/// qmake project file the package version is extracted from.
pub const SHELL_PROJECT_FILE: &str = "stremio.pro";

/// Primary executable produced by the build.
pub const SHELL_EXE: &str = "stremio.exe";

/// Distribution directory created inside the shell tree.
pub const DIST_DIR: &str = "dist-win";

/// Base URL for the version-keyed server companion artifact.
pub const SERVER_ARTIFACT_BASE: &str =
    "https://s3-eu-west-1.amazonaws.com/stremio-artifacts/four";

/// Server companion file name.
pub const SERVER_ARTIFACT: &str = "server.js";

/// Redistributable MSVC runtime staged alongside the executable.
pub const MSVC_RUNTIME_SOURCE: &str = "C:\\Windows\\System32\\msvcr120.dll";
