//! The build driver.
//!
//! Sequences the external build and staging steps against a resolution
//! state. Steps run strictly in order; the first failure aborts the run
//! with the step name and the last captured process output. Copies are
//! independent and there is no rollback, so a failed run leaves a partial
//! distribution directory behind — the caller reports that in its final
//! status.

use std::fs;
use std::path::{Path, PathBuf};

use crate::build::{artifacts, version};
use crate::error::{Result, RiggerError};
use crate::fetch::Downloader;
use crate::resolve::ResolutionState;
use crate::shell::{execute, CommandOptions};
use crate::ui::{download_bar, UserInterface};

use super::{
    DIST_DIR, MSVC_RUNTIME_SOURCE, SERVER_ARTIFACT, SHELL_DIR, SHELL_EXE, SHELL_PROJECT_FILE,
    SHELL_REPO_URL,
};

/// Drives the native build using resolved dependency paths.
pub struct BuildDriver<'a> {
    project_root: PathBuf,
    state: &'a ResolutionState,
    downloader: Downloader,
    package_version: Option<String>,
}

impl<'a> BuildDriver<'a> {
    /// Create a driver for a project root and resolution state.
    pub fn new(project_root: impl Into<PathBuf>, state: &'a ResolutionState) -> Self {
        let project_root = project_root.into();
        let staging = project_root.join(crate::resolve::state::CONFIG_DIR).join("staging");
        Self {
            project_root,
            state,
            downloader: Downloader::new(staging),
            package_version: None,
        }
    }

    /// The shell source tree.
    pub fn shell_dir(&self) -> PathBuf {
        self.project_root.join(SHELL_DIR)
    }

    /// The distribution directory inside the shell tree.
    pub fn dist_dir(&self) -> PathBuf {
        self.shell_dir().join(DIST_DIR)
    }

    /// Dependencies the staging steps copy from. Unresolved entries here
    /// make the build fail early with a clear message instead of half-way
    /// through a copy sequence.
    pub fn required_dependencies() -> &'static [&'static str] {
        &["vs_community", "qt", "openssl", "ffmpeg", "mpv"]
    }

    /// Names from [`Self::required_dependencies`] missing from a state.
    pub fn missing_dependencies(state: &ResolutionState) -> Vec<&'static str> {
        Self::required_dependencies()
            .iter()
            .copied()
            .filter(|name| !state.is_resolved(name))
            .collect()
    }

    /// Run all build steps in order.
    pub fn run(&mut self, ui: &mut dyn UserInterface) -> Result<()> {
        let steps: &[(&str, fn(&mut Self, &mut dyn UserInterface) -> Result<()>)] = &[
            ("prepare-source", Self::prepare_source),
            ("package-version", Self::read_package_version),
            ("server-companion", Self::fetch_server_companion),
            ("configure-compile", Self::configure_and_compile),
            ("prepare-dist", Self::prepare_dist),
            ("stage-shell-exe", Self::stage_shell_exe),
            ("stage-msvc-runtime", Self::stage_msvc_runtime),
            ("stage-mpv-library", Self::stage_mpv_library),
            ("stage-plugins", Self::stage_plugins),
            ("stage-server-companion", Self::stage_server_companion),
            ("stage-crypto-library", Self::stage_crypto_library),
            ("stage-node", Self::stage_node),
            ("stage-ffmpeg", Self::stage_ffmpeg),
            ("deploy-qt", Self::deploy_qt),
        ];

        for (name, step) in steps {
            tracing::debug!(step = %name, "running build step");
            step(self, ui).map_err(|e| match e {
                // Keep the taxonomy: unresolved dependencies and already
                // attributed step faults pass through unchanged.
                RiggerError::Unresolved { .. } | RiggerError::BuildStep { .. } => e,
                other => RiggerError::BuildStep {
                    step: name.to_string(),
                    message: other.to_string(),
                },
            })?;
        }

        ui.success(&format!(
            "Build complete! The distribution is in {}.",
            self.dist_dir().display()
        ));
        Ok(())
    }

    /// Resolved path for a dependency, relative entries anchored at the
    /// project root.
    fn require(&self, name: &str) -> Result<PathBuf> {
        let path = self
            .state
            .resolved_path(name)
            .ok_or_else(|| RiggerError::Unresolved {
                dependency: name.to_string(),
            })?;
        if path.is_absolute() {
            Ok(path)
        } else {
            Ok(self.project_root.join(path))
        }
    }

    fn prepare_source(&mut self, ui: &mut dyn UserInterface) -> Result<()> {
        if self.shell_dir().exists() {
            ui.message("Shell source tree already present; skipping clone.");
            return Ok(());
        }

        ui.message("Cloning the shell repository...");
        let git = self
            .state
            .resolved_path("git")
            .unwrap_or_else(|| PathBuf::from("git"));
        let command = format!(
            "\"{}\" clone --recursive {}",
            git.display(),
            SHELL_REPO_URL
        );
        self.run_step_command("prepare-source", &command, &self.project_root, ui)
    }

    fn read_package_version(&mut self, ui: &mut dyn UserInterface) -> Result<()> {
        let path = self.shell_dir().join(SHELL_PROJECT_FILE);
        let contents = fs::read_to_string(&path).map_err(|e| RiggerError::BuildStep {
            step: "package-version".into(),
            message: format!("cannot read {}: {e}", path.display()),
        })?;

        let version =
            version::extract_package_version(&contents).ok_or_else(|| RiggerError::BuildStep {
                step: "package-version".into(),
                message: format!("no VERSION assignment in {}", path.display()),
            })?;

        ui.message(&format!("Shell package version: {version}"));
        self.package_version = Some(version);
        Ok(())
    }

    fn fetch_server_companion(&mut self, ui: &mut dyn UserInterface) -> Result<()> {
        let dest = self.shell_dir().join(SERVER_ARTIFACT);
        if dest.exists() {
            ui.message("Server companion already present; skipping download.");
            return Ok(());
        }

        let version = self.package_version.as_deref().ok_or_else(|| {
            RiggerError::BuildStep {
                step: "server-companion".into(),
                message: "package version was not extracted".into(),
            }
        })?;
        let url = version::server_artifact_url(version);

        let visible = ui.output_mode().shows_spinners();
        let mut bar: Option<indicatif::ProgressBar> = None;
        self.downloader.fetch_to(&url, &dest, &mut |pos, total| {
            let bar =
                bar.get_or_insert_with(|| download_bar("Downloading server.js", total, visible));
            bar.set_position(pos);
        })?;
        if let Some(bar) = bar {
            bar.finish_and_clear();
        }
        ui.success("Server companion downloaded.");
        Ok(())
    }

    fn configure_and_compile(&mut self, ui: &mut dyn UserInterface) -> Result<()> {
        let vcvars = self.require("vs_community")?;
        let qt = self.require("qt")?;
        let prefix = artifacts::qt_cmake_prefix(&qt).ok_or_else(|| RiggerError::BuildStep {
            step: "configure-compile".into(),
            message: format!(
                "cannot derive the Qt CMake prefix from {}",
                qt.display()
            ),
        })?;

        ui.message("Building the shell...");
        let command = format!(
            "\"{}\" && cmake -G \"NMake Makefiles\" -DCMAKE_PREFIX_PATH=\"{}\" -DCMAKE_BUILD_TYPE=Release . && cmake --build .",
            vcvars.display(),
            prefix.display()
        );
        self.run_step_command("configure-compile", &command, &self.shell_dir(), ui)
    }

    fn prepare_dist(&mut self, ui: &mut dyn UserInterface) -> Result<()> {
        let dist = self.dist_dir();
        if dist.exists() {
            fs::remove_dir_all(&dist)?;
        }
        fs::create_dir_all(&dist)?;
        ui.message(&format!("Recreated {}.", dist.display()));
        Ok(())
    }

    fn stage_shell_exe(&mut self, ui: &mut dyn UserInterface) -> Result<()> {
        self.copy_into_dist(&self.shell_dir().join(SHELL_EXE), SHELL_EXE, ui)
    }

    fn stage_msvc_runtime(&mut self, ui: &mut dyn UserInterface) -> Result<()> {
        let src = Path::new(MSVC_RUNTIME_SOURCE);
        let name = src
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.copy_into_dist(src, &name, ui)
    }

    fn stage_mpv_library(&mut self, ui: &mut dyn UserInterface) -> Result<()> {
        let src = self.require("mpv")?;
        let file_name = src
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let deploy_name = artifacts::mpv_deploy_name(&file_name);
        self.copy_into_dist(&src, &deploy_name, ui)
    }

    fn stage_plugins(&mut self, ui: &mut dyn UserInterface) -> Result<()> {
        let src = self.shell_dir().join("windows").join("DS");
        let dest = self.dist_dir().join("DS");
        ui.message(&format!(
            "Copying {} -> {}",
            src.display(),
            dest.display()
        ));
        artifacts::copy_tree(&src, &dest)
    }

    fn stage_server_companion(&mut self, ui: &mut dyn UserInterface) -> Result<()> {
        self.copy_into_dist(&self.shell_dir().join(SERVER_ARTIFACT), SERVER_ARTIFACT, ui)
    }

    fn stage_crypto_library(&mut self, ui: &mut dyn UserInterface) -> Result<()> {
        let openssl = self.require("openssl")?;
        let src = artifacts::crypto_library_path(&openssl);
        let name = src
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.copy_into_dist(&src, &name, ui)
    }

    fn stage_node(&mut self, ui: &mut dyn UserInterface) -> Result<()> {
        // Prefer the resolved nodejs binary; fall back to a PATH scan for
        // installs that only registered themselves on PATH.
        let resolved = self
            .state
            .resolved_path("nodejs")
            .filter(|p| p.is_file());
        let src = resolved
            .or_else(artifacts::find_node_in_path)
            .ok_or_else(|| RiggerError::Unresolved {
                dependency: "nodejs".into(),
            })?;
        self.copy_into_dist(&src, "node.exe", ui)
    }

    fn stage_ffmpeg(&mut self, ui: &mut dyn UserInterface) -> Result<()> {
        let src = self.require("ffmpeg")?;
        self.copy_into_dist(&src, "ffmpeg.exe", ui)
    }

    fn deploy_qt(&mut self, ui: &mut dyn UserInterface) -> Result<()> {
        let qt = self.require("qt")?;
        ui.message("Deploying Qt dependencies...");
        let target = Path::new(DIST_DIR).join(SHELL_EXE);
        let command = format!(
            "\"{}\" --qmldir . \"{}\"",
            qt.display(),
            target.display()
        );
        self.run_step_command("deploy-qt", &command, &self.shell_dir(), ui)
    }

    /// Copy a file into the distribution directory under a target name.
    fn copy_into_dist(
        &self,
        src: &Path,
        dest_name: &str,
        ui: &mut dyn UserInterface,
    ) -> Result<()> {
        let dest = self.dist_dir().join(dest_name);
        ui.message(&format!(
            "Copying {} -> {}",
            src.display(),
            dest.display()
        ));
        fs::copy(src, &dest)?;
        Ok(())
    }

    /// Run an external command for a step, surfacing the output tail on
    /// failure. Verbose mode streams output instead of capturing it.
    fn run_step_command(
        &self,
        step: &str,
        command: &str,
        cwd: &Path,
        ui: &mut dyn UserInterface,
    ) -> Result<()> {
        let capture = !ui.output_mode().shows_command_output();
        let options = CommandOptions {
            cwd: Some(cwd.to_path_buf()),
            capture_stdout: capture,
            capture_stderr: capture,
            ..Default::default()
        };

        let result = execute(command, &options)?;
        if result.success {
            Ok(())
        } else {
            Err(RiggerError::BuildStep {
                step: step.to_string(),
                message: format!(
                    "`{}` exited with code {:?}\n{}",
                    command,
                    result.exit_code,
                    result.output_tail(20)
                ),
            })
        }
    }
}
