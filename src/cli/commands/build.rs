//! The `build` command: drive the native build from the persisted state.

use std::path::{Path, PathBuf};

use crate::build::BuildDriver;
use crate::cli::args::BuildArgs;
use crate::error::Result;
use crate::resolve::ResolutionState;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The build command implementation.
pub struct BuildCommand {
    project_root: PathBuf,
    #[allow(dead_code)]
    args: BuildArgs,
}

impl BuildCommand {
    /// Create a new build command.
    pub fn new(project_root: &Path, args: BuildArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }
}

impl Command for BuildCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(state) = ResolutionState::load(&self.project_root)? else {
            ui.error("No configuration found. Run `rigger resolve` first.");
            return Ok(CommandResult::failure(2));
        };

        run_build(&self.project_root, &state, ui)?;
        Ok(CommandResult::success())
    }
}

/// Run the build driver, reporting a leftover partial distribution
/// directory when a step fails.
pub fn run_build(
    project_root: &Path,
    state: &ResolutionState,
    ui: &mut dyn UserInterface,
) -> Result<()> {
    let missing = BuildDriver::missing_dependencies(state);
    if !missing.is_empty() {
        ui.warning(&format!(
            "Not all dependencies are resolved ({}); the build will stop at the first step that needs one.",
            missing.join(", ")
        ));
    }

    let mut driver = BuildDriver::new(project_root, state);
    match driver.run(ui) {
        Ok(()) => Ok(()),
        Err(e) => {
            if driver.dist_dir().exists() {
                ui.warning(&format!(
                    "A partial distribution directory was left at {}.",
                    driver.dist_dir().display()
                ));
            }
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    #[test]
    fn build_without_config_fails_with_guidance() {
        let temp = TempDir::new().unwrap();
        let cmd = BuildCommand::new(temp.path(), BuildArgs::default());
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();
        assert!(!result.success);
        assert_eq!(result.exit_code, 2);
        assert!(ui.has_message("rigger resolve"));
    }

    #[test]
    fn run_build_warns_about_unresolved_dependencies() {
        let temp = TempDir::new().unwrap();
        let mut state =
            ResolutionState::seeded(["git", "vs_community", "qt", "openssl", "ffmpeg", "mpv"]);
        // A git path that cannot exist keeps the clone step from touching
        // the network; the driver fails there immediately.
        state.set("git", "/nonexistent/git-binary");
        let mut ui = MockUI::new();

        // The driver fails fast (no git, no source tree); the warning about
        // unresolved entries still fires first.
        let _ = run_build(temp.path(), &state, &mut ui);
        assert!(ui
            .warnings()
            .iter()
            .any(|w| w.contains("Not all dependencies are resolved")));
    }
}
