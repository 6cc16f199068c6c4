//! The `run` command: resolve (or load) dependencies, then offer to build.
//!
//! This is the default command. An operator interrupt anywhere in the flow
//! offers to delete the persisted configuration so the next run starts the
//! whole procedure from scratch.

use std::path::{Path, PathBuf};

use crate::cli::args::RunArgs;
use crate::error::{Result, RiggerError};
use crate::resolve::ResolutionState;
use crate::ui::UserInterface;

use super::build::run_build;
use super::dispatcher::{Command, CommandResult};
use super::resolve::{first_time_resolution, show_state};

/// The run command implementation.
pub struct RunCommand {
    project_root: PathBuf,
    args: RunArgs,
}

impl RunCommand {
    /// Create a new run command.
    pub fn new(project_root: &Path, args: RunArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }

    fn run_inner(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        ui.show_header("Automatic Build Script for the Stremio shell");

        let state = match ResolutionState::load(&self.project_root)? {
            Some(state) => {
                ui.message("Configuration found:");
                show_state(&state, ui);
                state
            }
            None => {
                ui.message("No configuration found. Starting first-time setup...");
                first_time_resolution(&self.project_root, self.args.strict_companions, ui)?
            }
        };

        if !ui.confirm("build.start", "Build the shell now?", true)? {
            ui.message("Skipping the build. Run `rigger build` when ready.");
            return Ok(CommandResult::success());
        }

        run_build(&self.project_root, &state, ui)?;
        Ok(CommandResult::success())
    }

    /// Offer a configuration reset after an operator interrupt.
    fn offer_reset(&self, ui: &mut dyn UserInterface) {
        ui.warning("Interrupted.");
        let wants_reset = ui
            .confirm(
                "reset.config",
                "Reset/delete the stored configuration?",
                false,
            )
            .unwrap_or(false);

        if wants_reset {
            match ResolutionState::delete(&self.project_root) {
                Ok(true) => {
                    ui.message("Configuration deleted. Run rigger again to start over.");
                }
                Ok(false) => ui.message("No configuration file to delete."),
                Err(e) => ui.error(&format!("Could not delete configuration: {e}")),
            }
        }
    }
}

impl Command for RunCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match self.run_inner(ui) {
            Err(e) if e.is_interrupt() => {
                self.offer_reset(ui);
                Err(RiggerError::Interrupted)
            }
            other => other,
        }
    }
}
