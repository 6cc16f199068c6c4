//! The `reset` command: delete the persisted state to force re-probing.

use std::path::{Path, PathBuf};

use crate::cli::args::ResetArgs;
use crate::error::Result;
use crate::resolve::ResolutionState;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The reset command implementation.
pub struct ResetCommand {
    project_root: PathBuf,
    #[allow(dead_code)]
    args: ResetArgs,
}

impl ResetCommand {
    /// Create a new reset command.
    pub fn new(project_root: &Path, args: ResetArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }
}

impl Command for ResetCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if !ResolutionState::file_path(&self.project_root).exists() {
            ui.message("No configuration file to delete.");
            return Ok(CommandResult::success());
        }

        if !ui.confirm("reset.config", "Delete the stored configuration?", true)? {
            ui.message("Keeping the configuration.");
            return Ok(CommandResult::success());
        }

        ResolutionState::delete(&self.project_root)?;
        ui.success("Configuration deleted. The next run re-probes all dependencies.");
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    #[test]
    fn reset_deletes_existing_config() {
        let temp = TempDir::new().unwrap();
        ResolutionState::seeded(["git"]).save(temp.path()).unwrap();

        let cmd = ResetCommand::new(temp.path(), ResetArgs::default());
        let mut ui = MockUI::new();
        ui.set_confirm_response("reset.config", true);

        let result = cmd.execute(&mut ui).unwrap();
        assert!(result.success);
        assert!(!ResolutionState::file_path(temp.path()).exists());
    }

    #[test]
    fn reset_without_config_is_a_no_op() {
        let temp = TempDir::new().unwrap();
        let cmd = ResetCommand::new(temp.path(), ResetArgs::default());
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();
        assert!(result.success);
        assert!(ui.has_message("No configuration file"));
        assert!(ui.prompts_shown().is_empty());
    }

    #[test]
    fn declining_keeps_config() {
        let temp = TempDir::new().unwrap();
        ResolutionState::seeded(["git"]).save(temp.path()).unwrap();

        let cmd = ResetCommand::new(temp.path(), ResetArgs::default());
        let mut ui = MockUI::new();
        ui.set_confirm_response("reset.config", false);

        cmd.execute(&mut ui).unwrap();
        assert!(ResolutionState::file_path(temp.path()).exists());
    }
}
