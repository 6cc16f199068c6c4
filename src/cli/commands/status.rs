//! The `status` command: show the persisted resolution state.

use std::path::{Path, PathBuf};

use crate::cli::args::StatusArgs;
use crate::error::Result;
use crate::resolve::ResolutionState;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::resolve::show_state;

/// The status command implementation.
pub struct StatusCommand {
    project_root: PathBuf,
    #[allow(dead_code)]
    args: StatusArgs,
}

impl StatusCommand {
    /// Create a new status command.
    pub fn new(project_root: &Path, args: StatusArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }
}

impl Command for StatusCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match ResolutionState::load(&self.project_root)? {
            Some(state) => {
                ui.message(&format!(
                    "Resolution state ({}):",
                    ResolutionState::file_path(&self.project_root).display()
                ));
                show_state(&state, ui);

                let unresolved = state.unresolved_names();
                if !unresolved.is_empty() {
                    ui.warning(&format!("Unresolved: {}", unresolved.join(", ")));
                }
            }
            None => {
                ui.message("No configuration found. Run `rigger resolve` to create one.");
            }
        }
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    #[test]
    fn status_without_config_points_at_resolve() {
        let temp = TempDir::new().unwrap();
        let cmd = StatusCommand::new(temp.path(), StatusArgs::default());
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();
        assert!(result.success);
        assert!(ui.has_message("rigger resolve"));
    }

    #[test]
    fn status_lists_entries_and_unresolved() {
        let temp = TempDir::new().unwrap();
        let mut state = ResolutionState::seeded(["git", "mpv"]);
        state.set("git", "git");
        state.save(temp.path()).unwrap();

        let cmd = StatusCommand::new(temp.path(), StatusArgs::default());
        let mut ui = MockUI::new();
        cmd.execute(&mut ui).unwrap();

        assert!(ui.has_message("git"));
        assert!(ui.warnings().iter().any(|w| w.contains("mpv")));
    }
}
