//! The `resolve` command: locate every dependency and persist the state.

use std::path::{Path, PathBuf};

use crate::cli::args::ResolveArgs;
use crate::deps::DependencyRegistry;
use crate::drives::DriveSet;
use crate::error::Result;
use crate::fetch::{Downloader, Installer};
use crate::resolve::fallback::run_fallback;
use crate::resolve::state::CONFIG_DIR;
use crate::resolve::{Origin, Resolution, ResolutionState, Resolver};
use crate::shell::SystemRunner;
use crate::ui::{SpinnerHandle, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// The resolve command implementation.
pub struct ResolveCommand {
    project_root: PathBuf,
    args: ResolveArgs,
}

impl ResolveCommand {
    /// Create a new resolve command.
    pub fn new(project_root: &Path, args: ResolveArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }
}

impl Command for ResolveCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if !self.args.force {
            if let Some(state) = ResolutionState::load(&self.project_root)? {
                ui.message("Configuration found; dependencies already resolved.");
                show_state(&state, ui);
                ui.message("Use `rigger resolve --force` to re-probe.");
                return Ok(CommandResult::success());
            }
        }

        let state = first_time_resolution(
            &self.project_root,
            self.args.strict_companions,
            ui,
        )?;

        let unresolved = state.unresolved_names();
        if unresolved.is_empty() {
            Ok(CommandResult::success())
        } else {
            ui.warning(&format!(
                "Unresolved dependencies: {}. Build steps that need them will fail.",
                unresolved.join(", ")
            ));
            Ok(CommandResult::failure(2))
        }
    }
}

/// Run the full first-time resolution pass with the system runner and the
/// host's drive set, persisting the result.
pub fn first_time_resolution(
    project_root: &Path,
    strict_companions: bool,
    ui: &mut dyn UserInterface,
) -> Result<ResolutionState> {
    let registry = DependencyRegistry::builtin();
    let drives = DriveSet::system();
    let runner = SystemRunner;
    let resolver = Resolver::new(&runner, &drives).with_strict_companions(strict_companions);
    let installer = Installer::new(
        Downloader::new(project_root.join(CONFIG_DIR).join("staging")),
        &runner,
    );

    tracing::debug!(drives = %drives.display_letters(), "drive set for install-path scan");
    resolve_all(project_root, &registry, &drives, &resolver, &installer, ui)
}

/// Resolve every dependency in the registry and persist the state.
///
/// Probing order per dependency: PATH probe, drive scan, interactive
/// fallback. The state file is written even when entries stay unresolved,
/// so a later `rigger build` fails with clear messages rather than probing
/// again.
pub fn resolve_all(
    project_root: &Path,
    registry: &DependencyRegistry,
    drives: &DriveSet,
    resolver: &Resolver<'_>,
    installer: &Installer<'_>,
    ui: &mut dyn UserInterface,
) -> Result<ResolutionState> {
    ui.message("Checking dependencies...");

    let mut state = ResolutionState::seeded(registry.names());

    for desc in registry.iter() {
        let mut spinner =
            ui.start_spinner(&format!("Checking if {} is installed...", desc.display_name));

        match resolver.resolve(desc)? {
            Resolution::Found {
                path,
                version,
                origin,
                warnings,
            } => {
                let detail = version.unwrap_or_else(|| path.clone());
                match origin {
                    Origin::Path => {
                        spinner.finish_success(&format!("{}: {}", desc.display_name, detail));
                    }
                    Origin::DriveScan => {
                        spinner.finish_success(&format!(
                            "Found {}! [{}] {}",
                            desc.display_name, path, detail
                        ));
                    }
                }
                for missing in warnings {
                    ui.warning(&format!(
                        "{}: companion component missing from the installation: {}",
                        desc.display_name, missing
                    ));
                }
                state.set(desc.name, path);
            }
            Resolution::Unresolved => {
                spinner.finish_error(&format!(
                    "{} not found on PATH or on any drive ({}).",
                    desc.display_name,
                    drives.display_letters()
                ));
                if let Some(path) = run_fallback(desc, installer, ui)? {
                    state.set(desc.name, path);
                }
            }
        }
    }

    state.save(project_root)?;
    ui.success("Dependency check complete; configuration written.");

    Ok(state)
}

/// Print the state as key/path lines.
pub fn show_state(state: &ResolutionState, ui: &mut dyn UserInterface) {
    for (name, path) in state.iter() {
        if path.is_empty() {
            ui.message(&format!("  {name:<14} (unresolved)"));
        } else {
            ui.message(&format!("  {name:<14} {path}"));
        }
    }
}
