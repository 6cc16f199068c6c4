//! Interactive fallback for unresolved dependencies.
//!
//! Runs only after the PATH probe and the drive scan both fail. The operator
//! gets three sequential choices: point at a manual install location, let
//! rigger download and install, or decline and handle it by hand. The
//! decision itself is a pure function of the answers ([`decide`]); prompt
//! rendering and filesystem checks happen in [`run_fallback`].

use std::path::Path;

use crate::deps::DependencyDescriptor;
use crate::error::Result;
use crate::fetch::Installer;
use crate::ui::UserInterface;

/// What the operator chose for an unresolved dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackDecision {
    /// The tool is installed somewhere rigger did not look.
    ManualPath,
    /// Fetch and install it automatically.
    Fetch,
    /// Leave it unresolved for this run.
    Decline,
}

/// Pure decision logic over the two confirm answers.
pub fn decide(installed_elsewhere: bool, fetch_approved: bool) -> FallbackDecision {
    if installed_elsewhere {
        FallbackDecision::ManualPath
    } else if fetch_approved {
        FallbackDecision::Fetch
    } else {
        FallbackDecision::Decline
    }
}

/// Walk the operator through the fallback choices for one dependency.
///
/// Returns the resolved path, or `None` when the dependency stays
/// unresolved (declined, or an installer that needs a later re-probe).
pub fn run_fallback(
    desc: &DependencyDescriptor,
    installer: &Installer<'_>,
    ui: &mut dyn UserInterface,
) -> Result<Option<String>> {
    ui.warning(&format!("{} not found on any drive.", desc.display_name));

    let installed_elsewhere = ui.confirm(
        &format!("{}.manual", desc.name),
        &format!("Is {} installed anywhere else?", desc.display_name),
        false,
    )?;

    let fetch_approved = if installed_elsewhere {
        false
    } else {
        ui.confirm(
            &format!("{}.fetch", desc.name),
            &format!("Download and install {} automatically?", desc.display_name),
            false,
        )?
    };

    match decide(installed_elsewhere, fetch_approved) {
        FallbackDecision::ManualPath => prompt_manual_path(desc, ui).map(Some),
        FallbackDecision::Fetch => installer.fetch_and_install(desc, ui),
        FallbackDecision::Decline => {
            ui.message(&format!(
                "Please install {} manually; build steps that need it will fail until it is resolved.\nSee: {}",
                desc.display_name, desc.download_url
            ));
            Ok(None)
        }
    }
}

/// Re-prompt until the operator names a path that exists. The entered path
/// is accepted as-is, with no version verification.
fn prompt_manual_path(desc: &DependencyDescriptor, ui: &mut dyn UserInterface) -> Result<String> {
    loop {
        let entered = ui.input(
            &format!("{}.path", desc.name),
            &format!("Enter the path to {}", desc.display_name),
        )?;

        if Path::new(&entered).exists() {
            ui.success(&format!("Found {} at: {}", desc.display_name, entered));
            return Ok(entered);
        }

        ui.error(&format!(
            "Could not find {} at: {}",
            desc.display_name, entered
        ));
    }
}
