//! Integration tests for resolution-state persistence.

use rigger::cli::args::ResolveArgs;
use rigger::cli::commands::resolve::ResolveCommand;
use rigger::cli::Command;
use rigger::resolve::ResolutionState;
use rigger::ui::MockUI;
use tempfile::TempDir;

#[test]
fn round_trip_preserves_mapping_exactly() {
    let temp = TempDir::new().unwrap();

    let mut state = ResolutionState::seeded([
        "git",
        "qt",
        "openssl",
        "nodejs",
        "ffmpeg",
        "mpv",
        "vs_community",
        "cmake",
    ]);
    state.set("git", "git");
    state.set("qt", "C:\\Qt\\Qt5.12.7\\5.12.7\\msvc2017\\bin\\windeployqt.exe");
    state.set("mpv", ".rigger\\staging\\MPV\\libmpv-2.dll");

    state.save(temp.path()).unwrap();
    let loaded = ResolutionState::load(temp.path()).unwrap().unwrap();

    assert_eq!(loaded, state);

    // Saving what was loaded produces the identical mapping again.
    loaded.save(temp.path()).unwrap();
    let reloaded = ResolutionState::load(temp.path()).unwrap().unwrap();
    assert_eq!(reloaded, loaded);
}

#[test]
fn persisted_config_short_circuits_the_resolve_command() {
    let temp = TempDir::new().unwrap();
    let mut state = ResolutionState::seeded(["git", "qt"]);
    state.set("git", "git");
    state.save(temp.path()).unwrap();

    let cmd = ResolveCommand::new(temp.path(), ResolveArgs::default());
    let mut ui = MockUI::new();
    let result = cmd.execute(&mut ui).unwrap();

    assert!(result.success);
    assert!(ui.has_message("already resolved"));
    // The short-circuit shows the persisted entries verbatim and never
    // reaches a prompt.
    assert!(ui.has_message("git"));
    assert!(ui.prompts_shown().is_empty());

    // The file is untouched.
    let after = ResolutionState::load(temp.path()).unwrap().unwrap();
    assert_eq!(after, state);
}

#[test]
fn deleting_state_forces_the_first_time_path() {
    let temp = TempDir::new().unwrap();
    let state = ResolutionState::seeded(["git"]);
    state.save(temp.path()).unwrap();

    assert!(ResolutionState::delete(temp.path()).unwrap());
    assert!(ResolutionState::load(temp.path()).unwrap().is_none());
}
