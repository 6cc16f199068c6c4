//! Interactive prompts.

use console::Term;
use dialoguer::{Confirm, Input};

use crate::error::{Result, RiggerError};

/// Convert dialoguer errors to RiggerError, mapping Ctrl-C/Esc to the
/// dedicated interrupt error so the top level can offer a config reset.
fn map_dialoguer_err(e: dialoguer::Error) -> RiggerError {
    let io: std::io::Error = e.into();
    if io.kind() == std::io::ErrorKind::Interrupted {
        RiggerError::Interrupted
    } else {
        RiggerError::Io(io)
    }
}

/// Ask a yes/no question on the terminal.
pub fn confirm_on(term: &Term, question: &str, default: bool) -> Result<bool> {
    Confirm::new()
        .with_prompt(question)
        .default(default)
        .interact_on(term)
        .map_err(map_dialoguer_err)
}

/// Ask for a line of free-form input on the terminal.
pub fn input_on(term: &Term, question: &str) -> Result<String> {
    Input::<String>::new()
        .with_prompt(question)
        .interact_on(term)
        .map_err(map_dialoguer_err)
}
