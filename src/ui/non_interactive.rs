//! Non-interactive UI for headless runs.
//!
//! Used for `--yes` and non-TTY environments. Confirm prompts answer with
//! their default (fallback prompts default to "no", so missing dependencies
//! are declined rather than hanging a pipeline); free-form input prompts
//! cannot be answered and fail with a clear message.

use anyhow::anyhow;

use crate::error::Result;

use super::{OutputMode, ProgressSpinner, SpinnerHandle, UserInterface};

/// UI implementation that never blocks on the operator.
pub struct NonInteractiveUI {
    mode: OutputMode,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("✓ {}", msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("⚠ {}", msg);
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            println!("\n{}\n", title);
        }
    }

    fn confirm(&mut self, key: &str, question: &str, default: bool) -> Result<bool> {
        tracing::debug!(key, default, "non-interactive confirm: {}", question);
        if self.mode.shows_status() {
            println!("{} [{}]", question, if default { "yes" } else { "no" });
        }
        Ok(default)
    }

    fn input(&mut self, key: &str, question: &str) -> Result<String> {
        Err(crate::error::RiggerError::Other(anyhow!(
            "prompt '{key}' ({question}) requires an interactive terminal"
        )))
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_status() {
            println!("{}", message);
        }
        Box::new(ProgressSpinner::hidden())
    }

    fn is_interactive(&self) -> bool {
        false
    }
}
