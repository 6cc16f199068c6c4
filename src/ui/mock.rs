//! Mock UI implementation for testing.
//!
//! `MockUI` implements the [`UserInterface`] trait and captures all
//! interactions for later assertion. Confirm and input prompts answer from
//! scripted responses, keyed by the prompt key.
//!
//! # Example
//!
//! ```
//! use rigger::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.set_confirm_response("fallback.manual", false);
//!
//! ui.message("Checking dependencies");
//! assert!(ui.has_message("Checking dependencies"));
//! ```

use std::collections::{HashMap, VecDeque};

use crate::error::{Result, RiggerError};

use super::{OutputMode, SpinnerHandle, UserInterface};

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    interactive: bool,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    spinners: Vec<String>,
    prompts_shown: Vec<String>,
    confirm_responses: HashMap<String, bool>,
    input_queues: HashMap<String, VecDeque<String>>,
    /// Fallback confirm answer for keys without a scripted response.
    default_confirm: Option<bool>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self {
            mode: OutputMode::Normal,
            interactive: true,
            ..Default::default()
        }
    }

    /// Script a confirm answer for a prompt key.
    pub fn set_confirm_response(&mut self, key: &str, answer: bool) {
        self.confirm_responses.insert(key.to_string(), answer);
    }

    /// Script a fallback confirm answer for any unconfigured key.
    pub fn set_default_confirm(&mut self, answer: bool) {
        self.default_confirm = Some(answer);
    }

    /// Queue input answers for a prompt key, returned in order.
    pub fn queue_input_responses(&mut self, key: &str, responses: Vec<&str>) {
        let queue = responses.into_iter().map(|s| s.to_string()).collect();
        self.input_queues.insert(key.to_string(), queue);
    }

    /// Set whether this mock behaves as interactive.
    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    /// Get all captured messages.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get all captured success messages.
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// Get all captured warning messages.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Get all captured error messages.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Get all prompts that were shown (by key).
    pub fn prompts_shown(&self) -> &[String] {
        &self.prompts_shown
    }

    /// Check if a specific message was shown (substring match across all
    /// message kinds).
    pub fn has_message(&self, msg: &str) -> bool {
        self.messages
            .iter()
            .chain(&self.successes)
            .chain(&self.warnings)
            .chain(&self.errors)
            .any(|m| m.contains(msg))
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn confirm(&mut self, key: &str, _question: &str, default: bool) -> Result<bool> {
        self.prompts_shown.push(key.to_string());
        if let Some(answer) = self.confirm_responses.get(key) {
            return Ok(*answer);
        }
        if let Some(answer) = self.default_confirm {
            return Ok(answer);
        }
        Ok(default)
    }

    fn input(&mut self, key: &str, _question: &str) -> Result<String> {
        self.prompts_shown.push(key.to_string());
        if let Some(queue) = self.input_queues.get_mut(key) {
            if let Some(answer) = queue.pop_front() {
                return Ok(answer);
            }
        }
        Err(RiggerError::Other(anyhow::anyhow!(
            "no scripted input for prompt '{key}'"
        )))
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.spinners.push(message.to_string());
        Box::new(MockSpinner)
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

/// Spinner that swallows every update.
struct MockSpinner;

impl SpinnerHandle for MockSpinner {
    fn set_message(&mut self, _msg: &str) {}
    fn finish_success(&mut self, _msg: &str) {}
    fn finish_error(&mut self, _msg: &str) {}
    fn finish_skipped(&mut self, _msg: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_messages_by_kind() {
        let mut ui = MockUI::new();
        ui.message("plain");
        ui.success("good");
        ui.warning("careful");
        ui.error("bad");

        assert_eq!(ui.messages(), &["plain".to_string()]);
        assert_eq!(ui.successes(), &["good".to_string()]);
        assert_eq!(ui.warnings(), &["careful".to_string()]);
        assert_eq!(ui.errors(), &["bad".to_string()]);
        assert!(ui.has_message("careful"));
    }

    #[test]
    fn confirm_uses_scripted_response() {
        let mut ui = MockUI::new();
        ui.set_confirm_response("build", false);
        assert!(!ui.confirm("build", "Build?", true).unwrap());
        assert_eq!(ui.prompts_shown(), &["build".to_string()]);
    }

    #[test]
    fn confirm_falls_back_to_default_confirm_then_prompt_default() {
        let mut ui = MockUI::new();
        assert!(ui.confirm("unset", "Q?", true).unwrap());

        ui.set_default_confirm(false);
        assert!(!ui.confirm("unset", "Q?", true).unwrap());
    }

    #[test]
    fn input_pops_queued_answers_in_order() {
        let mut ui = MockUI::new();
        ui.queue_input_responses("path", vec!["/bad", "/good"]);
        assert_eq!(ui.input("path", "Path?").unwrap(), "/bad");
        assert_eq!(ui.input("path", "Path?").unwrap(), "/good");
        assert!(ui.input("path", "Path?").is_err());
    }
}
