//! Scripted [`ProcessRunner`] for tests.
//!
//! `MockRunner` returns pre-configured responses per program name and records
//! every invocation, so tests can assert both outcomes ("resolution returned
//! the stubbed path") and negatives ("no probe ran at all").

use std::sync::Mutex;

use super::runner::{ProbeOutput, ProcessRunner, SpawnFailure};

type Response = std::result::Result<ProbeOutput, SpawnFailure>;

/// Scripted runner. Unconfigured programs answer [`SpawnFailure::NotFound`].
#[derive(Debug, Default)]
pub struct MockRunner {
    responses: Mutex<Vec<(String, Response)>>,
    invocations: Mutex<Vec<(String, Vec<String>)>>,
}

impl MockRunner {
    /// Create a runner where every program is "not found".
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a successful probe: exit 0 with the given stdout.
    pub fn succeed(&self, program: &str, stdout: &str) {
        self.respond(
            program,
            Ok(ProbeOutput {
                exit_code: Some(0),
                stdout: stdout.to_string(),
                stderr: String::new(),
            }),
        );
    }

    /// Script a probe that starts but exits non-zero.
    pub fn fail_with_code(&self, program: &str, code: i32) {
        self.respond(
            program,
            Ok(ProbeOutput {
                exit_code: Some(code),
                ..Default::default()
            }),
        );
    }

    /// Script a spawn failure for a program.
    pub fn fail_to_spawn(&self, program: &str, failure: SpawnFailure) {
        self.respond(program, Err(failure));
    }

    fn respond(&self, program: &str, response: Response) {
        self.responses
            .lock()
            .unwrap()
            .push((program.to_string(), response));
    }

    /// All invocations recorded so far, as (program, args) pairs.
    pub fn invocations(&self) -> Vec<(String, Vec<String>)> {
        self.invocations.lock().unwrap().clone()
    }

    /// Number of invocations recorded so far.
    pub fn invocation_count(&self) -> usize {
        self.invocations.lock().unwrap().len()
    }

    /// True if `program` was ever invoked.
    pub fn was_invoked(&self, program: &str) -> bool {
        self.invocations
            .lock()
            .unwrap()
            .iter()
            .any(|(p, _)| p == program)
    }
}

impl ProcessRunner for MockRunner {
    fn run(&self, program: &str, args: &[&str]) -> std::result::Result<ProbeOutput, SpawnFailure> {
        self.invocations.lock().unwrap().push((
            program.to_string(),
            args.iter().map(|a| a.to_string()).collect(),
        ));

        let responses = self.responses.lock().unwrap();
        for (p, response) in responses.iter() {
            if p == program {
                return response.clone();
            }
        }
        Err(SpawnFailure::NotFound)
    }
}
