//! External process execution.
//!
//! Two layers: [`runner`] is the narrow probe interface the resolver uses
//! (one invocation, classified spawn errors, captured output), and
//! [`command`] runs full shell command lines for the build steps.

pub mod command;
pub mod mock;
pub mod runner;

pub use command::{execute, execute_check, CommandOptions, CommandResult};
pub use mock::MockRunner;
pub use runner::{ProbeOutput, ProcessRunner, SpawnFailure, SystemRunner};
