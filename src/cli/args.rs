//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// rigger - build-dependency resolution and build orchestration.
#[derive(Debug, Parser)]
#[command(name = "rigger")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show verbose output (streams external command output)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Never prompt: accept defaults, decline downloads
    #[arg(short, long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve dependencies, then build (default if no command specified)
    Run(RunArgs),

    /// Resolve dependency locations and persist them
    Resolve(ResolveArgs),

    /// Build the shell using the persisted resolution state
    Build(BuildArgs),

    /// Show the persisted resolution state
    Status(StatusArgs),

    /// Delete the persisted resolution state (forces re-probing)
    Reset(ResetArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RunArgs {
    /// Treat missing Qt companion components as an error instead of a warning
    #[arg(long)]
    pub strict_companions: bool,
}

/// Arguments for the `resolve` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ResolveArgs {
    /// Re-probe even when a configuration file exists
    #[arg(long)]
    pub force: bool,

    /// Treat missing Qt companion components as an error instead of a warning
    #[arg(long)]
    pub strict_companions: bool,
}

/// Arguments for the `build` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct BuildArgs {}

/// Arguments for the `status` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct StatusArgs {}

/// Arguments for the `reset` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ResetArgs {}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_without_subcommand() {
        let cli = Cli::try_parse_from(["rigger"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.yes);
    }

    #[test]
    fn cli_parses_resolve_with_force() {
        let cli = Cli::try_parse_from(["rigger", "resolve", "--force"]).unwrap();
        match cli.command {
            Some(Commands::Resolve(args)) => assert!(args.force),
            _ => panic!("expected resolve subcommand"),
        }
    }

    #[test]
    fn global_flags_apply_after_subcommand() {
        let cli = Cli::try_parse_from(["rigger", "build", "--yes", "--quiet"]).unwrap();
        assert!(cli.yes);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Some(Commands::Build(_))));
    }

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
