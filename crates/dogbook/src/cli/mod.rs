//! Command-line interface for dogbook.
//!
//! This module provides the CLI structure for the `dogbook` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddCommand, BreedsCommand, ConfigCommand, CountsCommand, DeleteCommand, EditCommand,
    ListCommand, OutputFormat, Scope, ShowCommand,
};

/// dogbook - Keep track of the dogs you meet
///
/// Records the dogs you meet and the dogs you own, with breed, photo,
/// location and notes, in a local database.
#[derive(Debug, Parser)]
#[command(name = "dogbook")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Record a new dog
    Add(AddCommand),

    /// List recorded dogs
    List(ListCommand),

    /// Show one dog
    Show(ShowCommand),

    /// Change a recorded dog
    Edit(EditCommand),

    /// Delete a recorded dog
    Delete(DeleteCommand),

    /// List the breeds you have recorded
    Breeds(BreedsCommand),

    /// Count met and owned dogs
    Counts(CountsCommand),

    /// View configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        crate::logging::Verbosity::from_flags(self.quiet, self.verbose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::Verbosity;
    use clap::CommandFactory;

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "dogbook");
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from([
            "dogbook", "add", "Rex", "Lab", "--location", "Park", "--mine",
        ])
        .unwrap();
        let Command::Add(add) = cli.command else {
            panic!("expected add command");
        };
        assert_eq!(add.name, "Rex");
        assert_eq!(add.breed, "Lab");
        assert_eq!(add.location.as_deref(), Some("Park"));
        assert!(add.mine);
    }

    #[test]
    fn test_parse_add_requires_breed() {
        assert!(Cli::try_parse_from(["dogbook", "add", "Rex"]).is_err());
    }

    #[test]
    fn test_parse_list_options() {
        let cli = Cli::try_parse_from([
            "dogbook", "list", "--scope", "mine", "--sort", "oldest", "-f", "json",
        ])
        .unwrap();
        let Command::List(list) = cli.command else {
            panic!("expected list command");
        };
        assert_eq!(list.scope, Scope::Mine);
        assert_eq!(list.sort, Some(crate::query::SortOrder::Oldest));
        assert_eq!(list.format, OutputFormat::Json);
    }

    #[test]
    fn test_parse_list_defaults() {
        let cli = Cli::try_parse_from(["dogbook", "list"]).unwrap();
        let Command::List(list) = cli.command else {
            panic!("expected list command");
        };
        assert_eq!(list.scope, Scope::All);
        assert!(list.sort.is_none());
        assert_eq!(list.format, OutputFormat::Table);
    }

    #[test]
    fn test_parse_delete() {
        let cli = Cli::try_parse_from(["dogbook", "delete", "abc"]).unwrap();
        assert!(matches!(cli.command, Command::Delete(DeleteCommand { ref id }) if id == "abc"));
    }

    #[test]
    fn test_parse_config_show() {
        let cli = Cli::try_parse_from(["dogbook", "config", "show", "--json"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand::Show { json: true })
        ));
    }

    #[test]
    fn test_parse_with_config() {
        let cli = Cli::try_parse_from(["dogbook", "-c", "/custom/config.toml", "counts"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_verbosity_flags() {
        let cli = Cli::try_parse_from(["dogbook", "-vv", "counts"]).unwrap();
        assert_eq!(cli.verbosity(), Verbosity::Debug);

        let cli = Cli::try_parse_from(["dogbook", "-q", "counts"]).unwrap();
        assert_eq!(cli.verbosity(), Verbosity::Quiet);

        let cli = Cli::try_parse_from(["dogbook", "counts"]).unwrap();
        assert_eq!(cli.verbosity(), Verbosity::Normal);
    }
}
