//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::dog::{DogRecord, NewDog};
use crate::query::{DogQuery, SortKey, SortOrder};

/// Add command arguments.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// The dog's name
    pub name: String,

    /// The dog's breed
    pub breed: String,

    /// Path or URI of a photo
    #[arg(long)]
    pub photo: Option<String>,

    /// Where you met the dog
    #[arg(short, long)]
    pub location: Option<String>,

    /// Free-form notes
    #[arg(short, long)]
    pub notes: Option<String>,

    /// Record the dog as one of your own
    #[arg(short, long)]
    pub mine: bool,
}

impl From<AddCommand> for NewDog {
    fn from(cmd: AddCommand) -> Self {
        Self {
            name: cmd.name,
            breed: cmd.breed,
            photo_uri: cmd.photo,
            met_location_text: cmd.location,
            notes: cmd.notes,
            is_mine: cmd.mine,
        }
    }
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Which dogs to list
    #[arg(short, long, value_enum, default_value = "all")]
    pub scope: Scope,

    /// Only show dogs of this breed
    #[arg(short, long)]
    pub breed: Option<String>,

    /// Only show dogs whose name contains this text
    #[arg(long)]
    pub search: Option<String>,

    /// Sort order (defaults to the configured order). Met dogs sort by
    /// the date met, your own dogs by the date added.
    #[arg(long, value_enum)]
    pub sort: Option<SortOrder>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

impl ListCommand {
    /// Build the query for this command, falling back to `default_sort`.
    #[must_use]
    pub fn query(&self, default_sort: SortOrder) -> DogQuery {
        DogQuery {
            breed: self.breed.clone(),
            search: self.search.clone(),
            sort: self.sort.unwrap_or(default_sort),
            sort_key: match self.scope {
                Scope::Mine => SortKey::CreatedAt,
                Scope::All | Scope::Met => SortKey::MetAt,
            },
        }
    }
}

/// Edit command arguments. Only the given fields change.
#[derive(Debug, Args)]
pub struct EditCommand {
    /// Id of the dog to edit
    pub id: String,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// New breed
    #[arg(long)]
    pub breed: Option<String>,

    /// New photo path or URI (empty to clear)
    #[arg(long)]
    pub photo: Option<String>,

    /// New meeting place (empty to clear)
    #[arg(short, long)]
    pub location: Option<String>,

    /// New notes (empty to clear)
    #[arg(short, long)]
    pub notes: Option<String>,
}

impl EditCommand {
    /// Apply the requested changes to a copy of `dog`.
    #[must_use]
    pub fn apply_to(&self, dog: &DogRecord) -> DogRecord {
        let mut edited = dog.clone();
        if let Some(name) = &self.name {
            edited.name = crate::dog::normalize_name(name).to_string();
        }
        if let Some(breed) = &self.breed {
            edited.breed = breed.trim().to_string();
        }
        if let Some(photo) = &self.photo {
            edited.photo_uri = optional_text(photo);
        }
        if let Some(location) = &self.location {
            edited.met_location_text = optional_text(location);
        }
        if let Some(notes) = &self.notes {
            edited.notes = optional_text(notes);
        }
        edited
    }
}

fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Id of the dog to show
    pub id: String,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Delete command arguments.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Id of the dog to delete
    pub id: String,
}

/// Breeds command arguments.
#[derive(Debug, Args)]
pub struct BreedsCommand {
    /// Which dogs to collect breeds from
    #[arg(short, long, value_enum, default_value = "all")]
    pub scope: Scope,
}

/// Counts command arguments.
#[derive(Debug, Args)]
pub struct CountsCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Which part of the collection a command looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Scope {
    /// Every dog
    #[default]
    All,
    /// Dogs you have met
    Met,
    /// Your own dogs
    Mine,
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    Plain,
    /// Formatted table
    #[default]
    Table,
    /// JSON output
    Json,
}
