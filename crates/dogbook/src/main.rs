//! `dogbook` - CLI for the dog record store
//!
//! This binary records, lists, edits and deletes dogs in the local
//! record database.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::Context;
use clap::Parser;

use dogbook::cli::{
    AddCommand, Cli, Command, ConfigCommand, CountsCommand, DeleteCommand, EditCommand,
    ListCommand, OutputFormat, Scope, ShowCommand,
};
use dogbook::query::breeds;
use dogbook::{init_logging, Config, DogRecord, DogStore, Error, NewDog, SqliteRecordStore};

type Store = DogStore<SqliteRecordStore>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone())?;

    match cli.command {
        Command::Add(add_cmd) => handle_add(&open_store(&config)?, add_cmd).await,
        Command::List(list_cmd) => handle_list(&open_store(&config)?, &config, &list_cmd).await,
        Command::Show(show_cmd) => handle_show(&open_store(&config)?, &show_cmd).await,
        Command::Edit(edit_cmd) => handle_edit(&open_store(&config)?, &edit_cmd).await,
        Command::Delete(delete_cmd) => handle_delete(&open_store(&config)?, &delete_cmd).await,
        Command::Breeds(breeds_cmd) => {
            let store = open_store(&config)?;
            for breed in breeds(&scoped(&store, breeds_cmd.scope).await) {
                println!("{breed}");
            }
            Ok(())
        }
        Command::Counts(counts_cmd) => handle_counts(&open_store(&config)?, &counts_cmd).await,
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
    }
}

fn open_store(config: &Config) -> anyhow::Result<Store> {
    let database_path = config.database_path();
    let backend = SqliteRecordStore::open(&database_path)
        .with_context(|| format!("could not open {}", database_path.display()))?;
    Ok(DogStore::with_key(backend, config.storage.collection_key.clone()))
}

async fn scoped(store: &Store, scope: Scope) -> Vec<DogRecord> {
    match scope {
        Scope::All => store.list_all().await,
        Scope::Met => store.list_met().await,
        Scope::Mine => store.list_mine().await,
    }
}

async fn handle_add(store: &Store, cmd: AddCommand) -> anyhow::Result<()> {
    let dog = NewDog::from(cmd).into_record()?;
    let (id, name) = (dog.id.clone(), dog.name.clone());

    store.create(dog).await.context("failed to save dog")?;
    println!("Saved {name} ({id})");
    Ok(())
}

async fn handle_list(store: &Store, config: &Config, cmd: &ListCommand) -> anyhow::Result<()> {
    let dogs = cmd
        .query(config.list.default_sort)
        .apply(&scoped(store, cmd.scope).await);

    match cmd.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&dogs)?),
        OutputFormat::Plain => {
            for dog in &dogs {
                println!("{}\t{}\t{}", dog.id, dog.name, dog.breed);
            }
        }
        OutputFormat::Table => {
            if dogs.is_empty() {
                println!("No dogs yet.");
                return Ok(());
            }
            println!("{:<36}  {:<20}  {:<20}  {:<10}  MINE", "ID", "NAME", "BREED", "MET");
            for dog in &dogs {
                println!(
                    "{:<36}  {:<20}  {:<20}  {:<10}  {}",
                    dog.id,
                    dog.name,
                    dog.breed,
                    dog.met_at.format("%Y-%m-%d"),
                    if dog.is_mine() { "yes" } else { "" }
                );
            }
        }
    }
    Ok(())
}

async fn handle_show(store: &Store, cmd: &ShowCommand) -> anyhow::Result<()> {
    let dog = store
        .get_by_id(&cmd.id)
        .await
        .ok_or_else(|| Error::not_found(&cmd.id))?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&dog)?);
        return Ok(());
    }

    println!("{} ({})", dog.name, dog.breed);
    println!("  Id:        {}", dog.id);
    println!("  Mine:      {}", if dog.is_mine() { "yes" } else { "no" });
    println!("  Met:       {}", dog.met_at.to_rfc3339());
    if let Some(location) = &dog.met_location_text {
        println!("  Location:  {location}");
    }
    if let Some(photo) = &dog.photo_uri {
        println!("  Photo:     {photo}");
    }
    if let Some(notes) = &dog.notes {
        println!("  Notes:     {notes}");
    }
    println!("  Created:   {}", dog.created_at.to_rfc3339());
    println!("  Updated:   {}", dog.updated_at.to_rfc3339());
    Ok(())
}

async fn handle_edit(store: &Store, cmd: &EditCommand) -> anyhow::Result<()> {
    let current = store
        .get_by_id(&cmd.id)
        .await
        .ok_or_else(|| Error::not_found(&cmd.id))?;

    let edited = cmd.apply_to(&current);
    dogbook::dog::validate_dog_input(&edited.name, &edited.breed)?;

    let saved = store.update(edited).await.context("failed to update dog")?;
    println!("Updated {} ({})", saved.name, saved.id);
    Ok(())
}

async fn handle_delete(store: &Store, cmd: &DeleteCommand) -> anyhow::Result<()> {
    match store.delete(&cmd.id).await? {
        Some(dog) => println!("Deleted {} ({})", dog.name, dog.id),
        None => println!("No dog with id {}", cmd.id),
    }
    Ok(())
}

async fn handle_counts(store: &Store, cmd: &CountsCommand) -> anyhow::Result<()> {
    let counts = store.counts().await;
    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&counts)?);
        return Ok(());
    }

    println!("Met:   {}", counts.met);
    println!(
        "{}: {}",
        if counts.mine == 1 { "My dog " } else { "My dogs" },
        counts.mine
    );
    println!("Total: {}", counts.total());
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:   {}", config.database_path().display());
                println!("  Collection key:  {}", config.storage.collection_key);
                println!();
                println!("[List]");
                println!("  Default sort:    {}", config.list.default_sort);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
