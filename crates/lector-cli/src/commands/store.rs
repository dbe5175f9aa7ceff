//! Store command - generic operations against the remote document store.

use std::fs;
use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;

use lector_store::{DocumentStore, ObjectStorage};

use super::read::load_config;

/// Arguments for the store command.
#[derive(Args)]
pub struct StoreArgs {
    #[command(subcommand)]
    command: StoreCommand,
}

#[derive(Subcommand)]
enum StoreCommand {
    /// List the documents of a collection
    List {
        /// Collection name (e.g. municipios, solicitudes)
        collection: String,
    },

    /// Fetch a single document
    Get {
        collection: String,
        id: String,
    },

    /// Create a document from a JSON file
    Create {
        collection: String,
        /// JSON file with the document body
        file: PathBuf,
    },

    /// Update a document from a JSON file
    Update {
        collection: String,
        id: String,
        /// JSON file with the fields to update
        file: PathBuf,
    },

    /// Delete a document
    Delete {
        collection: String,
        id: String,
    },

    /// Upload a file to object storage
    Upload {
        /// Storage path (e.g. empresas/e1/logo.png)
        path: String,
        /// Local file to upload
        file: PathBuf,
        /// Content type of the file
        #[arg(long, default_value = "application/octet-stream")]
        content_type: String,
    },
}

pub async fn run(args: StoreArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    match args.command {
        StoreCommand::List { collection } => {
            let store = DocumentStore::new(&config.store)?;
            let documents = store.list(&collection).await?;
            for document in &documents {
                println!("{}\t{}", document.id, serde_json::to_string(&document.data)?);
            }
            println!(
                "{} {} documents in {}",
                style("ℹ").blue(),
                documents.len(),
                collection
            );
        }
        StoreCommand::Get { collection, id } => {
            let store = DocumentStore::new(&config.store)?;
            let document = store.get(&collection, &id).await?;
            println!("{}", serde_json::to_string_pretty(&document.data)?);
        }
        StoreCommand::Create { collection, file } => {
            let store = DocumentStore::new(&config.store)?;
            let data: Value = serde_json::from_str(&fs::read_to_string(&file)?)?;
            let id = store.create(&collection, &data).await?;
            println!("{} Created {}/{}", style("✓").green(), collection, id);
        }
        StoreCommand::Update {
            collection,
            id,
            file,
        } => {
            let store = DocumentStore::new(&config.store)?;
            let data: Value = serde_json::from_str(&fs::read_to_string(&file)?)?;
            store.update(&collection, &id, &data).await?;
            println!("{} Updated {}/{}", style("✓").green(), collection, id);
        }
        StoreCommand::Delete { collection, id } => {
            let store = DocumentStore::new(&config.store)?;
            store.delete(&collection, &id).await?;
            println!("{} Deleted {}/{}", style("✓").green(), collection, id);
        }
        StoreCommand::Upload {
            path,
            file,
            content_type,
        } => {
            let storage = ObjectStorage::new(&config.store)?;
            let bytes = fs::read(&file)?;
            let url = storage.upload(&path, bytes, &content_type).await?;
            println!("{} Uploaded to {}", style("✓").green(), url);
        }
    }

    Ok(())
}
