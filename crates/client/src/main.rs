//! veilbin - CLI over the site client facade.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;

use client::SiteClient;

/// veilbin - store encrypted JSON on a server you don't trust
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Base URL of the pastebin server
    #[arg(long, env = "VEILBIN_REMOTE", default_value = "http://localhost:3001")]
    remote: String,

    /// Site identity
    #[arg(long, env = "VEILBIN_SITE_ID")]
    site_id: String,

    /// Shared secret for the site
    #[arg(long, env = "VEILBIN_SECRET", hide_env_values = true)]
    secret: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Register this site with the server
    Register,
    /// Encrypt and store a JSON value
    Store {
        /// Location tag for later filtering
        #[arg(long)]
        location: String,
        /// JSON value to store
        data: String,
    },
    /// Fetch and decrypt stored records
    Retrieve {
        /// Only records at this location
        #[arg(long)]
        location: Option<String>,
    },
    /// Re-encrypt and replace an existing record
    Update {
        /// Record id as returned by store
        #[arg(long)]
        id: i64,
        /// New JSON value
        data: String,
    },
    /// Delete a record
    Delete {
        /// Record id as returned by store
        #[arg(long)]
        id: i64,
    },
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    match run(args).await {
        Ok(output) => {
            println!("{}", output);
            std::process::exit(0);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

async fn run(args: Args) -> Result<String> {
    let client = SiteClient::new(&args.remote, &args.site_id, &args.secret)?;

    match args.command {
        Command::Register => {
            client.register().await?;
            Ok(format!("Registered site: {}", client.site_id()))
        }
        Command::Store { location, data } => {
            let data: Value = serde_json::from_str(&data).context("data must be valid JSON")?;
            let id = client.store(&location, &data).await?;
            Ok(format!("Stored record: {}", id))
        }
        Command::Retrieve { location } => {
            let records = client.retrieve(location.as_deref()).await?;
            let out: Vec<Value> = records
                .into_iter()
                .map(|r| {
                    serde_json::json!({
                        "id": r.id,
                        "location": r.location,
                        "data": r.data,
                        "epoch": r.epoch,
                        "created_at": r.created_at,
                    })
                })
                .collect();
            Ok(serde_json::to_string_pretty(&out)?)
        }
        Command::Update { id, data } => {
            let data: Value = serde_json::from_str(&data).context("data must be valid JSON")?;
            let id = client.update(id, &data).await?;
            Ok(format!("Updated record: {}", id))
        }
        Command::Delete { id } => {
            client.delete(id).await?;
            Ok(format!("Deleted record: {}", id))
        }
    }
}
